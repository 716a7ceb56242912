//! Carrier enumeration, the multiplication table, and the flat pomonoid.

use either::Either;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

use crate::{
    error::PomonoidError,
    order::Order,
    presentation::{Presentation, IDENTITY},
    reduce::WordReducer,
};

pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Cap on generating-word length during carrier enumeration. For a
/// terminating, confluent presentation the closure stabilizes at small
/// lengths; reaching the cap means the presentation never stabilized.
pub const MAX_WORD_LENGTH: usize = 1000;

/// A finite partially ordered monoid: carrier of normal forms, dense
/// multiplication table, and order data. Immutable once constructed.
#[derive(Clone, Debug)]
pub struct Pomonoid {
    presentation: Presentation,
    reducer: WordReducer,
    elements: FxIndexSet<String>,
    table: Vec<usize>,
    order: Order,
}

impl Pomonoid {
    /// Builds the pomonoid presented by `presentation`: closes the alphabet
    /// under the relations, generates the table, and closes the declared
    /// order pairs.
    pub fn new(presentation: Presentation) -> Result<Self, PomonoidError> {
        let reducer = WordReducer::new(presentation.rules());
        let elements = enumerate_elements(&reducer, &presentation.generator_list())?;

        Self::finish(presentation, reducer, elements)
    }

    /// Builds a pomonoid over an already-known carrier, bypassing generator
    /// closure. The caller asserts the carrier is closed under the operation;
    /// a product falling outside it still fails construction.
    pub fn with_elements(
        presentation: Presentation,
        elements: &[&str],
    ) -> Result<Self, PomonoidError> {
        let reducer = WordReducer::new(presentation.rules());
        let elements = elements.iter().map(|&element| element.to_owned()).collect();

        Self::finish(presentation, reducer, elements)
    }

    fn finish(
        presentation: Presentation,
        reducer: WordReducer,
        elements: FxIndexSet<String>,
    ) -> Result<Self, PomonoidError> {
        let table = generate_table(&reducer, &elements)?;
        let order = close_order(&elements, &presentation)?;

        Ok(Self {
            presentation,
            reducer,
            elements,
            table,
            order,
        })
    }

    // Rehydration path for exported products: everything is precomputed.
    pub(crate) fn from_parts(
        presentation: Presentation,
        elements: FxIndexSet<String>,
        table: Vec<usize>,
        order: Order,
    ) -> Self {
        let reducer = WordReducer::new(presentation.rules());

        Self {
            presentation,
            reducer,
            elements,
            table,
            order,
        }
    }

    /// The carrier, in discovery order (identity first, then by generating
    /// word length).
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }

    /// The carrier size.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the carrier is empty. It never is: the identity is always
    /// present.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `word` is a carrier element.
    pub fn contains(&self, word: &str) -> bool {
        self.elements.contains(word)
    }

    pub(crate) fn index_of(&self, word: &str) -> Result<usize, PomonoidError> {
        self.elements
            .get_index_of(word)
            .ok_or_else(|| PomonoidError::UnknownElement(word.to_owned()))
    }

    /// The monoid operation on carrier elements, read off the table.
    pub fn product(&self, x: &str, y: &str) -> Result<&str, PomonoidError> {
        let a = self.index_of(x)?;
        let b = self.index_of(y)?;
        let index = self.table[a * self.elements.len() + b];

        Ok(self.elements.get_index(index).unwrap().as_str())
    }

    /// Reports whether `x >= y`. Reflexive.
    pub fn compare(&self, x: &str, y: &str) -> Result<bool, PomonoidError> {
        Ok(self.order.compare(self.index_of(x)?, self.index_of(y)?))
    }

    /// Whether `x` covers `y` in the minimal representation of the order.
    pub fn incident(&self, x: &str, y: &str) -> Result<bool, PomonoidError> {
        Ok(self.order.incident(self.index_of(x)?, self.index_of(y)?))
    }

    /// The covering pairs, for rendering or inspection.
    pub fn covering_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.incidence().pairs().map(|(a, b)| {
            (
                self.elements.get_index(a).unwrap().as_str(),
                self.elements.get_index(b).unwrap().as_str(),
            )
        })
    }

    /// The order data over element indices.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The reducer driving this monoid's operation.
    pub fn reducer(&self) -> &WordReducer {
        &self.reducer
    }

    /// The presentation this monoid was built from.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}

/// Every length-`length` word over `generators`, or just the identity when
/// the length is zero.
pub(crate) fn words_of_length(
    generators: &[char],
    length: usize,
) -> impl Iterator<Item = String> + '_ {
    if generators.is_empty() || length == 0 {
        return Either::Left(std::iter::once(IDENTITY.to_string()));
    }

    let mut digits = vec![0usize; length];
    let mut exhausted = false;

    Either::Right(std::iter::from_fn(move || {
        if exhausted {
            return None;
        }

        let word: String = digits.iter().map(|&digit| generators[digit]).collect();

        let mut position = 0;
        loop {
            if position == digits.len() {
                exhausted = true;
                break;
            }

            digits[position] += 1;

            if digits[position] < generators.len() {
                break;
            }

            digits[position] = 0;
            position += 1;
        }

        Some(word)
    }))
}

fn enumerate_elements(
    reducer: &WordReducer,
    generators: &[char],
) -> Result<FxIndexSet<String>, PomonoidError> {
    let mut elements = FxIndexSet::default();
    elements.insert(IDENTITY.to_string());

    for length in 1..=MAX_WORD_LENGTH {
        let before = elements.len();

        for word in words_of_length(generators, length) {
            elements.insert(reducer.reduce(&word)?);
        }

        if elements.len() == before {
            log::debug!(
                "carrier stabilized at {} elements below word length {length}",
                elements.len()
            );

            return Ok(elements);
        }
    }

    Err(PomonoidError::EnumerationDidNotConverge {
        limit: MAX_WORD_LENGTH,
    })
}

fn generate_table(
    reducer: &WordReducer,
    elements: &FxIndexSet<String>,
) -> Result<Vec<usize>, PomonoidError> {
    let size = elements.len();
    let mut table = Vec::with_capacity(size * size);

    for x in elements {
        for y in elements {
            let product = reducer.product(x, y)?;

            match elements.get_index_of(&product) {
                Some(index) => table.push(index),
                None => {
                    return Err(PomonoidError::OperationNotClosed {
                        left: x.clone(),
                        right: y.clone(),
                        product,
                    })
                }
            }
        }
    }

    Ok(table)
}

fn close_order(
    elements: &FxIndexSet<String>,
    presentation: &Presentation,
) -> Result<Order, PomonoidError> {
    let mut pairs = Vec::new();

    for (greater, lesser) in presentation.order_pairs() {
        let a = elements
            .get_index_of(greater)
            .ok_or_else(|| PomonoidError::UnknownElement(greater.to_owned()))?;
        let b = elements
            .get_index_of(lesser)
            .ok_or_else(|| PomonoidError::UnknownElement(lesser.to_owned()))?;

        pairs.push((a, b));
    }

    Order::new(elements.len(), pairs).map_err(|(a, b)| PomonoidError::InvalidPartialOrder {
        first: elements.get_index(a).unwrap().clone(),
        second: elements.get_index(b).unwrap().clone(),
    })
}
