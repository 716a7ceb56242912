//! Categorical products of pomonoids, congruence detection, and export back
//! to a flat presentation.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    hash::{Hash, Hasher},
};

use hashbrown::{Equivalent, HashMap};

use crate::{
    error::PomonoidError,
    monoid::{words_of_length, FxIndexSet, Pomonoid, MAX_WORD_LENGTH},
    order::Order,
    presentation::IDENTITY,
    reduce::{Rule, WordReducer},
};

/// An element of a product pomonoid: a generating-word label together with
/// its normal form in each component. Identity is the component pair; the
/// label is display and export metadata only.
#[derive(Clone, Debug)]
pub struct ProductElement {
    word: String,
    left: String,
    right: String,
}

impl ProductElement {
    fn new(word: String, left: String, right: String) -> Self {
        Self { word, left, right }
    }

    /// The generating-word label.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The normal form in the left component.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The normal form in the right component.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// The identity-defining component pair.
    pub fn pair(&self) -> (&str, &str) {
        (&self.left, &self.right)
    }
}

impl PartialEq for ProductElement {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl Eq for ProductElement {}

impl Hash for ProductElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left.hash(state);
        self.right.hash(state);
    }
}

impl fmt::Display for ProductElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Pair {
    left: String,
    right: String,
}

impl Equivalent<Pair> for (&str, &str) {
    fn equivalent(&self, key: &Pair) -> bool {
        self.0 == key.left && self.1 == key.right
    }
}

/// Which of two equal-length generating words is kept as the canonical label
/// when they collapse onto the same component pair. Both conventions are
/// preserved until the intended one is confirmed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TieBreak {
    /// The lexicographically smaller word is canonical.
    Lexicographic,
    /// The lexicographically greater word is canonical.
    #[default]
    ReverseLexicographic,
}

impl TieBreak {
    // Whether `challenger` should replace `canonical` as the label. Total and
    // deterministic over distinct equal-length words.
    fn prefers(self, challenger: &str, canonical: &str) -> bool {
        match self {
            TieBreak::Lexicographic => challenger < canonical,
            TieBreak::ReverseLexicographic => challenger > canonical,
        }
    }
}

/// The product of two pomonoids over a shared alphabet and base. Elements
/// are enumerated by the same breadth-first word closure as a flat monoid
/// but deduplicated by component pair; generating words that collapse onto
/// an existing pair are recorded as congruences.
#[derive(Debug)]
pub struct ProductPomonoid<'a> {
    left: &'a Pomonoid,
    right: &'a Pomonoid,
    elements: Vec<ProductElement>,
    pair_index: HashMap<Pair, usize>,
    congruences: BTreeMap<String, BTreeSet<String>>,
    table: Vec<usize>,
    order: Order,
}

impl<'a> ProductPomonoid<'a> {
    /// Builds the product with the default equal-length tie-break.
    pub fn new(left: &'a Pomonoid, right: &'a Pomonoid) -> Result<Self, PomonoidError> {
        Self::with_tie_break(left, right, TieBreak::default())
    }

    /// Builds the product, resolving equal-length label collapses by
    /// `tie_break`.
    pub fn with_tie_break(
        left: &'a Pomonoid,
        right: &'a Pomonoid,
        tie_break: TieBreak,
    ) -> Result<Self, PomonoidError> {
        if !left.presentation().compatible_with(right.presentation()) {
            return Err(PomonoidError::ComponentMismatch);
        }

        // Generating-word labels are normalized by the shared base alone, so
        // labels stay neutral with respect to either component's relations.
        let base_reducer = WordReducer::new(left.presentation().base_rules());
        let generators = left.presentation().generator_list();

        let mut builder = Builder {
            left,
            right,
            base_reducer,
            tie_break,
            elements: Vec::new(),
            pair_index: HashMap::new(),
            congruences: BTreeMap::new(),
        };

        builder.enumerate(&generators)?;

        let table = builder.generate_table()?;
        let order = builder.close_order()?;

        Ok(Self {
            left,
            right,
            elements: builder.elements,
            pair_index: builder.pair_index,
            congruences: builder.congruences,
            table,
            order,
        })
    }

    /// The product elements, in discovery order.
    pub fn elements(&self) -> impl Iterator<Item = &ProductElement> {
        self.elements.iter()
    }

    /// The number of product elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the product is empty. It never is.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The component pairs, in discovery order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements.iter().map(ProductElement::pair)
    }

    /// Finds the element labeled `word`, if any.
    pub fn lookup(&self, word: &str) -> Option<&ProductElement> {
        self.elements.iter().find(|element| element.word == word)
    }

    fn index_of(&self, element: &ProductElement) -> Result<usize, PomonoidError> {
        self.pair_index
            .get(&element.pair())
            .copied()
            .ok_or_else(|| PomonoidError::UnknownElement(element.word.clone()))
    }

    /// The product operation, read off the table.
    pub fn product(
        &self,
        x: &ProductElement,
        y: &ProductElement,
    ) -> Result<&ProductElement, PomonoidError> {
        let a = self.index_of(x)?;
        let b = self.index_of(y)?;

        Ok(&self.elements[self.table[a * self.elements.len() + b]])
    }

    /// Reports whether `x >= y`: componentwise comparison in both factors.
    pub fn compare(&self, x: &ProductElement, y: &ProductElement) -> Result<bool, PomonoidError> {
        Ok(self.left.compare(&x.left, &y.left)? && self.right.compare(&x.right, &y.right)?)
    }

    /// Whether `x` covers `y` in the product order.
    pub fn incident(&self, x: &ProductElement, y: &ProductElement) -> Result<bool, PomonoidError> {
        Ok(self.order.incident(self.index_of(x)?, self.index_of(y)?))
    }

    /// The covering pairs of the product order.
    pub fn covering_pairs(&self) -> impl Iterator<Item = (&ProductElement, &ProductElement)> {
        self.order
            .incidence()
            .pairs()
            .map(|(a, b)| (&self.elements[a], &self.elements[b]))
    }

    /// The order data over element indices.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The discovered congruences: each canonical label with the generating
    /// words that collapsed onto its component pair.
    pub fn collapses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.congruences.iter().flat_map(|(canonical, collapsed)| {
            collapsed
                .iter()
                .map(move |word| (canonical.as_str(), word.as_str()))
        })
    }

    /// Re-expresses the product as a flat presented pomonoid: elements are
    /// the generating-word labels, table and order are relabeled copies, and
    /// the relation set is the discovered congruences oriented
    /// collapsed-word-to-canonical (dropping pairs whose collapsed word is
    /// strictly shorter, matching the longer-to-shorter reduction
    /// direction). The result can seed a further product.
    pub fn export(&self) -> Result<Pomonoid, PomonoidError> {
        let mut words: FxIndexSet<String> = FxIndexSet::default();

        for element in &self.elements {
            if !words.insert(element.word.clone()) {
                return Err(PomonoidError::AmbiguousLabel(element.word.clone()));
            }
        }

        let mut relations = Vec::new();

        for (canonical, collapsed) in &self.congruences {
            for word in collapsed {
                if word.len() >= canonical.len() {
                    relations.push(Rule::new(word, canonical));
                }
            }
        }

        let presentation = self.left.presentation().exported(relations);

        Ok(Pomonoid::from_parts(
            presentation,
            words,
            self.table.clone(),
            self.order.clone(),
        ))
    }
}

struct Builder<'a> {
    left: &'a Pomonoid,
    right: &'a Pomonoid,
    base_reducer: WordReducer,
    tie_break: TieBreak,
    elements: Vec<ProductElement>,
    pair_index: HashMap<Pair, usize>,
    congruences: BTreeMap<String, BTreeSet<String>>,
}

impl Builder<'_> {
    fn enumerate(&mut self, generators: &[char]) -> Result<(), PomonoidError> {
        let identity = IDENTITY.to_string();
        self.insert_new(ProductElement::new(
            identity.clone(),
            identity.clone(),
            identity,
        ));

        for length in 1..=MAX_WORD_LENGTH {
            let before = self.elements.len();

            for word in words_of_length(generators, length) {
                let label = self.base_reducer.reduce(&word)?;
                let left = self.left.reducer().reduce(&word)?;
                let right = self.right.reducer().reduce(&word)?;

                match self.pair_index.get(&(left.as_str(), right.as_str())) {
                    None => {
                        self.insert_new(ProductElement::new(label, left, right));
                    }
                    Some(&index) => self.collapse(index, label),
                }
            }

            if self.elements.len() == before {
                log::debug!(
                    "product stabilized at {} elements below word length {length}",
                    self.elements.len()
                );

                return Ok(());
            }
        }

        Err(PomonoidError::EnumerationDidNotConverge {
            limit: MAX_WORD_LENGTH,
        })
    }

    fn insert_new(&mut self, element: ProductElement) {
        self.pair_index.insert(
            Pair {
                left: element.left.clone(),
                right: element.right.clone(),
            },
            self.elements.len(),
        );
        self.elements.push(element);
    }

    // A generating word landed on an already-known component pair: keep the
    // shorter label as canonical (tie-break on equal length, with the
    // identity never displaced) and record the other as a congruence.
    fn collapse(&mut self, index: usize, label: String) {
        let canonical = self.elements[index].word.clone();

        if canonical == label {
            return;
        }

        log::debug!("collapse {label:?} onto {canonical:?}");

        let relabel = index != 0
            && (label.len() < canonical.len()
                || (label.len() == canonical.len()
                    && self.tie_break.prefers(&label, &canonical)));

        if relabel {
            let displaced = std::mem::replace(&mut self.elements[index].word, label.clone());
            let mut collapsed = self.congruences.remove(&displaced).unwrap_or_default();
            collapsed.insert(displaced);
            collapsed.remove(&label);
            self.congruences
                .entry(label)
                .or_default()
                .extend(collapsed);
        } else {
            self.congruences.entry(canonical).or_default().insert(label);
        }
    }

    fn generate_table(&self) -> Result<Vec<usize>, PomonoidError> {
        let size = self.elements.len();
        let mut table = Vec::with_capacity(size * size);

        for x in &self.elements {
            for y in &self.elements {
                let left = self.left.reducer().product(&x.left, &y.left)?;
                let right = self.right.reducer().product(&x.right, &y.right)?;

                match self.pair_index.get(&(left.as_str(), right.as_str())) {
                    Some(&index) => table.push(index),
                    None => {
                        return Err(PomonoidError::OperationNotClosed {
                            left: x.word.clone(),
                            right: y.word.clone(),
                            product: format!("({left}, {right})"),
                        })
                    }
                }
            }
        }

        Ok(table)
    }

    // The componentwise relation is a full preorder already, so the closure
    // pass inside Order::new is idempotent here.
    fn close_order(&self) -> Result<Order, PomonoidError> {
        let mut pairs = Vec::new();

        for (a, x) in self.elements.iter().enumerate() {
            for (b, y) in self.elements.iter().enumerate() {
                if a != b
                    && self.left.compare(&x.left, &y.left)?
                    && self.right.compare(&x.right, &y.right)?
                {
                    pairs.push((a, b));
                }
            }
        }

        Order::new(self.elements.len(), pairs).map_err(|(a, b)| {
            PomonoidError::InvalidPartialOrder {
                first: self.elements[a].word.clone(),
                second: self.elements[b].word.clone(),
            }
        })
    }
}
