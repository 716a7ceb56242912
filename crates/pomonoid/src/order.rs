//! Transitive closure and covering relations over a finite element set.

/// A dense boolean relation over element indices `0..size`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RelationMatrix {
    size: usize,
    entries: Vec<bool>,
}

impl RelationMatrix {
    /// Creates an empty relation over `size` elements.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: vec![false; size * size],
        }
    }

    /// The number of elements the relation ranges over.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `(a, b)` is in the relation.
    pub fn get(&self, a: usize, b: usize) -> bool {
        self.entries[a * self.size + b]
    }

    /// Sets membership of `(a, b)`.
    pub fn set(&mut self, a: usize, b: usize, value: bool) {
        self.entries[a * self.size + b] = value;
    }

    /// The related pairs, in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size)
            .flat_map(move |a| (0..self.size).map(move |b| (a, b)))
            .filter(|&(a, b)| self.get(a, b))
    }

    /// The number of related pairs.
    pub fn count(&self) -> usize {
        self.entries.iter().filter(|&&entry| entry).count()
    }

    /// Closes the relation under transitivity in place (Warshall).
    pub fn transitive_closure(&mut self) {
        for b in 0..self.size {
            for a in 0..self.size {
                if self.get(a, b) {
                    for c in 0..self.size {
                        if self.get(b, c) {
                            self.set(a, c, true);
                        }
                    }
                }
            }
        }
    }
}

/// A strict partial order together with its covering relation.
///
/// `ordering` is the full transitive closure of the seed pairs with an empty
/// diagonal; `incidence` keeps only the edges not implied through an
/// intermediate element, which is the exact transitive reduction because
/// cyclic seeds are rejected at construction.
#[derive(Clone, Debug)]
pub struct Order {
    ordering: RelationMatrix,
    incidence: RelationMatrix,
}

impl Order {
    /// Builds the order from `(greater, lesser)` index pairs. Diagonal seeds
    /// are discarded (the order is stored strictly). Fails with the two
    /// indices of a mutually reachable pair when the seeds close to a cycle.
    pub fn new(
        size: usize,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, (usize, usize)> {
        let mut ordering = RelationMatrix::new(size);

        for (greater, lesser) in pairs {
            if greater != lesser {
                ordering.set(greater, lesser, true);
            }
        }

        ordering.transitive_closure();

        for a in 0..size {
            for b in a + 1..size {
                if ordering.get(a, b) && ordering.get(b, a) {
                    return Err((a, b));
                }
            }
        }

        let incidence = Self::reduction(&ordering);

        Ok(Self { ordering, incidence })
    }

    // Keep (a, b) only when no intermediate c explains it. Exact on the
    // acyclic relations construction admits.
    fn reduction(ordering: &RelationMatrix) -> RelationMatrix {
        let mut incidence = ordering.clone();

        for (a, b) in ordering.pairs() {
            for c in 0..ordering.size() {
                if c != a && c != b && ordering.get(a, c) && ordering.get(c, b) {
                    incidence.set(a, b, false);
                    break;
                }
            }
        }

        incidence
    }

    /// Reports whether the element at `a` is at least the element at `b`.
    /// Reflexive.
    pub fn compare(&self, a: usize, b: usize) -> bool {
        a == b || self.ordering.get(a, b)
    }

    /// Whether `a` covers `b`.
    pub fn incident(&self, a: usize, b: usize) -> bool {
        self.incidence.get(a, b)
    }

    /// The strict transitive closure.
    pub fn ordering(&self) -> &RelationMatrix {
        &self.ordering
    }

    /// The covering relation.
    pub fn incidence(&self) -> &RelationMatrix {
        &self.incidence
    }
}
