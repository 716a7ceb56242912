//! Construction-time failure conditions.

use thiserror::Error;

/// Errors surfaced while building or querying a pomonoid. Constructors never
/// hand back a partially computed structure.
#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum PomonoidError {
    /// Rewriting passes on a word did not reach a fixpoint within the pass
    /// limit. The relation set is presumed non-terminating.
    #[error("reduction of {word:?} did not reach a fixpoint within {limit} passes")]
    ReductionDidNotConverge {
        /// The word as it looked when the limit was hit.
        word: String,
        /// The configured pass limit.
        limit: usize,
    },
    /// Every word length up to the cap kept contributing new normal forms.
    #[error("element enumeration did not stabilize below word length {limit}")]
    EnumerationDidNotConverge {
        /// The word-length cap.
        limit: usize,
    },
    /// The declared order pairs close to a cycle, so no strict partial order
    /// (and no covering relation) exists.
    #[error("order seeds close to a cycle through {first:?} and {second:?}")]
    InvalidPartialOrder {
        /// One element on the cycle.
        first: String,
        /// A distinct element reachable from `first` and back.
        second: String,
    },
    /// A query or order seed referenced a word outside the carrier.
    #[error("unknown element {0:?}")]
    UnknownElement(String),
    /// A product of two carrier elements reduced to a word outside the
    /// carrier. This is the symptom of a non-confluent presentation.
    #[error("product of {left:?} and {right:?} reduced to {product:?}, outside the carrier")]
    OperationNotClosed {
        /// Left factor.
        left: String,
        /// Right factor.
        right: String,
        /// The offending normal form.
        product: String,
    },
    /// Product components disagree on the generator alphabet or on the base
    /// relations, so no shared generating-word closure exists.
    #[error("product components disagree on generators or base relations")]
    ComponentMismatch,
    /// Two distinct product elements ended up with the same generating-word
    /// label, so the product cannot be exported as a flat presentation.
    #[error("distinct product elements share the generating word {0:?}")]
    AmbiguousLabel(String),
}
