//! Finite partially ordered monoids presented by a generating alphabet and
//! string-rewriting relations, with categorical products and congruence
//! detection.

pub mod error;
pub mod monoid;
pub mod order;
pub mod presentation;
pub mod product;
pub mod reduce;
