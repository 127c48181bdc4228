//! Hit ranking.
//!
//! [`score_type`] defines how raw scores are interpreted (which direction is better and how a
//! score becomes an additive weight), and [`comparator`] builds the total order over hits that
//! the engine uses for tie-breaking, greedy selection, duplicate pruning and truncation.

pub mod comparator;
pub mod score_type;
