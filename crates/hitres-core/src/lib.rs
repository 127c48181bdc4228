//! # hitres Core Library
//!
//! A library for resolving large sets of overlapping, possibly discontinuous
//! sequence-region hits into the best-scoring set of mutually non-overlapping hits,
//! i.e. the domain architecture of a query protein sequence.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear separation of concerns,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Segment`, `Hit`, `HitCollection`),
//!   the score-ordering strategy and hit comparator, the overlap detector, segment trimming and
//!   the plain-text hit-list I/O used by front ends.
//!
//! - **[`engine`]: The Logic Core.** Holds the resolution configuration, error types, progress
//!   reporting and the individual resolution tasks: validation, duplicate filtering, overlap-graph
//!   decomposition, the optimal dynamic program and the greedy alternative.
//!
//! - **[`workflows`]: The Public API.** Ties the `engine` and `core` together into a single
//!   `resolve` procedure that takes one query's hit collection and returns its `Resolution`.

pub mod core;
pub mod engine;
pub mod workflows;
