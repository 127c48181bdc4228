//! # Engine Module
//!
//! This module implements the resolution engine: given the candidate hits of one query, it
//! chooses the set of mutually non-overlapping hits with the greatest total weight.
//!
//! ## Overview
//!
//! Resolution runs as a fixed pipeline of tasks. Hits are validated, filtered and trimmed,
//! duplicates are handled according to policy, and the overlap graph is split into
//! independent components. Each component is then resolved on its own, in parallel when
//! the `parallel` feature is enabled, and the per-component optima are merged.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Resolution settings and their builder
//! - **State Tracking** ([`state`]) - The resolution result and rejection bookkeeping
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Key Capabilities
//!
//! - **Exact optimisation** over discontiguous hits, including hits nested in each other's gaps
//! - **Deterministic tie-breaking** through a total order over hits
//! - **Boundary tolerance** through configurable segment trimming
//! - **Component decomposition** so unrelated regions are solved independently
//! - **Optional wall-clock budget** checked between components

pub(crate) mod calc_hit;
pub mod config;
pub(crate) mod context;
pub mod error;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
