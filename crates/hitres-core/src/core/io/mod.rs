//! Provides input/output functionality for hit lists.
//!
//! This module contains the plain-text hit-list format consumed and produced by front ends,
//! behind a small trait-based interface so further formats can be added alongside it.

pub mod raw;
pub mod traits;
