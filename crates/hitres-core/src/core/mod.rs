//! # Core Module
//!
//! This module provides the fundamental building blocks for hit resolution: the value types
//! describing hits and their segments, the strategies used to rank them, and the geometry used
//! to decide whether two hits can coexist in one domain architecture.
//!
//! ## Architecture
//!
//! - **Hit Representation** ([`models`]) - Segments, hits, and the arena-backed hit collection
//! - **Ranking** ([`scoring`]) - Score-type strategies and the total order over hits
//! - **Overlap Geometry** ([`overlap`]) - Multi-segment overlap detection
//! - **Boundary Tolerance** ([`trim`]) - Segment trimming that lets neighbouring hits overlap slightly
//! - **File I/O** ([`io`]) - Reading and writing the plain-text hit-list format
//!
//! Everything in this layer is free of global state and side effects other than the
//! explicit reader/writer arguments of [`io`].

pub mod io;
pub mod models;
pub mod overlap;
pub mod scoring;
pub mod trim;
