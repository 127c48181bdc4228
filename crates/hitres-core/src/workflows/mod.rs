//! # Workflows Module
//!
//! This module provides the high-level entry point that runs a complete resolution.
//!
//! ## Overview
//!
//! Workflows are the top-level API of hitres. They take one query's hit collection and a
//! validated configuration, drive the engine's tasks in order, report progress, and return
//! a [`Resolution`](crate::engine::state::Resolution) that accounts for every input hit.
//!
//! ## Architecture
//!
//! - **Resolve Workflow** ([`resolve`]) - Validation, filtering, duplicate handling,
//!   component decomposition, per-component optimisation, truncation, ordering and
//!   boundary resolution.

pub mod resolve;
