//! # Core Models Module
//!
//! This module contains the data structures used to represent the candidate hits of one
//! query sequence.
//!
//! ## Key Components
//!
//! - [`segment`] - A closed residue-index interval and the helpers that operate on segment lists
//! - [`hit`] - A scored, possibly discontinuous match made of one or more segments
//! - [`collection`] - The append-only, arena-backed set of hits for a single query
//! - [`ids`] - Stable handle types for hits stored in a collection
//!
//! ## Usage
//!
//! ```ignore
//! use hitres::core::models::{collection::HitCollection, hit::Hit, segment::Segment};
//! use hitres::core::scoring::score_type::ScoreType;
//!
//! let mut collection = HitCollection::new("query1");
//! let hit = Hit::new("match1", vec![Segment::new(1, 10), Segment::new(20, 30)], 5.0, ScoreType::CrhScore);
//! let id = collection.push(hit);
//! ```

pub mod collection;
pub mod hit;
pub mod ids;
pub mod segment;
