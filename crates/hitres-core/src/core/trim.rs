//! Boundary tolerance through segment trimming.
//!
//! Before overlaps are tested, every segment can be shrunk at both ends so that neighbouring
//! hits whose boundaries disagree by a few residues are still allowed to coexist. A
//! [`TrimSpec`] describes the trimming applied to a segment of `full_length` residues or more;
//! shorter segments are trimmed proportionally less.

use crate::core::models::segment::{ResIdx, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrimSpecError {
    #[error("total trimming ({total_trimming}) must be less than the full length ({full_length})")]
    TrimmingTooLarge {
        full_length: ResIdx,
        total_trimming: ResIdx,
    },
    #[error("malformed trim specification '{0}' (expected '<full-length>/<total-trimming>')")]
    Malformed(String),
}

/// Describes how much to trim from segments of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrimSpec {
    full_length: ResIdx,
    total_trimming: ResIdx,
}

impl Default for TrimSpec {
    fn default() -> Self {
        Self::none()
    }
}

impl TrimSpec {
    /// Creates a trim specification. `total_trimming` must be less than `full_length`.
    pub fn new(full_length: ResIdx, total_trimming: ResIdx) -> Result<Self, TrimSpecError> {
        if total_trimming >= full_length {
            return Err(TrimSpecError::TrimmingTooLarge {
                full_length,
                total_trimming,
            });
        }
        Ok(Self {
            full_length,
            total_trimming,
        })
    }

    /// The identity trimming.
    pub const fn none() -> Self {
        Self {
            full_length: 1,
            total_trimming: 0,
        }
    }

    /// A trimming that lets two hits share up to `boundary_overlap` residues at a boundary.
    ///
    /// Every segment loses `boundary_overlap` residues in total, half at each end (the extra
    /// residue of an odd total comes off the stop).
    pub fn tolerance(boundary_overlap: ResIdx) -> Self {
        Self {
            full_length: boundary_overlap.saturating_add(1),
            total_trimming: boundary_overlap.min(ResIdx::MAX - 1),
        }
    }

    pub fn full_length(&self) -> ResIdx {
        self.full_length
    }

    pub fn total_trimming(&self) -> ResIdx {
        self.total_trimming
    }

    pub fn is_identity(&self) -> bool {
        self.total_trimming == 0
    }

    /// Total residues removed from a segment of `length` residues.
    ///
    /// Segments at least `full_length` long lose `total_trimming`; shorter ones lose a
    /// linearly interpolated, rounded-down amount, so a segment of length one is never trimmed.
    pub fn total_trimming_of_length(&self, length: u64) -> u64 {
        let full_length = u64::from(self.full_length);
        let total_trimming = u64::from(self.total_trimming);
        if length == 0 {
            0
        } else if length >= full_length {
            total_trimming
        } else {
            (length - 1) * total_trimming / (full_length - 1)
        }
    }

    pub fn start_trimming_of_length(&self, length: u64) -> u64 {
        self.total_trimming_of_length(length) / 2
    }

    pub fn stop_trimming_of_length(&self, length: u64) -> u64 {
        let total = self.total_trimming_of_length(length);
        total / 2 + total % 2
    }

    /// Trims a well-formed segment. The result always covers at least one residue.
    pub fn trim(&self, segment: &Segment) -> Segment {
        let length = segment.len();
        // Both amounts are below `length`, which itself fits a residue index.
        let start_trim = self.start_trimming_of_length(length) as ResIdx;
        let stop_trim = self.stop_trimming_of_length(length) as ResIdx;
        Segment::new(segment.start() + start_trim, segment.stop() - stop_trim)
    }

    pub fn trim_all(&self, segments: &[Segment]) -> Vec<Segment> {
        segments.iter().map(|segment| self.trim(segment)).collect()
    }
}

impl fmt::Display for TrimSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.full_length, self.total_trimming)
    }
}

impl FromStr for TrimSpec {
    type Err = TrimSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TrimSpecError::Malformed(s.to_string());
        let (full, total) = s.trim().split_once('/').ok_or_else(malformed)?;
        let full_length = full.trim().parse::<ResIdx>().map_err(|_| malformed())?;
        let total_trimming = total.trim().parse::<ResIdx>().map_err(|_| malformed())?;
        Self::new(full_length, total_trimming)
    }
}

impl TryFrom<String> for TrimSpec {
    type Error = TrimSpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrimSpec> for String {
    fn from(value: TrimSpec) -> Self {
        value.to_string()
    }
}
