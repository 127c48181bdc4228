use super::segment::{ResIdx, Segment, total_length};
use crate::core::scoring::score_type::ScoreType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes why a hit cannot take part in resolution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidHitError {
    #[error("hit has no segments")]
    NoSegments,
    #[error("segment {start}-{stop} starts after it stops")]
    InvertedSegment { start: ResIdx, stop: ResIdx },
    #[error("segments {first} and {second} are not start-sorted and disjoint")]
    UnorderedSegments { first: Segment, second: Segment },
    #[error("score {0} is not a finite number")]
    NonFiniteScore(f64),
    #[error("e-value {0} is negative")]
    NegativeEvalue(f64),
    #[error("hit carries a {found} score but resolution is configured for {expected}")]
    ScoreTypeMismatch { expected: ScoreType, found: ScoreType },
}

/// A candidate match between a region of the query and some model.
///
/// A hit covers one or more segments of the query. Hits with more than one segment are
/// *discontiguous*: the residues between their segments are not part of the hit and may be
/// claimed by other hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Identifier of the matched model (e.g. a domain family or HMM name).
    pub label: String,
    /// The covered segments, start-sorted and pairwise disjoint.
    pub segments: Vec<Segment>,
    /// The raw score as reported by the search tool.
    pub score: f64,
    /// Interpretation of `score`.
    pub score_type: ScoreType,
}

impl Hit {
    /// Creates a new hit. No validation is performed; see [`Hit::validate`].
    pub fn new(
        label: impl Into<String>,
        segments: Vec<Segment>,
        score: f64,
        score_type: ScoreType,
    ) -> Self {
        Self {
            label: label.into(),
            segments,
            score,
            score_type,
        }
    }

    /// Convenience constructor from `(start, stop)` pairs.
    pub fn from_bounds(
        label: impl Into<String>,
        bounds: &[(ResIdx, ResIdx)],
        score: f64,
        score_type: ScoreType,
    ) -> Self {
        let segments = bounds
            .iter()
            .map(|&(start, stop)| Segment::new(start, stop))
            .collect();
        Self::new(label, segments, score, score_type)
    }

    /// Checks the structural invariants every hit must satisfy before resolution:
    /// at least one segment, no inverted segment, segments start-sorted and disjoint,
    /// and a finite score (non-negative for e-values).
    pub fn validate(&self) -> Result<(), InvalidHitError> {
        if self.segments.is_empty() {
            return Err(InvalidHitError::NoSegments);
        }
        if let Some(seg) = self.segments.iter().find(|s| s.is_inverted()) {
            return Err(InvalidHitError::InvertedSegment {
                start: seg.start(),
                stop: seg.stop(),
            });
        }
        if let Some(pair) = self
            .segments
            .windows(2)
            .find(|pair| pair[0].stop() >= pair[1].start())
        {
            return Err(InvalidHitError::UnorderedSegments {
                first: pair[0],
                second: pair[1],
            });
        }
        if !self.score.is_finite() {
            return Err(InvalidHitError::NonFiniteScore(self.score));
        }
        if self.score_type == ScoreType::Evalue && self.score < 0.0 {
            return Err(InvalidHitError::NegativeEvalue(self.score));
        }
        Ok(())
    }

    /// Sum of the lengths of the hit's segments.
    pub fn total_length(&self) -> u64 {
        total_length(&self.segments)
    }

    /// The first residue of the first segment.
    pub fn start(&self) -> Option<ResIdx> {
        self.segments.first().map(Segment::start)
    }

    /// The last residue of the last segment.
    pub fn stop(&self) -> Option<ResIdx> {
        self.segments.last().map(Segment::stop)
    }

    pub fn is_discontiguous(&self) -> bool {
        self.segments.len() > 1
    }

    /// The additive weight this hit contributes to an architecture.
    pub fn weight(&self) -> f64 {
        self.score_type.weight(self.score)
    }
}
