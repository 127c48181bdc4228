use crate::core::models::hit::InvalidHitError;
use crate::core::models::ids::HitId;
use crate::core::models::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a hit was left out of the final architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    /// Overlaps a hit of the chosen architecture.
    OverlapLoss,
    /// A better hit has the identical segment list and duplicates were pruned.
    DuplicatePruned,
    /// Part of the optimum but cut when the result was limited to `max_hits`.
    TruncatedByMaxCount,
    /// Scored worse than the worst permissible score.
    ScoreFiltered,
    /// Every segment was shorter than the minimum segment length.
    SegmentsTooShort,
    /// Its component was not resolved before the time budget ran out.
    DeadlineExceeded,
}

impl RejectionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverlapLoss => "overlap-loss",
            Self::DuplicatePruned => "duplicate-pruned",
            Self::TruncatedByMaxCount => "truncated-by-max-count",
            Self::ScoreFiltered => "score-filtered",
            Self::SegmentsTooShort => "segments-too-short",
            Self::DeadlineExceeded => "deadline-exceeded",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedHit {
    pub hit: HitId,
    pub reason: RejectionReason,
}

/// A hit that failed validation and was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct HitDiagnostic {
    pub hit: HitId,
    pub error: InvalidHitError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedHit {
    pub hit: HitId,
    /// The hit's segments with boundaries shared with other selected hits split between them.
    pub resolved_segments: Vec<Segment>,
}

/// The outcome of resolving one query's hits.
///
/// Every hit of the input collection appears exactly once across `selected`, `rejected`
/// and `diagnostics`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// The chosen architecture, in the configured output order.
    pub selected: Vec<SelectedHit>,
    /// Valid hits left out, in registration order.
    pub rejected: Vec<RejectedHit>,
    /// Invalid hits skipped, in registration order.
    pub diagnostics: Vec<HitDiagnostic>,
    /// Sum of the weights of the selected hits.
    pub total_weight: f64,
    /// Number of independent overlap components the hits fell into.
    pub num_components: usize,
    /// `false` if the time budget ran out before every component was resolved.
    pub complete: bool,
}

impl Resolution {
    /// The resolution of an empty collection.
    pub fn empty() -> Self {
        Self {
            complete: true,
            ..Default::default()
        }
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = HitId> + '_ {
        self.selected.iter().map(|s| s.hit)
    }

    pub fn is_selected(&self, id: HitId) -> bool {
        self.selected.iter().any(|s| s.hit == id)
    }

    pub fn rejection_of(&self, id: HitId) -> Option<RejectionReason> {
        self.rejected
            .iter()
            .find(|r| r.hit == id)
            .map(|r| r.reason)
    }

    pub fn rejected_with(&self, reason: RejectionReason) -> impl Iterator<Item = HitId> + '_ {
        self.rejected
            .iter()
            .filter(move |r| r.reason == reason)
            .map(|r| r.hit)
    }
}
