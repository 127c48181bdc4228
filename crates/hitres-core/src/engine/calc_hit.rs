use crate::core::models::ids::HitId;
use crate::core::models::segment::{ResIdx, Segment};
use crate::core::overlap::segment_lists_overlap;
use crate::core::scoring::comparator::HitRank;

/// A hit as seen by the resolution algorithms: trimmed, filtered segments plus its weight
/// and rank.
///
/// `segments` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcHit {
    pub id: HitId,
    pub rank: HitRank,
    pub weight: f64,
    segments: Vec<Segment>,
}

impl CalcHit {
    /// Returns `None` if no segments are left.
    pub fn new(id: HitId, rank: HitRank, weight: f64, segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            id,
            rank,
            weight,
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn start(&self) -> ResIdx {
        self.segments[0].start()
    }

    #[inline]
    pub fn stop(&self) -> ResIdx {
        self.segments[self.segments.len() - 1].stop()
    }

    #[inline]
    pub fn start_of_last_segment(&self) -> ResIdx {
        self.segments[self.segments.len() - 1].start()
    }

    #[inline]
    pub fn is_discontiguous(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn overlaps(&self, other: &CalcHit) -> bool {
        self.start() <= other.stop()
            && other.start() <= self.stop()
            && segment_lists_overlap(&self.segments, &other.segments)
    }
}
