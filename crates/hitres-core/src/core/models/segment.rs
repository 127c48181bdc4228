use serde::{Deserialize, Serialize};
use std::fmt;

/// A residue index within a query sequence.
pub type ResIdx = u32;

/// A closed interval of residue indices, `start..=stop`.
///
/// Segments are small immutable values. A well-formed segment satisfies `start <= stop`;
/// construction does not enforce this so that malformed input can still be carried into a
/// [`HitCollection`](super::collection::HitCollection) and reported per hit by
/// [`Hit::validate`](super::hit::Hit::validate). Use [`Segment::try_new`] where an inverted
/// range should be rejected immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Segment {
    start: ResIdx,
    stop: ResIdx,
}

impl Segment {
    /// Creates a segment covering `start..=stop` without checking its orientation.
    pub const fn new(start: ResIdx, stop: ResIdx) -> Self {
        Self { start, stop }
    }

    /// Creates a segment, returning `None` if `start > stop`.
    pub fn try_new(start: ResIdx, stop: ResIdx) -> Option<Self> {
        (start <= stop).then_some(Self { start, stop })
    }

    /// The first residue covered by the segment.
    #[inline]
    pub const fn start(&self) -> ResIdx {
        self.start
    }

    /// The last residue covered by the segment.
    #[inline]
    pub const fn stop(&self) -> ResIdx {
        self.stop
    }

    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.start > self.stop
    }

    /// Number of residues covered by the segment, `stop - start + 1`.
    ///
    /// Inverted segments have length zero.
    #[inline]
    pub fn len(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            u64::from(self.stop - self.start) + 1
        }
    }

    /// Always `false` for well-formed segments, which cover at least one residue.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the two segments share at least one residue.
    #[inline]
    pub fn overlaps(&self, other: &Segment) -> bool {
        segments_overlap(self, other)
    }

    /// Number of residues shared by the two segments.
    pub fn overlap_len(&self, other: &Segment) -> u64 {
        let lo = self.start.max(other.start);
        let hi = self.stop.min(other.stop);
        if lo > hi { 0 } else { u64::from(hi - lo) + 1 }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

/// Returns `true` if two closed intervals share at least one residue.
#[inline]
pub fn segments_overlap(a: &Segment, b: &Segment) -> bool {
    a.start <= b.stop && b.start <= a.stop
}

/// Sum of the lengths of all segments in the list.
pub fn total_length(segments: &[Segment]) -> u64 {
    segments.iter().map(Segment::len).sum()
}

/// Formats a segment list as comma-separated `start-stop` ranges.
pub fn format_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
