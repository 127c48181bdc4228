//! Overlap detection between hits.
//!
//! Two hits overlap exactly when some segment of one shares a residue with some segment of the
//! other. Residues in the gap between a discontiguous hit's segments are not covered by that
//! hit, so another hit may sit inside the gap without overlapping it.
//!
//! All functions expect segment lists that are start-sorted and pairwise disjoint, as
//! guaranteed for any hit that passed [`Hit::validate`](crate::core::models::hit::Hit::validate).

use crate::core::models::hit::Hit;
use crate::core::models::segment::{Segment, segments_overlap};

/// Returns `true` if any segment of `a` shares a residue with any segment of `b`.
///
/// Runs in `O(|a| + |b|)` by walking both lists in start order.
pub fn segment_lists_overlap(a: &[Segment], b: &[Segment]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if segments_overlap(&a[i], &b[j]) {
            return true;
        }
        if a[i].stop() < b[j].stop() {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}

/// Number of residues covered by both segment lists.
pub fn overlap_length(a: &[Segment], b: &[Segment]) -> u64 {
    let (mut i, mut j) = (0, 0);
    let mut shared = 0;
    while i < a.len() && j < b.len() {
        shared += a[i].overlap_len(&b[j]);
        if a[i].stop() < b[j].stop() {
            i += 1;
        } else {
            j += 1;
        }
    }
    shared
}

pub fn hits_overlap(a: &Hit, b: &Hit) -> bool {
    segment_lists_overlap(&a.segments, &b.segments)
}
