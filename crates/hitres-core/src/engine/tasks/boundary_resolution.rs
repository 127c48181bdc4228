use crate::core::models::segment::Segment;
use tracing::{instrument, trace};

/// Splits residues shared between the segments of different selected hits.
///
/// Selected hits may still share residues at their boundaries when overlap trimming is in
/// effect. Each shared region between neighbouring segments is split at its midpoint, the
/// left segment keeping the lower half. Inputs are the untrimmed segment lists of the
/// selected hits; the output holds their resolved segments in the same order.
///
/// A segment lying wholly inside a segment of another hit is left as is, and the enclosing
/// segment keeps its residues on both sides of it.
#[instrument(skip_all, name = "boundary_resolution_task")]
pub fn run(segment_lists: &[&[Segment]]) -> Vec<Vec<Segment>> {
    let mut resolved: Vec<Vec<Segment>> = segment_lists.iter().map(|list| list.to_vec()).collect();

    let mut order: Vec<(usize, usize)> = resolved
        .iter()
        .enumerate()
        .flat_map(|(list, segments)| (0..segments.len()).map(move |seg| (list, seg)))
        .collect();
    order.sort_by_key(|&(list, seg)| (resolved[list][seg].start(), resolved[list][seg].stop(), list));

    for pair in order.windows(2) {
        let (left_list, left_seg) = pair[0];
        let (right_list, right_seg) = pair[1];
        let left = resolved[left_list][left_seg];
        let right = resolved[right_list][right_seg];

        if left_list == right_list || left.stop() < right.start() || left.start() >= right.stop() {
            continue;
        }

        if left.stop() > right.stop() {
            trace!(%left, %right, "Segment lies inside another; keeping both.");
            continue;
        }

        let midpoint = (right.start() + (left.stop() - right.start()) / 2)
            .clamp(left.start(), right.stop() - 1);
        trace!(%left, %right, midpoint, "Splitting shared boundary.");

        resolved[left_list][left_seg] = Segment::new(left.start(), midpoint);
        resolved[right_list][right_seg] = Segment::new(midpoint + 1, right.stop());
    }

    resolved
}
