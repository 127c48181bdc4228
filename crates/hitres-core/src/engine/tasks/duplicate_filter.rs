use crate::core::models::segment::Segment;
use crate::engine::calc_hit::CalcHit;
use crate::engine::config::DuplicatePolicy;
use crate::engine::context::ResolveContext;
use crate::engine::error::EngineError;
use crate::engine::state::{RejectedHit, RejectionReason};
use itertools::Itertools;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
pub struct DuplicateFilterOutcome {
    /// Surviving hits, in their original relative order.
    pub hits: Vec<CalcHit>,
    pub pruned: Vec<RejectedHit>,
}

/// Applies the configured duplicate policy.
///
/// Two hits are duplicates when their untrimmed segment lists are identical. Under
/// [`DuplicatePolicy::Prune`] only the best hit of each duplicate group survives.
#[instrument(skip_all, name = "duplicate_filter_task")]
pub fn run(
    context: &ResolveContext,
    hits: Vec<CalcHit>,
) -> Result<DuplicateFilterOutcome, EngineError> {
    if context.config.duplicate_policy == DuplicatePolicy::Preserve {
        return Ok(DuplicateFilterOutcome {
            hits,
            pruned: Vec::new(),
        });
    }

    let raw_segments: Vec<&[Segment]> = hits
        .iter()
        .map(|h| context.hit(h.id).map(|hit| hit.segments.as_slice()))
        .collect::<Result<_, _>>()?;

    let comparator = context.comparator;
    let groups = (0..hits.len())
        .sorted_by(|&a, &b| {
            raw_segments[a]
                .cmp(raw_segments[b])
                .then_with(|| comparator.compare(&hits[a].rank, &hits[b].rank))
        })
        .chunk_by(|&i| raw_segments[i]);

    let mut keep = vec![true; hits.len()];
    for (_, group) in &groups {
        for duplicate in group.skip(1) {
            keep[duplicate] = false;
        }
    }

    let mut outcome = DuplicateFilterOutcome::default();
    for (hit, kept) in hits.into_iter().zip(keep) {
        if kept {
            outcome.hits.push(hit);
        } else {
            outcome.pruned.push(RejectedHit {
                hit: hit.id,
                reason: RejectionReason::DuplicatePruned,
            });
        }
    }

    debug!(pruned = outcome.pruned.len(), "Pruned duplicate hits.");
    Ok(outcome)
}
