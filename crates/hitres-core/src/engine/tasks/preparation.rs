use crate::core::models::ids::HitId;
use crate::core::models::segment::Segment;
use crate::engine::calc_hit::CalcHit;
use crate::engine::context::ResolveContext;
use crate::engine::error::EngineError;
use crate::engine::state::{RejectedHit, RejectionReason};
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

#[derive(Debug, Default)]
pub struct PreparedHits {
    /// Hits that take part in resolution, in registration order.
    pub hits: Vec<CalcHit>,
    pub rejected: Vec<RejectedHit>,
}

/// Applies the score filter and minimum segment length, trims the remaining segments for
/// overlap testing and computes each hit's weight.
#[instrument(skip_all, name = "preparation_task")]
pub fn run(context: &ResolveContext, valid: &[HitId]) -> Result<PreparedHits, EngineError> {
    let config = context.config;
    let score_type = config.score_type;
    let min_seg_length = u64::from(config.filter.min_seg_length);
    let mut prepared = PreparedHits::default();
    let mut too_short = 0usize;

    for &id in valid {
        let hit = context.hit(id)?;

        if let Some(threshold) = config.filter.worst_permissible_score {
            if score_type.compare(hit.score, threshold) == Ordering::Greater {
                prepared.rejected.push(RejectedHit {
                    hit: id,
                    reason: RejectionReason::ScoreFiltered,
                });
                continue;
            }
        }

        let segments: Vec<Segment> = hit
            .segments
            .iter()
            .filter(|segment| segment.len() >= min_seg_length)
            .map(|segment| config.overlap_trim.trim(segment))
            .collect();

        match CalcHit::new(id, context.rank(id)?, hit.weight(), segments) {
            Some(calc_hit) => prepared.hits.push(calc_hit),
            None => {
                too_short += 1;
                prepared.rejected.push(RejectedHit {
                    hit: id,
                    reason: RejectionReason::SegmentsTooShort,
                });
            }
        }
    }

    if too_short > 0 {
        warn!(
            count = too_short,
            min_seg_length = config.filter.min_seg_length,
            "Some hits have no segment of the minimum length and were left out."
        );
    }
    debug!(
        kept = prepared.hits.len(),
        rejected = prepared.rejected.len(),
        "Prepared hits for resolution."
    );

    Ok(prepared)
}
