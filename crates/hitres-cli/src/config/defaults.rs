use hitres::core::models::segment::ResIdx;
use hitres::core::scoring::score_type::ScoreType;
use hitres::core::trim::TrimSpec;
use hitres::engine::config::{DuplicatePolicy, InvalidHitPolicy, OutputOrder, ResolveStrategy};

pub struct DefaultsConfig {
    pub score_type: ScoreType,
    pub min_seg_length: ResIdx,
    pub overlap_trim: TrimSpec,
    pub duplicate_policy: DuplicatePolicy,
    pub strategy: ResolveStrategy,
    pub invalid_hits: InvalidHitPolicy,
    pub output_order: OutputOrder,
    pub report_rejected: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            score_type: ScoreType::CrhScore,
            min_seg_length: 0,
            overlap_trim: TrimSpec::none(),
            duplicate_policy: DuplicatePolicy::Preserve,
            strategy: ResolveStrategy::Optimal,
            invalid_hits: InvalidHitPolicy::Skip,
            output_order: OutputOrder::Original,
            report_rejected: false,
        }
    }
}
