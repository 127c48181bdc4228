use crate::core::models::segment::ResIdx;
use crate::core::scoring::score_type::ScoreType;
use crate::core::trim::TrimSpec;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// What to do with hits whose segment lists are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep every hit; duplicates simply compete in resolution.
    #[default]
    Preserve,
    /// Keep only the best hit of each group of duplicates.
    Prune,
}

/// How the non-overlapping subset is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// Maximum total weight, found by dynamic programming.
    #[default]
    Optimal,
    /// Best-first greedy selection; fast but not optimal.
    NaiveGreedy,
}

/// Order in which selected hits are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputOrder {
    /// Registration order.
    #[default]
    Original,
    /// Best hit first.
    Score,
    /// By first residue, ties in registration order.
    Start,
}

/// What to do with a hit that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidHitPolicy {
    /// Leave the hit out and record a diagnostic.
    #[default]
    Skip,
    /// Abort resolution with an error.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterConfig {
    /// Hits scoring worse than this are left out of resolution.
    pub worst_permissible_score: Option<f64>,
    /// Segments shorter than this are ignored; `0` and `1` keep everything.
    pub min_seg_length: ResIdx,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolveConfig {
    pub score_type: ScoreType,
    pub duplicate_policy: DuplicatePolicy,
    pub overlap_trim: TrimSpec,
    pub filter: FilterConfig,
    pub max_hits: Option<usize>,
    pub strategy: ResolveStrategy,
    pub output_order: OutputOrder,
    pub invalid_hit_policy: InvalidHitPolicy,
    pub time_budget: Option<Duration>,
}

impl ResolveConfig {
    /// Checks that no two settings contradict each other and every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hits == Some(0) {
            return Err(ConfigError::InvalidValue {
                parameter: "max_hits",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.overlap_trim.total_trimming() >= self.overlap_trim.full_length() {
            return Err(ConfigError::InvalidValue {
                parameter: "overlap_trim",
                reason: format!(
                    "total trimming must be less than the full length, got {}",
                    self.overlap_trim
                ),
            });
        }
        if let Some(threshold) = self.filter.worst_permissible_score {
            if !threshold.is_finite() {
                return Err(ConfigError::InvalidValue {
                    parameter: "worst_permissible_score",
                    reason: format!("must be a finite number, got {threshold}"),
                });
            }
            if self.score_type == ScoreType::Evalue && threshold < 0.0 {
                return Err(ConfigError::InvalidValue {
                    parameter: "worst_permissible_score",
                    reason: format!("an e-value threshold cannot be negative, got {threshold}"),
                });
            }
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidValue {
                parameter: "time_budget",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ResolveConfigBuilder {
    score_type: Option<ScoreType>,
    duplicate_policy: Option<DuplicatePolicy>,
    overlap_trim: Option<TrimSpec>,
    worst_permissible_score: Option<f64>,
    min_seg_length: Option<ResIdx>,
    max_hits: Option<usize>,
    strategy: Option<ResolveStrategy>,
    output_order: Option<OutputOrder>,
    invalid_hit_policy: Option<InvalidHitPolicy>,
    time_budget: Option<Duration>,
}

impl ResolveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_type(mut self, score_type: ScoreType) -> Self {
        self.score_type = Some(score_type);
        self
    }
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }
    pub fn overlap_trim(mut self, trim: TrimSpec) -> Self {
        self.overlap_trim = Some(trim);
        self
    }
    /// Shorthand for `overlap_trim(TrimSpec::tolerance(residues))`.
    pub fn boundary_overlap(mut self, residues: ResIdx) -> Self {
        self.overlap_trim = Some(TrimSpec::tolerance(residues));
        self
    }
    pub fn worst_permissible_score(mut self, threshold: f64) -> Self {
        self.worst_permissible_score = Some(threshold);
        self
    }
    pub fn min_seg_length(mut self, length: ResIdx) -> Self {
        self.min_seg_length = Some(length);
        self
    }
    pub fn max_hits(mut self, n: usize) -> Self {
        self.max_hits = Some(n);
        self
    }
    pub fn strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn output_order(mut self, order: OutputOrder) -> Self {
        self.output_order = Some(order);
        self
    }
    pub fn invalid_hit_policy(mut self, policy: InvalidHitPolicy) -> Self {
        self.invalid_hit_policy = Some(policy);
        self
    }
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn build(self) -> Result<ResolveConfig, ConfigError> {
        let config = ResolveConfig {
            score_type: self.score_type.unwrap_or_default(),
            duplicate_policy: self.duplicate_policy.unwrap_or_default(),
            overlap_trim: self.overlap_trim.unwrap_or_default(),
            filter: FilterConfig {
                worst_permissible_score: self.worst_permissible_score,
                min_seg_length: self.min_seg_length.unwrap_or(0),
            },
            max_hits: self.max_hits,
            strategy: self.strategy.unwrap_or_default(),
            output_order: self.output_order.unwrap_or_default(),
            invalid_hit_policy: self.invalid_hit_policy.unwrap_or_default(),
            time_budget: self.time_budget,
        };
        config.validate()?;
        Ok(config)
    }
}
