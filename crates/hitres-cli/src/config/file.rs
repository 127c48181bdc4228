use crate::error::{CliError, Result};
use hitres::core::models::segment::ResIdx;
use hitres::core::scoring::score_type::ScoreType;
use hitres::core::trim::TrimSpec;
use hitres::engine::config::{DuplicatePolicy, InvalidHitPolicy, OutputOrder, ResolveStrategy};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileInputConfig {
    #[serde(rename = "score-type")]
    pub score_type: Option<ScoreType>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileFilterConfig {
    #[serde(rename = "worst-permissible-score")]
    pub worst_permissible_score: Option<f64>,
    #[serde(rename = "min-seg-length")]
    pub min_seg_length: Option<ResIdx>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSegmentsConfig {
    #[serde(rename = "overlap-trim")]
    pub overlap_trim: Option<TrimSpec>,
    #[serde(rename = "boundary-overlap")]
    pub boundary_overlap: Option<ResIdx>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileResolveConfig {
    #[serde(rename = "duplicate-policy")]
    pub duplicate_policy: Option<DuplicatePolicy>,
    pub strategy: Option<ResolveStrategy>,
    /// Signed; negative values are rejected when the config is built.
    #[serde(rename = "max-hits")]
    pub max_hits: Option<i64>,
    #[serde(rename = "time-budget-ms")]
    pub time_budget_ms: Option<u64>,
    #[serde(rename = "invalid-hits")]
    pub invalid_hits: Option<InvalidHitPolicy>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub order: Option<OutputOrder>,
    #[serde(rename = "report-rejected")]
    pub report_rejected: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<FileInputConfig>,
    pub filter: Option<FileFilterConfig>,
    pub segments: Option<FileSegmentsConfig>,
    pub resolve: Option<FileResolveConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
