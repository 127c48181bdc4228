use hitres::core::models::collection::HitCollection;
use hitres::engine::config::ResolveConfig;
use std::collections::HashSet;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub report_rejected: bool,
    pub query_filter: QueryFilter,
    pub core_config: ResolveConfig,
}

/// Which queries of the input are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Only these query ids, when non-empty.
    pub query_ids: Vec<String>,
    /// At most this many queries, counted after the id filter.
    pub limit: Option<usize>,
}

impl QueryFilter {
    pub fn apply(&self, collections: Vec<HitCollection>) -> Vec<HitCollection> {
        let wanted: HashSet<&str> = self.query_ids.iter().map(String::as_str).collect();
        collections
            .into_iter()
            .filter(|c| wanted.is_empty() || wanted.contains(c.query_id()))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
