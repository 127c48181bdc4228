use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileSegmentsConfig};
use super::models::{AppConfig, QueryFilter};
use crate::cli::{ReportRejected, ResolveArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use hitres::core::models::segment::ResIdx;
use hitres::core::scoring::score_type::ScoreType;
use hitres::core::trim::TrimSpec;
use hitres::engine::config::ResolveConfigBuilder;
use std::str::FromStr;
use std::time::Duration;

pub fn build_config(args: &ResolveArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input_file = file_config.input.take().unwrap_or_default();
    let score_type = args
        .score_type
        .or(input_file.score_type)
        .unwrap_or(defaults.score_type);

    let filter_file = file_config.filter.take().unwrap_or_default();
    let worst_permissible_score = args
        .worst_permissible_score
        .or(filter_file.worst_permissible_score);
    let min_seg_length = args
        .min_seg_length
        .or(filter_file.min_seg_length)
        .unwrap_or(defaults.min_seg_length);

    let overlap_trim = merge_overlap_trim(
        args.overlap_trim,
        args.boundary_overlap,
        file_config.segments.take().unwrap_or_default(),
        &defaults,
    )?;

    let resolve_file = file_config.resolve.take().unwrap_or_default();
    let duplicate_policy = args
        .duplicate_policy
        .or(resolve_file.duplicate_policy)
        .unwrap_or(defaults.duplicate_policy);
    let strategy = args
        .strategy
        .or(resolve_file.strategy)
        .unwrap_or(defaults.strategy);
    let invalid_hits = args
        .invalid_hits
        .or(resolve_file.invalid_hits)
        .unwrap_or(defaults.invalid_hits);
    let max_hits = match args.max_hits {
        Some(n) => Some(n),
        None => merge_max_hits(resolve_file.max_hits)?,
    };
    let time_budget_ms = args.time_budget_ms.or(resolve_file.time_budget_ms);

    let output_file = file_config.output.take().unwrap_or_default();
    let output_order = args
        .output_order
        .or(output_file.order)
        .unwrap_or(defaults.output_order);
    let report_rejected = merge_report_rejected(
        args.report_rejected,
        output_file.report_rejected,
        &defaults,
    );

    let mut builder = ResolveConfigBuilder::new()
        .score_type(score_type)
        .min_seg_length(min_seg_length)
        .overlap_trim(overlap_trim)
        .duplicate_policy(duplicate_policy)
        .strategy(strategy)
        .invalid_hit_policy(invalid_hits)
        .output_order(output_order);
    if let Some(threshold) = worst_permissible_score {
        builder = builder.worst_permissible_score(threshold);
    }
    if let Some(n) = max_hits {
        builder = builder.max_hits(n);
    }
    if let Some(ms) = time_budget_ms {
        builder = builder.time_budget(Duration::from_millis(ms));
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        report_rejected,
        query_filter: QueryFilter {
            query_ids: args.filter_query_ids.clone(),
            limit: args.limit_queries,
        },
        core_config,
    })
}

fn merge_overlap_trim(
    cli_trim: Option<TrimSpec>,
    cli_boundary_overlap: Option<ResIdx>,
    file_val: FileSegmentsConfig,
    defaults: &DefaultsConfig,
) -> Result<TrimSpec> {
    if let Some(trim) = cli_trim {
        return Ok(trim);
    }
    if let Some(residues) = cli_boundary_overlap {
        return Ok(TrimSpec::tolerance(residues));
    }
    match (file_val.overlap_trim, file_val.boundary_overlap) {
        (Some(_), Some(_)) => Err(CliError::Config(
            "`segments.overlap-trim` and `segments.boundary-overlap` cannot both be set"
                .to_string(),
        )),
        (Some(trim), None) => Ok(trim),
        (None, Some(residues)) => Ok(TrimSpec::tolerance(residues)),
        (None, None) => Ok(defaults.overlap_trim),
    }
}

fn merge_max_hits(file_val: Option<i64>) -> Result<Option<usize>> {
    file_val
        .map(|n| {
            usize::try_from(n).map_err(|_| {
                CliError::Config(format!("`resolve.max-hits` must not be negative, got {}", n))
            })
        })
        .transpose()
}

fn merge_report_rejected(
    cli_flags: ReportRejected,
    file_val: Option<bool>,
    defaults: &DefaultsConfig,
) -> bool {
    if cli_flags.report_rejected {
        true
    } else if cli_flags.no_report_rejected {
        false
    } else {
        file_val.unwrap_or(defaults.report_rejected)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid numeric value for {}: {}", key, value)))
}

fn parse_keyword<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    parser::parse_keyword(value).map_err(|e| CliError::Config(format!("{} (key {})", e, key)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "input.score-type" => {
                config.input.get_or_insert_with(Default::default).score_type =
                    Some(value_str.parse::<ScoreType>().map_err(|e| {
                        CliError::Config(format!("Invalid value for {}: {}", key, e))
                    })?);
            }
            "filter.worst-permissible-score" => {
                config
                    .filter
                    .get_or_insert_with(Default::default)
                    .worst_permissible_score = Some(parse_number(key, value_str)?);
            }
            "filter.min-seg-length" => {
                config
                    .filter
                    .get_or_insert_with(Default::default)
                    .min_seg_length = Some(parse_number(key, value_str)?);
            }
            "segments.overlap-trim" => {
                let segments = config.segments.get_or_insert_with(Default::default);
                segments.overlap_trim = Some(value_str.parse::<TrimSpec>().map_err(|e| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?);
                segments.boundary_overlap = None;
            }
            "segments.boundary-overlap" => {
                let segments = config.segments.get_or_insert_with(Default::default);
                segments.boundary_overlap = Some(parse_number(key, value_str)?);
                segments.overlap_trim = None;
            }
            "resolve.duplicate-policy" => {
                config
                    .resolve
                    .get_or_insert_with(Default::default)
                    .duplicate_policy = Some(parse_keyword(key, value_str)?);
            }
            "resolve.strategy" => {
                config.resolve.get_or_insert_with(Default::default).strategy =
                    Some(parse_keyword(key, value_str)?);
            }
            "resolve.max-hits" => {
                config.resolve.get_or_insert_with(Default::default).max_hits =
                    Some(parse_number(key, value_str)?);
            }
            "resolve.time-budget-ms" => {
                config
                    .resolve
                    .get_or_insert_with(Default::default)
                    .time_budget_ms = Some(parse_number(key, value_str)?);
            }
            "resolve.invalid-hits" => {
                config
                    .resolve
                    .get_or_insert_with(Default::default)
                    .invalid_hits = Some(parse_keyword(key, value_str)?);
            }
            "output.order" => {
                config.output.get_or_insert_with(Default::default).order =
                    Some(parse_keyword(key, value_str)?);
            }
            "output.report-rejected" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .report_rejected = Some(value_str.parse::<bool>().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitres::engine::config::{
        DuplicatePolicy, InvalidHitPolicy, OutputOrder, ResolveConfig, ResolveStrategy,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn base_resolve_args() -> ResolveArgs {
        ResolveArgs {
            input: PathBuf::from("hits.txt"),
            output: None,
            config: None,
            score_type: None,
            worst_permissible_score: None,
            min_seg_length: None,
            overlap_trim: None,
            boundary_overlap: None,
            duplicate_policy: None,
            strategy: None,
            max_hits: None,
            time_budget_ms: None,
            invalid_hits: None,
            output_order: None,
            report_rejected: ReportRejected::default(),
            filter_query_ids: vec![],
            limit_queries: None,
            set_values: vec![],
        }
    }

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hitres.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn no_file_and_no_flags_yields_library_defaults() {
        let app = build_config(&base_resolve_args()).expect("build ok");

        assert_eq!(app.core_config, ResolveConfig::default());
        assert_eq!(app.input_path, PathBuf::from("hits.txt"));
        assert!(app.output_path.is_none());
        assert!(!app.report_rejected);
        assert_eq!(app.query_filter, QueryFilter::default());
    }

    #[test]
    fn build_config_reads_file_values() {
        let (_dir, path) = write_config(
            r#"
            [input]
            score-type = "evalue"

            [filter]
            worst-permissible-score = 0.001
            min-seg-length = 12

            [segments]
            boundary-overlap = 10

            [resolve]
            duplicate-policy = "prune"
            strategy = "naive-greedy"
            max-hits = 5
            time-budget-ms = 1500

            [output]
            order = "start"
            report-rejected = true
            "#,
        );
        let mut args = base_resolve_args();
        args.config = Some(path);

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.score_type, ScoreType::Evalue);
        assert_eq!(cfg.filter.worst_permissible_score, Some(0.001));
        assert_eq!(cfg.filter.min_seg_length, 12);
        assert_eq!(cfg.overlap_trim, TrimSpec::tolerance(10));
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Prune);
        assert_eq!(cfg.strategy, ResolveStrategy::NaiveGreedy);
        assert_eq!(cfg.max_hits, Some(5));
        assert_eq!(cfg.time_budget, Some(Duration::from_millis(1500)));
        assert_eq!(cfg.output_order, OutputOrder::Start);
        assert!(app.report_rejected);
    }

    #[test]
    fn cli_overrides_file_values() {
        let (_dir, path) = write_config(
            r#"
            [segments]
            overlap-trim = "50/30"

            [resolve]
            max-hits = 5
            strategy = "naive-greedy"

            [output]
            report-rejected = true
            "#,
        );
        let mut args = base_resolve_args();
        args.config = Some(path);
        args.boundary_overlap = Some(4);
        args.max_hits = Some(2);
        args.strategy = Some(ResolveStrategy::Optimal);
        args.report_rejected = ReportRejected {
            report_rejected: false,
            no_report_rejected: true,
        };

        let app = build_config(&args).expect("build ok");

        assert_eq!(app.core_config.overlap_trim, TrimSpec::tolerance(4));
        assert_eq!(app.core_config.max_hits, Some(2));
        assert_eq!(app.core_config.strategy, ResolveStrategy::Optimal);
        assert!(!app.report_rejected);
    }

    #[test]
    fn set_values_override_the_file_but_not_flags() {
        let (_dir, path) = write_config("[resolve]\nmax-hits = 5\n[segments]\nboundary-overlap = 3\n");
        let mut args = base_resolve_args();
        args.config = Some(path);
        args.output_order = Some(OutputOrder::Score);
        args.set_values = vec![
            "resolve.max-hits=7".to_string(),
            "segments.overlap-trim=40/20".to_string(),
            "resolve.invalid-hits=reject".to_string(),
            "input.score-type=bit-score".to_string(),
            "output.order=start".to_string(),
            "output.report-rejected=true".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.max_hits, Some(7));
        assert_eq!(cfg.overlap_trim, TrimSpec::new(40, 20).unwrap());
        assert_eq!(cfg.invalid_hit_policy, InvalidHitPolicy::Reject);
        assert_eq!(cfg.score_type, ScoreType::Bitscore);
        assert_eq!(cfg.output_order, OutputOrder::Score);
        assert!(app.report_rejected);
    }

    #[test]
    fn negative_max_hits_in_file_is_a_config_error() {
        let (_dir, path) = write_config("[resolve]\nmax-hits = -1\n");
        let mut args = base_resolve_args();
        args.config = Some(path);

        let err = build_config(&args).err().expect("negative max-hits must fail");
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("max-hits")));
    }

    #[test]
    fn zero_max_hits_is_rejected_by_the_engine_config() {
        let mut args = base_resolve_args();
        args.set_values = vec!["resolve.max-hits=0".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn both_trim_keys_in_file_are_contradictory() {
        let (_dir, path) =
            write_config("[segments]\noverlap-trim = \"50/30\"\nboundary-overlap = 10\n");
        let mut args = base_resolve_args();
        args.config = Some(path);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_values_are_reported() {
        for bad in [
            "resolve.max-hits",
            "resolve.max-hits=many",
            "resolve.strategy=fastest",
            "resolve.unknown=1",
            "output.report-rejected=maybe",
        ] {
            let mut args = base_resolve_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "expected a config error for {bad}"
            );
        }
    }

    #[test]
    fn query_selection_is_carried_through() {
        let mut args = base_resolve_args();
        args.filter_query_ids = vec!["q7".to_string()];
        args.limit_queries = Some(1);

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.query_filter.query_ids, vec!["q7"]);
        assert_eq!(app.query_filter.limit, Some(1));
    }
}
