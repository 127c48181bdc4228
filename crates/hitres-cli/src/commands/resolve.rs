use crate::cli::ResolveArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hitres::{
    core::io::{
        raw::RawHitsFile,
        traits::{HitsFile, OutputLine},
    },
    core::models::{collection::HitCollection, hit::Hit, ids::HitId},
    engine::{error::EngineError, progress::ProgressReporter, state::Resolution},
    workflows,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};

const INVALID_HIT_REASON: &str = "invalid-hit";

/// Totals over every resolved query, for the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: usize,
    pub selected: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub incomplete: usize,
}

pub fn run(args: ResolveArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = config::build_config(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut writer: Box<dyn Write> = match &app_config.output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = resolve_file(&app_config, &reporter, &mut writer)?;
    writer.flush()?;

    eprintln!(
        "Resolved {} quer{}: {} hit(s) selected, {} rejected, {} skipped as invalid.",
        summary.queries,
        if summary.queries == 1 { "y" } else { "ies" },
        summary.selected,
        summary.rejected,
        summary.skipped
    );
    if summary.incomplete > 0 {
        eprintln!(
            "Warning: the time budget ran out for {} quer{}; their results are partial.",
            summary.incomplete,
            if summary.incomplete == 1 { "y" } else { "ies" }
        );
    }
    if let Some(path) = &app_config.output_path {
        eprintln!("✓ Results written to: {}", path.display());
    }

    Ok(())
}

/// Reads the input hit list, resolves every selected query and writes the results.
pub fn resolve_file(
    app_config: &AppConfig,
    reporter: &ProgressReporter,
    writer: &mut impl Write,
) -> Result<RunSummary> {
    info!("Loading hits from {:?}", &app_config.input_path);
    let collections = RawHitsFile::read_from_path(
        &app_config.input_path,
        app_config.core_config.score_type,
    )
    .map_err(|e| CliError::FileParsing {
        path: app_config.input_path.clone(),
        source: e.into(),
    })?;
    let total_queries = collections.len();
    let collections = app_config.query_filter.apply(collections);
    info!(
        "Resolving {} of {} queries from the input.",
        collections.len(),
        total_queries
    );

    let mut summary = RunSummary::default();
    for collection in &collections {
        let resolution = workflows::resolve::run(collection, &app_config.core_config, reporter)?;
        if !resolution.complete {
            warn!(
                "Time budget exhausted while resolving query '{}'; the result is partial.",
                collection.query_id()
            );
            summary.incomplete += 1;
        }

        let lines = output_lines(collection, &resolution, app_config.report_rejected)?;
        RawHitsFile::write_lines(collection.query_id(), lines, &mut *writer).map_err(|e| {
            CliError::Other(anyhow::anyhow!(
                "Failed to write results for query '{}': {}",
                collection.query_id(),
                e
            ))
        })?;

        summary.queries += 1;
        summary.selected += resolution.selected.len();
        summary.rejected += resolution.rejected.len();
        summary.skipped += resolution.diagnostics.len();
    }

    Ok(summary)
}

/// Maps a resolution onto the lines written for its query: the selected hits in output
/// order, then (optionally) the rejected and skipped hits in registration order.
fn output_lines<'a>(
    collection: &'a HitCollection,
    resolution: &'a Resolution,
    report_rejected: bool,
) -> Result<Vec<OutputLine<'a>>> {
    let lookup = |id: HitId| -> Result<&'a Hit> {
        collection
            .hit(id)
            .ok_or_else(|| CliError::Engine(EngineError::UnknownHit(id)))
    };

    let mut lines = Vec::with_capacity(resolution.selected.len());
    for selected in &resolution.selected {
        lines.push(OutputLine::Selected {
            hit: lookup(selected.hit)?,
            resolved_segments: &selected.resolved_segments,
        });
    }

    if report_rejected {
        let mut dropped = Vec::with_capacity(resolution.rejected.len() + resolution.diagnostics.len());
        for rejected in &resolution.rejected {
            dropped.push((rejected.hit, rejected.reason.as_str()));
        }
        for diagnostic in &resolution.diagnostics {
            dropped.push((diagnostic.hit, INVALID_HIT_REASON));
        }
        dropped.sort_by_key(|(id, _)| collection.index_of(*id));
        for (id, reason) in dropped {
            lines.push(OutputLine::Rejected {
                hit: lookup(id)?,
                reason,
            });
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryFilter;
    use hitres::core::scoring::score_type::ScoreType;
    use hitres::engine::config::{ResolveConfig, ResolveConfigBuilder};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const INPUT: &str = "\
q1 a 10 1-100
q1 b 6 50-150
q1 c 7 120-200
q2 x 3 1-40
q2 y 4 30-60
q3 bad 5 90-10
";

    fn app_config(input_path: PathBuf, core_config: ResolveConfig) -> AppConfig {
        AppConfig {
            input_path,
            output_path: None,
            report_rejected: false,
            query_filter: QueryFilter::default(),
            core_config,
        }
    }

    fn run_on(app_config: &AppConfig) -> (RunSummary, String) {
        let reporter = ProgressReporter::new();
        let mut out = Vec::new();
        let summary = resolve_file(app_config, &reporter, &mut out).expect("resolve ok");
        (summary, String::from_utf8(out).unwrap())
    }

    fn write_input() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hits.txt");
        fs::write(&path, INPUT).unwrap();
        (dir, path)
    }

    #[test]
    fn resolves_every_query_in_input_order() {
        let (_dir, path) = write_input();
        let (summary, output) = run_on(&app_config(path, ResolveConfig::default()));

        assert_eq!(
            output,
            "q1 a 10 1-100 1-100\nq1 c 7 120-200 120-200\nq2 y 4 30-60 30-60\n"
        );
        assert_eq!(
            summary,
            RunSummary {
                queries: 3,
                selected: 3,
                rejected: 2,
                skipped: 1,
                incomplete: 0,
            }
        );
    }

    #[test]
    fn rejected_hits_are_written_as_comments() {
        let (_dir, path) = write_input();
        let mut config = app_config(path, ResolveConfig::default());
        config.report_rejected = true;
        config.query_filter = QueryFilter {
            query_ids: vec!["q1".to_string(), "q3".to_string()],
            limit: None,
        };

        let (summary, output) = run_on(&config);

        assert_eq!(
            output,
            "q1 a 10 1-100 1-100\n\
             q1 c 7 120-200 120-200\n\
             # rejected q1 b overlap-loss\n\
             # rejected q3 bad invalid-hit\n"
        );
        assert_eq!(summary.queries, 2);
    }

    #[test]
    fn boundary_overlap_reports_split_boundaries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hits.txt");
        fs::write(&path, "q m1 8 1-54\nq m2 9 50-100\n").unwrap();
        let core_config = ResolveConfigBuilder::new()
            .boundary_overlap(10)
            .build()
            .unwrap();

        let (_, output) = run_on(&app_config(path, core_config));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("q m1 8 1-54 1-"));
        assert!(lines[1].starts_with("q m2 9 50-100 "));
        assert!(!lines[0].ends_with("1-54"));
    }

    #[test]
    fn limit_queries_stops_after_the_first_queries() {
        let (_dir, path) = write_input();
        let mut config = app_config(
            path,
            ResolveConfigBuilder::new()
                .score_type(ScoreType::Bitscore)
                .build()
                .unwrap(),
        );
        config.query_filter.limit = Some(1);

        let (summary, output) = run_on(&config);
        assert_eq!(summary.queries, 1);
        assert!(output.lines().all(|line| line.starts_with("q1 ")));
    }

    #[test]
    fn unreadable_input_names_the_file() {
        let config = app_config(
            PathBuf::from("/nonexistent/hits.txt"),
            ResolveConfig::default(),
        );
        let reporter = ProgressReporter::new();
        let err = resolve_file(&config, &reporter, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }
}
