use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use hitres::core::models::segment::ResIdx;
use hitres::core::scoring::score_type::ScoreType;
use hitres::core::trim::TrimSpec;
use hitres::engine::config::{
    DuplicatePolicy, InvalidHitPolicy, OutputOrder, ResolveStrategy,
};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "hitres - Resolve overlapping domain hits into the best-scoring non-overlapping architecture.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to resolve independent components in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the hits of every query in a hit list into non-overlapping architectures.
    Resolve(ResolveArgs),
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    // --- Core Arguments ---
    /// Path to the input hit list (one `<query> <match> <score> <segments>` line per hit).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the resolved output. Written to standard output if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Input Overrides ---
    /// How the scores in the input are to be read (crh-score, bitscore, evalue).
    #[arg(long, value_name = "TYPE")]
    pub score_type: Option<ScoreType>,

    // --- Filter Overrides ---
    /// Ignore hits scoring worse than this.
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub worst_permissible_score: Option<f64>,

    /// Ignore segments shorter than this many residues.
    #[arg(long, value_name = "INT")]
    pub min_seg_length: Option<ResIdx>,

    // --- Segment Overrides ---
    /// Trim segments before overlap testing, as '<full-length>/<total-trimming>' (e.g. '50/30').
    #[arg(long, value_name = "SPEC", conflicts_with = "boundary_overlap")]
    pub overlap_trim: Option<TrimSpec>,

    /// Allow hits to share up to this many residues at their boundaries.
    #[arg(long, value_name = "INT")]
    pub boundary_overlap: Option<ResIdx>,

    // --- Resolution Overrides ---
    /// Whether hits with identical segments all compete (preserve) or only the best (prune).
    #[arg(long, value_name = "POLICY", value_parser = parser::parse_keyword::<DuplicatePolicy>)]
    pub duplicate_policy: Option<DuplicatePolicy>,

    /// How the architecture is chosen (optimal, naive-greedy).
    #[arg(long, value_name = "STRATEGY", value_parser = parser::parse_keyword::<ResolveStrategy>)]
    pub strategy: Option<ResolveStrategy>,

    /// Report at most this many hits per query.
    #[arg(long, value_name = "INT")]
    pub max_hits: Option<usize>,

    /// Stop starting new components once this many milliseconds have passed.
    #[arg(long, value_name = "MS")]
    pub time_budget_ms: Option<u64>,

    /// What to do with malformed hits (skip, reject).
    #[arg(long, value_name = "POLICY", value_parser = parser::parse_keyword::<InvalidHitPolicy>)]
    pub invalid_hits: Option<InvalidHitPolicy>,

    // --- Output Overrides ---
    /// Order of the reported hits (original, score, start).
    #[arg(long, value_name = "ORDER", value_parser = parser::parse_keyword::<OutputOrder>)]
    pub output_order: Option<OutputOrder>,

    /// Override `output.report-rejected` from the config file.
    #[command(flatten)]
    pub report_rejected: ReportRejected,

    // --- Query Selection ---
    /// Only resolve the query with this id. Can be used multiple times.
    #[arg(long = "filter-query-id", value_name = "ID")]
    pub filter_query_ids: Vec<String>,

    /// Only resolve the first N queries of the input.
    #[arg(long, value_name = "INT")]
    pub limit_queries: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S resolve.max-hits=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive flags for reporting rejected hits.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct ReportRejected {
    /// Write a comment line for every hit left out of the architecture.
    #[arg(long)]
    pub report_rejected: bool,
    /// Write selected hits only.
    #[arg(long)]
    pub no_report_rejected: bool,
}
