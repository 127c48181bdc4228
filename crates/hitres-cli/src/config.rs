//! Resolution settings assembled from defaults, a TOML file, `--set` overrides and flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::{AppConfig, QueryFilter};
