use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "backdater",
    about = "Rewind package.json dependencies to the highest versions available at a point in time",
    version
)]
pub struct Cli {
    /// Path to the package.json file to update
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Cutoff datetime (e.g. 2022-01-15 or 2022-01-15T00:00:00Z); defaults to now
    #[arg(value_name = "DATETIME")]
    pub datetime: Option<String>,

    /// Suppress all logging
    #[arg(long)]
    pub silent: bool,

    /// Prefer updated versions without their declared prefix
    #[arg(long)]
    pub strip_prefixes: bool,

    /// Prompt before updating each dependency
    #[arg(short, long)]
    pub interactive: bool,

    /// Allow suffixed versions (e.g. 1.0.0.beta1) to be selected
    #[arg(long)]
    pub allow_pre_release: bool,

    /// Render the changes as a diff instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Discover every dependency map before resolving any of them
    #[arg(long)]
    pub preload_dependencies: bool,

    /// Ignore the version-date cache for this run
    #[arg(long)]
    pub no_cache: bool,

    /// Only consider versions sharing the declared major component
    #[arg(long, conflicts_with = "lock_minor")]
    pub lock_major: bool,

    /// Only consider versions sharing the declared major and minor components
    #[arg(long)]
    pub lock_minor: bool,

    /// Treat per-package registry errors as fatal
    #[arg(long)]
    pub warnings_as_errors: bool,

    /// Pause between dependencies, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Registry base URL
    #[arg(long, value_name = "URL", default_value = crate::registry::npm::DEFAULT_REGISTRY)]
    pub registry: String,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
