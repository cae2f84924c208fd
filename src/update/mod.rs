pub mod orchestrator;
pub mod resolver;

pub use orchestrator::ManifestUpdater;
pub use resolver::DependencyMapResolver;

use crate::version::LockMode;
use std::time::Duration;

/// Options governing one update run.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Prefer updated versions without their declared prefix.
    pub strip_prefixes: bool,
    /// Admit suffixed versions during selection.
    pub allow_pre_release: bool,
    /// Render changes instead of writing them.
    pub dry_run: bool,
    /// Discover every dependency map before resolving any of them.
    pub preload_dependencies: bool,
    /// Bypass the version-date cache for this run.
    pub no_cache: bool,
    /// Pin resolutions to the declared major/minor version.
    pub lock: Option<LockMode>,
    /// Treat per-package registry errors as fatal.
    pub warnings_as_errors: bool,
    /// Cooperative pause between dependencies, advisory pacing only.
    pub delay: Option<Duration>,
}
