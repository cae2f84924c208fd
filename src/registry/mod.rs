use crate::error::Result;
use indexmap::IndexMap;
use thiserror::Error;

pub mod npm;
pub use npm::NpmRegistry;

/// Version string → ISO-8601 release datetime, exactly as returned by the
/// registry. Keys are not guaranteed to be valid versions; they are filtered
/// at selection time.
pub type VersionDateMap = IndexMap<String, String>;

/// Structured error payload reported by the registry itself. Transport
/// failures are not classified here; they propagate as HTTP errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Package '{0}' not found in the registry")]
    NotFound(String),

    #[error("Registry error for '{package}': {message}")]
    Unknown { package: String, message: String },
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}

pub trait RegistryClient: Send + Sync {
    /// Fetch the full version → release-date map for a package.
    fn fetch_version_dates(&self, package_name: &str) -> Result<VersionDateMap>;
}
