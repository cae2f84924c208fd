use crate::error::{BackdaterError, Result};
use crate::registry::{RegistryClient, RegistryError, VersionDateMap};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Error code the registry reports for a missing package.
const NOT_FOUND: &str = "Not found";

/// npm registry client
pub struct NpmRegistry {
    client: Client,
    base_url: String,
}

impl NpmRegistry {
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("backdater/0.1.0")
            .build()
            .map_err(BackdaterError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Scoped package names keep their `@` but URL-encode the separator,
    /// e.g. `@types/node` → `@types%2Fnode`.
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

/// The registry answers with the package document or a structured error body.
/// Classification is by body, not HTTP status.
#[derive(Debug, Deserialize)]
struct PackageDocument {
    time: Option<VersionDateMap>,
    error: Option<String>,
}

impl RegistryClient for NpmRegistry {
    fn fetch_version_dates(&self, package_name: &str) -> Result<VersionDateMap> {
        let url = format!(
            "{}/{}",
            self.base_url,
            Self::encode_package_name(package_name)
        );

        if std::env::var("BACKDATER_VERBOSE").is_ok() {
            eprintln!("[VERBOSE] Fetching: {}", url);
        }

        let response = self.client.get(&url).send()?;
        let document: PackageDocument = response.json()?;

        if let Some(message) = document.error {
            if message.eq_ignore_ascii_case(NOT_FOUND) {
                return Err(RegistryError::NotFound(package_name.to_string()).into());
            }
            return Err(RegistryError::Unknown {
                package: package_name.to_string(),
                message,
            }
            .into());
        }

        document.time.ok_or_else(|| {
            RegistryError::Unknown {
                package: package_name.to_string(),
                message: "response is missing the 'time' field".to_string(),
            }
            .into()
        })
    }
}

/// Validate a user-supplied registry base URL.
pub fn validate_registry_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|_| BackdaterError::Usage(format!("Invalid registry URL: {url}")))?;

    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(BackdaterError::Usage(format!(
            "Unsupported registry scheme: {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn fetches_the_time_map() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/left-pad")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "left-pad",
                    "time": {
                        "created": "2021-12-01T00:00:00Z",
                        "1.0.0": "2022-01-01T00:00:00Z",
                        "2.0.0": "2022-02-01T00:00:00Z"
                    }
                }"#,
            )
            .create();

        let registry = NpmRegistry::with_base_url(&server.url()).unwrap();
        let versions = registry.fetch_version_dates("left-pad").unwrap();

        mock.assert();
        assert_eq!(versions.len(), 3);
        assert_eq!(
            versions.get("1.0.0"),
            Some(&"2022-01-01T00:00:00Z".to_string())
        );
    }

    #[test]
    fn classifies_the_not_found_error_body() {
        let mut server = Server::new();
        server
            .mock("GET", "/missing-package")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Not found"}"#)
            .create();

        let registry = NpmRegistry::with_base_url(&server.url()).unwrap();
        let error = registry.fetch_version_dates("missing-package").unwrap_err();

        match error {
            BackdaterError::Registry(registry_error) => {
                assert!(registry_error.is_not_found());
            }
            other => panic!("expected a registry error, got {other:?}"),
        }
    }

    #[test]
    fn classifies_other_error_bodies_as_unknown() {
        let mut server = Server::new();
        server
            .mock("GET", "/broken-package")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "internal server error"}"#)
            .create();

        let registry = NpmRegistry::with_base_url(&server.url()).unwrap();
        let error = registry.fetch_version_dates("broken-package").unwrap_err();

        match error {
            BackdaterError::Registry(registry_error) => {
                assert!(!registry_error.is_not_found());
            }
            other => panic!("expected a registry error, got {other:?}"),
        }
    }

    #[test]
    fn encodes_scoped_package_names() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/@types%2Fnode")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"time": {"18.0.0": "2022-04-19T00:00:00Z"}}"#)
            .create();

        let registry = NpmRegistry::with_base_url(&server.url()).unwrap();
        let versions = registry.fetch_version_dates("@types/node").unwrap();

        mock.assert();
        assert_eq!(versions.len(), 1);
    }

    #[test]
    fn accepts_https_registry_url() {
        assert!(validate_registry_url("https://registry.npmjs.org").is_ok());
    }

    #[test]
    fn rejects_invalid_scheme() {
        let error = validate_registry_url("ftp://example.com").unwrap_err();
        assert!(matches!(error, BackdaterError::Usage(_)));
    }
}
