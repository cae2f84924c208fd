use crate::error::Result;
use crate::manifest::{DependencyMap, DependencyType};
use crate::registry::{RegistryError, VersionDateMap};
use crate::version::VersionAction;
use jiff::Timestamp;
use serde_json::Value;
use std::path::Path;

pub mod common;
pub mod console;
pub mod silent;

pub use console::ConsoleListener;
pub use silent::SilentListener;

/// Notification boundary between the update engine and its presentation.
///
/// The engine calls these hooks in a fixed order: run start, manifest read,
/// then per dependency map discovery followed by per-package resolution.
/// Purely informational hooks default to no-ops so an adapter only implements
/// what it renders; the three hooks that feed back into control flow have no
/// default.
pub trait Listener {
    fn handle_missing_arguments(&mut self) {}

    fn handle_invalid_datetime(&mut self, _raw: &str) {}

    /// The requested cutoff lies in the future; returns the corrected cutoff
    /// to use for the rest of the run.
    fn handle_datetime_in_future(&mut self, datetime: Timestamp) -> Timestamp;

    fn handle_run_start(&mut self, _manifest_path: &Path, _cutoff: Timestamp) {}

    fn handle_run_finish(&mut self) {}

    fn handle_reading_manifest_start(&mut self, _manifest_path: &Path) {}

    fn handle_reading_manifest_finish(&mut self, _content: &str) {}

    fn handle_discovering_dependency_map_start(&mut self, _kind: DependencyType) {}

    fn handle_discovering_dependency_map_finish(
        &mut self,
        _kind: DependencyType,
        _map: Option<&DependencyMap>,
    ) {
    }

    fn handle_getting_version_dates_start(&mut self, _package_name: &str) {}

    /// A classified registry error; the package is being skipped.
    fn handle_registry_error(&mut self, _package_name: &str, _error: &RegistryError) {}

    fn handle_getting_version_dates_finish(
        &mut self,
        _package_name: &str,
        _cache_date: Timestamp,
        _versions: &VersionDateMap,
    ) {
    }

    fn handle_calculated_highest_version(
        &mut self,
        _package_name: &str,
        _current_version: &str,
        _highest_version: Option<&str>,
    ) {
    }

    /// Picks one of the offered actions and returns its raw version string.
    /// Non-interactive adapters default to the first mutative action.
    fn handle_prompt_version_action(
        &mut self,
        package_name: &str,
        actions: &[VersionAction],
    ) -> Result<String>;

    fn handle_dependency_processed(&mut self, _package_name: &str, _old: &str, _new: &str) {}

    fn handle_dependency_map_processed(&mut self, _kind: DependencyType, _updates: &DependencyMap) {
    }

    fn handle_changes_made(&mut self, _changes_made: bool) {}

    /// Applies the computed change: renders a diff on a dry run, otherwise
    /// serializes the new manifest over the old file.
    fn handle_make_changes(
        &mut self,
        manifest_path: &Path,
        old: &Value,
        new: &Value,
        dry_run: bool,
    ) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Test double that records every notification in call order.
    pub struct RecordingListener {
        pub events: Vec<String>,
        /// Fixed answer for prompts; `None` picks the first mutative action.
        pub prompt_answer: Option<String>,
        /// When set, `handle_make_changes` performs the real write/dry-run.
        pub apply_changes: bool,
    }

    impl RecordingListener {
        pub fn new() -> Self {
            Self {
                events: Vec::new(),
                prompt_answer: None,
                apply_changes: false,
            }
        }

        pub fn applying() -> Self {
            Self {
                apply_changes: true,
                ..Self::new()
            }
        }
    }

    impl Listener for RecordingListener {
        fn handle_datetime_in_future(&mut self, datetime: Timestamp) -> Timestamp {
            self.events.push("datetime_in_future".to_string());
            datetime
        }

        fn handle_run_start(&mut self, _manifest_path: &Path, _cutoff: Timestamp) {
            self.events.push("run_start".to_string());
        }

        fn handle_run_finish(&mut self) {
            self.events.push("run_finish".to_string());
        }

        fn handle_reading_manifest_start(&mut self, _manifest_path: &Path) {
            self.events.push("reading_manifest_start".to_string());
        }

        fn handle_reading_manifest_finish(&mut self, content: &str) {
            self.events
                .push(format!("reading_manifest_finish:{}", content.len()));
        }

        fn handle_discovering_dependency_map_start(&mut self, kind: DependencyType) {
            self.events.push(format!("discovering_start:{kind}"));
        }

        fn handle_discovering_dependency_map_finish(
            &mut self,
            kind: DependencyType,
            map: Option<&DependencyMap>,
        ) {
            let count = map.map_or("absent".to_string(), |map| map.len().to_string());
            self.events.push(format!("discovering_finish:{kind}:{count}"));
        }

        fn handle_getting_version_dates_start(&mut self, package_name: &str) {
            self.events.push(format!("getting_versions_start:{package_name}"));
        }

        fn handle_registry_error(&mut self, package_name: &str, error: &RegistryError) {
            self.events.push(format!(
                "registry_error:{package_name}:{}",
                if error.is_not_found() { "not_found" } else { "unknown" }
            ));
        }

        fn handle_getting_version_dates_finish(
            &mut self,
            package_name: &str,
            cache_date: Timestamp,
            versions: &VersionDateMap,
        ) {
            self.events.push(format!(
                "getting_versions_finish:{package_name}:{cache_date}:{}",
                versions.len()
            ));
        }

        fn handle_calculated_highest_version(
            &mut self,
            package_name: &str,
            current_version: &str,
            highest_version: Option<&str>,
        ) {
            self.events.push(format!(
                "calculated_highest:{package_name}:{current_version}:{}",
                highest_version.unwrap_or("none")
            ));
        }

        fn handle_prompt_version_action(
            &mut self,
            package_name: &str,
            actions: &[VersionAction],
        ) -> Result<String> {
            self.events.push(format!("prompt:{package_name}"));
            match &self.prompt_answer {
                Some(answer) => Ok(answer.clone()),
                None => Ok(actions[1].1.clone()),
            }
        }

        fn handle_dependency_processed(&mut self, package_name: &str, old: &str, new: &str) {
            self.events
                .push(format!("dependency_processed:{package_name}:{old}:{new}"));
        }

        fn handle_dependency_map_processed(
            &mut self,
            kind: DependencyType,
            updates: &DependencyMap,
        ) {
            self.events
                .push(format!("map_processed:{kind}:{}", updates.len()));
        }

        fn handle_changes_made(&mut self, changes_made: bool) {
            self.events.push(format!("changes_made:{changes_made}"));
        }

        fn handle_make_changes(
            &mut self,
            manifest_path: &Path,
            old: &Value,
            new: &Value,
            dry_run: bool,
        ) -> Result<()> {
            self.events.push(format!("make_changes:{dry_run}"));
            if self.apply_changes {
                common::apply_manifest_changes(manifest_path, old, new, dry_run, false)?;
            }
            Ok(())
        }
    }
}
