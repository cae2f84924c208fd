use crate::error::Result;
use crate::events::{Listener, common};
use crate::version::VersionAction;
use jiff::Timestamp;
use serde_json::Value;
use std::path::Path;

/// No-op adapter: every notification is swallowed, but the run still behaves
/// the same — future cutoffs are clamped, prompts resolve to the first
/// mutative action, and changes are written (silently) unless dry-running.
pub struct SilentListener;

impl Listener for SilentListener {
    fn handle_datetime_in_future(&mut self, _datetime: Timestamp) -> Timestamp {
        Timestamp::now()
    }

    fn handle_prompt_version_action(
        &mut self,
        _package_name: &str,
        actions: &[VersionAction],
    ) -> Result<String> {
        Ok(actions[1].1.clone())
    }

    fn handle_make_changes(
        &mut self,
        manifest_path: &Path,
        old: &Value,
        new: &Value,
        dry_run: bool,
    ) -> Result<()> {
        common::apply_manifest_changes(manifest_path, old, new, dry_run, false)
    }
}
