use crate::error::Result;
use crate::manifest::{self, DEPENDENCY_TYPES};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Shared make-changes behavior for listener implementations: a dry run
/// renders the dependency diff, a live run serializes the new manifest with
/// 2-space indentation over the old file.
pub fn apply_manifest_changes(
    manifest_path: &Path,
    old: &Value,
    new: &Value,
    dry_run: bool,
    logging: bool,
) -> Result<()> {
    if dry_run {
        render_diff(old, new);
        return Ok(());
    }

    if logging {
        println!("Writing changes to {}...", manifest_path.display());
    }
    fs::write(manifest_path, serde_json::to_string_pretty(new)?)?;
    if logging {
        println!("Changes written to {}.", manifest_path.display());
    }

    Ok(())
}

/// Renders changed entries across the four dependency sections, old in red
/// and new in green.
pub fn render_diff(old: &Value, new: &Value) {
    println!("{}", "--- Old Version(s)".red());
    println!("{}", "+++ New Version(s)".green());

    for kind in DEPENDENCY_TYPES {
        let old_map = manifest::discover_dependency_map(old, kind).unwrap_or_default();
        let new_map = manifest::discover_dependency_map(new, kind).unwrap_or_default();

        let changed: Vec<_> = old_map
            .iter()
            .filter_map(|(name, old_version)| {
                let new_version = new_map.get(name)?;
                (old_version != new_version).then_some((name, old_version, new_version))
            })
            .collect();

        if changed.is_empty() {
            continue;
        }

        println!("\n{}", format!("{kind}:").cyan().bold());
        for (name, old_version, new_version) in changed {
            println!("{}", format!("  - {name}: {old_version}").red());
            println!("{}", format!("  + {name}: {new_version}").green());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn dry_run_does_not_touch_the_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "original").unwrap();

        let old = json!({ "dependencies": { "a": "1.0.0" } });
        let new = json!({ "dependencies": { "a": "2.0.0" } });
        apply_manifest_changes(&path, &old, &new, true, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn live_run_writes_two_space_indented_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{}").unwrap();

        let old = json!({ "dependencies": { "a": "1.0.0" } });
        let new = json!({ "dependencies": { "a": "2.0.0" } });
        apply_manifest_changes(&path, &old, &new, false, false).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, serde_json::to_string_pretty(&new).unwrap());
        assert!(written.contains("  \"dependencies\""));
    }
}
