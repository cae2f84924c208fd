use crate::error::{BackdaterError, Result};
use crate::events::{Listener, common};
use crate::manifest::{DependencyMap, DependencyType};
use crate::registry::{RegistryError, VersionDateMap};
use crate::version::{SUPPORTED_PREFIXES, VersionAction};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Timestamp;
use serde_json::Value;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::Path;

/// Logging listener for terminal runs. Maintains a per-map progress bar when
/// not interactive; interactive runs log plain lines and prompt on stdin.
pub struct ConsoleListener {
    interactive: bool,
    cutoff: Option<Timestamp>,
    progress: Option<ProgressBar>,
    /// Package counts of discovered non-empty maps awaiting resolution.
    pending_maps: VecDeque<u64>,
}

impl ConsoleListener {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            cutoff: None,
            progress: None,
            pending_maps: VecDeque::new(),
        }
    }

    /// Routes through the progress bar when one is active so log lines do not
    /// tear it.
    fn log(&self, message: &str) {
        match &self.progress {
            Some(progress) => progress.println(message),
            None => println!("{message}"),
        }
    }

    fn start_progress_bar(&mut self, count: u64) {
        let progress = ProgressBar::new(count);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:40}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        self.progress = Some(progress);
    }

    fn prompt_action(&self, package_name: &str, actions: &[VersionAction]) -> Result<String> {
        println!("\n{}", format!("Choose action for {package_name}:").cyan().bold());
        for (index, (label, version)) in actions.iter().enumerate() {
            println!("  {:>2}) {} {}", index + 1, label, version.green());
        }

        loop {
            print!("Select action [1-{}] (or 'q' to cancel): ", actions.len());
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let trimmed = input.trim();

            if trimmed.eq_ignore_ascii_case("q") {
                return Err(BackdaterError::UserCancelled);
            }

            if let Ok(choice) = trimmed.parse::<usize>() {
                if (1..=actions.len()).contains(&choice) {
                    return Ok(actions[choice - 1].1.clone());
                }
            }

            println!("{}", "Invalid selection. Please try again.".red());
        }
    }
}

impl Listener for ConsoleListener {
    fn handle_missing_arguments(&mut self) {
        eprintln!(
            "Usage: backdater <package.json location> [datetime] [flags]

package.json location: The manifest file to update
datetime: The point in time to resolve versions against (e.g. 2022-01-15T00:00:00Z); defaults to now

--silent: Suppress logging
--strip-prefixes: Prefer updated versions without their ({}) prefix
--interactive: Prompt before updating each dependency
--allow-pre-release: Allow suffixed versions (e.g. 1.0.0.beta1) to be selected
--dry-run: Render the changes as a diff instead of writing them
--preload-dependencies: Discover every dependency map before resolving any
--no-cache: Ignore the version-date cache for this run
--lock-major | --lock-minor: Pin resolutions to the declared major/minor version
--warnings-as-errors: Treat per-package registry errors as fatal
--delay <ms>: Pause between dependencies",
            SUPPORTED_PREFIXES.join(", ")
        );
    }

    fn handle_invalid_datetime(&mut self, raw: &str) {
        eprintln!(
            "{}",
            format!("Expected a valid datetime (e.g. 2022-01-15T00:00:00Z) but received \"{raw}\"")
                .red()
        );
    }

    fn handle_datetime_in_future(&mut self, datetime: Timestamp) -> Timestamp {
        println!(
            "{}",
            format!(
                "Warning: the provided datetime ({datetime}) is in the future. Using the current datetime instead."
            )
            .yellow()
        );
        Timestamp::now()
    }

    fn handle_run_start(&mut self, manifest_path: &Path, cutoff: Timestamp) {
        self.cutoff = Some(cutoff);
        println!(
            "{}",
            format!(
                "Updating dependency versions in {} to the highest releases available as of {cutoff}...",
                manifest_path.display()
            )
            .cyan()
            .bold()
        );
    }

    fn handle_run_finish(&mut self) {
        println!("\n{}", "Update process completed.".green().bold());
    }

    fn handle_reading_manifest_start(&mut self, manifest_path: &Path) {
        println!("Reading {}...", manifest_path.display());
    }

    fn handle_reading_manifest_finish(&mut self, content: &str) {
        println!("{} bytes read.", content.len());
    }

    fn handle_discovering_dependency_map_start(&mut self, kind: DependencyType) {
        println!("\n{}", format!("Discovering {kind}...").yellow());
    }

    fn handle_discovering_dependency_map_finish(
        &mut self,
        kind: DependencyType,
        map: Option<&DependencyMap>,
    ) {
        match map {
            None => println!("No {kind} found."),
            Some(map) => {
                let word = if map.len() == 1 {
                    "dependency"
                } else {
                    "dependencies"
                };
                println!("{} {kind} {word} found.", map.len());
                if !self.interactive && !map.is_empty() {
                    self.pending_maps.push_back(map.len() as u64);
                }
            }
        }
    }

    fn handle_getting_version_dates_start(&mut self, package_name: &str) {
        if self.progress.is_none() {
            if let Some(count) = self.pending_maps.pop_front() {
                self.start_progress_bar(count);
            }
        }

        match &self.progress {
            Some(progress) => progress.set_message(format!("Checking {package_name}")),
            None => println!("Getting version dates for {package_name}..."),
        }
    }

    fn handle_registry_error(&mut self, package_name: &str, error: &RegistryError) {
        let message = if error.is_not_found() {
            format!("Skipping {package_name}: not found in the registry.")
        } else {
            format!("Skipping {package_name}: {error}.")
        };
        self.log(&message.yellow().to_string());
    }

    fn handle_getting_version_dates_finish(
        &mut self,
        package_name: &str,
        cache_date: Timestamp,
        versions: &VersionDateMap,
    ) {
        if self.progress.is_some() {
            return;
        }

        let cached = match self.cutoff {
            Some(cutoff) if cache_date != cutoff => format!(" (cache from {cache_date})"),
            _ => String::new(),
        };
        let word = if versions.len() == 1 { "version" } else { "versions" };
        println!(
            "Found {} {word} for {package_name}{cached}.",
            versions.len()
        );
    }

    fn handle_calculated_highest_version(
        &mut self,
        package_name: &str,
        current_version: &str,
        highest_version: Option<&str>,
    ) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
            return;
        }

        match highest_version {
            None => println!("No releases of {package_name} available before the cutoff."),
            Some(highest) if highest == current_version => {
                println!("{package_name} is already {highest}.");
            }
            Some(highest) => {
                println!("Highest release of {package_name} available is {highest}.");
            }
        }
    }

    fn handle_prompt_version_action(
        &mut self,
        package_name: &str,
        actions: &[VersionAction],
    ) -> Result<String> {
        if !self.interactive {
            return Ok(actions[1].1.clone());
        }

        self.prompt_action(package_name, actions)
    }

    fn handle_dependency_processed(&mut self, package_name: &str, old: &str, new: &str) {
        if old != new {
            self.log(&format!(
                "Updated {package_name} from {} to {}.",
                old.red(),
                new.green()
            ));
        } else {
            self.log(&format!("Left {package_name} as {old}.").dimmed().to_string());
        }
    }

    fn handle_dependency_map_processed(&mut self, kind: DependencyType, updates: &DependencyMap) {
        if let Some(progress) = self.progress.take() {
            progress.finish_and_clear();
        }

        if updates.is_empty() {
            println!("No changes made to {kind}.");
        } else {
            let word = if updates.len() == 1 { "entry" } else { "entries" };
            println!(
                "{}",
                format!("Updated {} {kind} {word}.", updates.len()).green()
            );
        }
    }

    fn handle_changes_made(&mut self, changes_made: bool) {
        if !changes_made {
            println!("\n{}", "No changes made.".yellow());
        }
    }

    fn handle_make_changes(
        &mut self,
        manifest_path: &Path,
        old: &Value,
        new: &Value,
        dry_run: bool,
    ) -> Result<()> {
        println!();
        common::apply_manifest_changes(manifest_path, old, new, dry_run, true)
    }
}
