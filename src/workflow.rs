use crate::cache::VersionDateCache;
use crate::cli::Cli;
use crate::error::{BackdaterError, Result};
use crate::events::{ConsoleListener, Listener, SilentListener};
use crate::registry::{NpmRegistry, RegistryClient, npm};
use crate::update::{ManifestUpdater, UpdateOptions};
use crate::version::LockMode;
use colored::Colorize;
use jiff::{Timestamp, civil};
use std::sync::Arc;
use std::time::Duration;

/// Execute the update workflow
pub fn execute_update(cli: Cli) -> Result<()> {
    let mut listener: Box<dyn Listener> = if cli.silent {
        Box::new(SilentListener)
    } else {
        Box::new(ConsoleListener::new(cli.interactive))
    };

    if cli.manifest.as_os_str().is_empty() {
        listener.handle_missing_arguments();
        return Ok(());
    }

    let cutoff = match cli.datetime.as_deref() {
        None => Timestamp::now(),
        Some(raw) => match parse_datetime(raw) {
            Some(cutoff) => cutoff,
            None => {
                listener.handle_invalid_datetime(raw);
                return Ok(());
            }
        },
    };
    let cutoff = if cutoff > Timestamp::now() {
        listener.handle_datetime_in_future(cutoff)
    } else {
        cutoff
    };

    npm::validate_registry_url(&cli.registry)?;
    let registry: Arc<dyn RegistryClient> = Arc::new(NpmRegistry::with_base_url(&cli.registry)?);
    let cache = VersionDateCache::new(VersionDateCache::default_dir());

    if std::env::var("BACKDATER_VERBOSE").is_ok() {
        eprintln!("[VERBOSE] Version cache: {}", cache.path().display());
    }

    let options = UpdateOptions {
        strip_prefixes: cli.strip_prefixes,
        allow_pre_release: cli.allow_pre_release,
        dry_run: cli.dry_run,
        preload_dependencies: cli.preload_dependencies,
        no_cache: cli.no_cache,
        lock: if cli.lock_major {
            Some(LockMode::Major)
        } else if cli.lock_minor {
            Some(LockMode::Minor)
        } else {
            None
        },
        warnings_as_errors: cli.warnings_as_errors,
        delay: cli.delay.map(Duration::from_millis),
    };

    listener.handle_run_start(&cli.manifest, cutoff);

    let updater = ManifestUpdater::new(registry, cache, options);
    match updater.run(&cli.manifest, cutoff, listener.as_mut()) {
        Ok(()) => {
            listener.handle_run_finish();
            Ok(())
        }
        Err(BackdaterError::UserCancelled) => {
            println!("\n{}", "Update cancelled by user.".yellow());
            Ok(())
        }
        Err(error) => Err(error),
    }
}

/// Accepts an RFC 3339 timestamp, a civil datetime, or a bare date; civil
/// inputs are read as UTC.
pub fn parse_datetime(raw: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp);
    }

    if let Ok(datetime) = raw.parse::<civil::DateTime>() {
        return datetime.in_tz("UTC").ok().map(|zoned| zoned.timestamp());
    }

    raw.parse::<civil::Date>()
        .ok()
        .and_then(|date| date.at(0, 0, 0, 0).in_tz("UTC").ok())
        .map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_timestamps() {
        let cutoff = parse_datetime("2022-01-15T10:30:00Z").unwrap();

        assert_eq!(cutoff.to_string(), "2022-01-15T10:30:00Z");
    }

    #[test]
    fn parses_bare_dates_as_utc_midnight() {
        let cutoff = parse_datetime("2022-01-15").unwrap();

        assert_eq!(cutoff.to_string(), "2022-01-15T00:00:00Z");
    }

    #[test]
    fn parses_civil_datetimes_as_utc() {
        let cutoff = parse_datetime("2022-01-15T10:30:00").unwrap();

        assert_eq!(cutoff.to_string(), "2022-01-15T10:30:00Z");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_datetime("not-a-datetime"), None);
    }
}
