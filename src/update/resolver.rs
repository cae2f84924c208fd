use crate::cache::{VersionCacheEntry, VersionDateCache};
use crate::error::{BackdaterError, Result};
use crate::events::Listener;
use crate::manifest::DependencyMap;
use crate::registry::{RegistryClient, VersionDateMap};
use crate::update::UpdateOptions;
use crate::version::{self, LockConstraint};
use jiff::Timestamp;
use std::thread;

/// Resolves one dependency map against the registry: per package, cache
/// lookup, selection, optional confirmation, and diffing against the declared
/// version. Returns only the changed entries.
pub struct DependencyMapResolver<'a> {
    registry: &'a dyn RegistryClient,
    cache: &'a VersionDateCache,
    options: &'a UpdateOptions,
}

impl<'a> DependencyMapResolver<'a> {
    pub fn new(
        registry: &'a dyn RegistryClient,
        cache: &'a VersionDateCache,
        options: &'a UpdateOptions,
    ) -> Self {
        Self {
            registry,
            cache,
            options,
        }
    }

    /// Packages are processed strictly in declaration order so listener
    /// notifications stay totally ordered.
    pub fn resolve(
        &self,
        dependencies: &DependencyMap,
        cutoff: Timestamp,
        listener: &mut dyn Listener,
    ) -> Result<DependencyMap> {
        let mut updates = DependencyMap::new();

        for (package_name, raw_version) in dependencies {
            self.resolve_package(package_name, raw_version, cutoff, listener, &mut updates)?;

            if let Some(delay) = self.options.delay {
                thread::sleep(delay);
            }
        }

        Ok(updates)
    }

    fn resolve_package(
        &self,
        package_name: &str,
        raw_version: &str,
        cutoff: Timestamp,
        listener: &mut dyn Listener,
        updates: &mut DependencyMap,
    ) -> Result<()> {
        listener.handle_getting_version_dates_start(package_name);

        let (cache_date, versions) = match self.version_dates(package_name, cutoff) {
            Ok(result) => result,
            Err(BackdaterError::Registry(error)) => {
                listener.handle_registry_error(package_name, &error);
                if self.options.warnings_as_errors {
                    return Err(BackdaterError::Registry(error));
                }
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        listener.handle_getting_version_dates_finish(package_name, cache_date, &versions);

        let parsed = version::parse(raw_version);
        let lock = self.options.lock.map(|mode| LockConstraint {
            current: (parsed.major, parsed.minor),
            mode,
        });

        let highest = version::select_highest(
            &versions,
            cutoff,
            !self.options.allow_pre_release,
            lock.as_ref(),
        );
        listener.handle_calculated_highest_version(
            package_name,
            &parsed.version,
            highest.as_deref(),
        );

        let Some(highest) = highest else {
            return Ok(());
        };
        if highest == parsed.version {
            return Ok(());
        }

        let actions = version::build_actions(&parsed, &highest, self.options.strip_prefixes);
        let chosen = listener.handle_prompt_version_action(package_name, &actions)?;

        // A choice equal to the declared string is a no-op by value and does
        // not enter the change-set.
        if chosen != raw_version {
            updates.insert(package_name.to_string(), chosen.clone());
        }
        listener.handle_dependency_processed(package_name, raw_version, &chosen);

        Ok(())
    }

    /// Returns the version-date map for a package and the query date it was
    /// produced for. A cache entry is fresh when its query date is at or past
    /// the cutoff (or past "now" when the cache is bypassed); otherwise the
    /// registry is consulted and the merged cache persisted.
    fn version_dates(
        &self,
        package_name: &str,
        cutoff: Timestamp,
    ) -> Result<(Timestamp, VersionDateMap)> {
        let mut cache = self.cache.load()?;

        let threshold = if self.options.no_cache {
            Timestamp::now()
        } else {
            cutoff
        };

        if let Some(entry) = cache.get(package_name) {
            if let Ok(query_date) = entry.query_date.parse::<Timestamp>() {
                if query_date >= threshold {
                    return Ok((query_date, entry.versions.clone()));
                }
            }
        }

        let versions = self.registry.fetch_version_dates(package_name)?;

        cache.insert(
            package_name.to_string(),
            VersionCacheEntry {
                query_date: threshold.to_string(),
                versions: versions.clone(),
            },
        );
        self.cache.save(&cache)?;

        Ok((threshold, versions))
    }
}
