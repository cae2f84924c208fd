use crate::cache::VersionDateCache;
use crate::error::Result;
use crate::events::Listener;
use crate::manifest::{self, DEPENDENCY_TYPES, DependencyMap, DependencyType};
use crate::registry::RegistryClient;
use crate::update::{DependencyMapResolver, UpdateOptions};
use jiff::Timestamp;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Top-level orchestration: read the manifest, discover each dependency map,
/// resolve it, sparse-merge the change-sets, and hand the final write (or
/// dry-run rendering) to the listener.
pub struct ManifestUpdater {
    registry: Arc<dyn RegistryClient>,
    cache: VersionDateCache,
    options: UpdateOptions,
}

impl ManifestUpdater {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        cache: VersionDateCache,
        options: UpdateOptions,
    ) -> Self {
        Self {
            registry,
            cache,
            options,
        }
    }

    pub fn run(
        &self,
        manifest_path: &Path,
        cutoff: Timestamp,
        listener: &mut dyn Listener,
    ) -> Result<()> {
        listener.handle_reading_manifest_start(manifest_path);
        let content = fs::read_to_string(manifest_path)?;
        let mut new_manifest: Value = serde_json::from_str(&content)?;
        listener.handle_reading_manifest_finish(&content);

        let old_manifest = new_manifest.clone();
        let resolver = DependencyMapResolver::new(self.registry.as_ref(), &self.cache, &self.options);
        let mut changes_made = false;

        if self.options.preload_dependencies {
            // Discover everything up front so listeners can learn total
            // package counts before resolution begins.
            let mut discovered = Vec::with_capacity(DEPENDENCY_TYPES.len());
            for kind in DEPENDENCY_TYPES {
                discovered.push((kind, Self::discover(&new_manifest, kind, listener)));
            }
            for (kind, map) in discovered {
                if let Some(map) = map {
                    changes_made |= Self::resolve_map(
                        &resolver,
                        &mut new_manifest,
                        kind,
                        &map,
                        cutoff,
                        listener,
                    )?;
                }
            }
        } else {
            for kind in DEPENDENCY_TYPES {
                if let Some(map) = Self::discover(&new_manifest, kind, listener) {
                    changes_made |= Self::resolve_map(
                        &resolver,
                        &mut new_manifest,
                        kind,
                        &map,
                        cutoff,
                        listener,
                    )?;
                }
            }
        }

        listener.handle_changes_made(changes_made);
        if !changes_made {
            return Ok(());
        }

        listener.handle_make_changes(
            manifest_path,
            &old_manifest,
            &new_manifest,
            self.options.dry_run,
        )
    }

    fn discover(
        manifest: &Value,
        kind: DependencyType,
        listener: &mut dyn Listener,
    ) -> Option<DependencyMap> {
        listener.handle_discovering_dependency_map_start(kind);
        let map = manifest::discover_dependency_map(manifest, kind);
        listener.handle_discovering_dependency_map_finish(kind, map.as_ref());
        map
    }

    fn resolve_map(
        resolver: &DependencyMapResolver<'_>,
        manifest: &mut Value,
        kind: DependencyType,
        map: &DependencyMap,
        cutoff: Timestamp,
        listener: &mut dyn Listener,
    ) -> Result<bool> {
        let updates = resolver.resolve(map, cutoff, listener)?;

        let changed = !updates.is_empty();
        if changed {
            manifest::apply_updates(manifest, kind, &updates);
        }
        listener.handle_dependency_map_processed(kind, &updates);

        Ok(changed)
    }
}
