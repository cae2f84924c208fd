use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Package name → raw declared version string, for one manifest section.
pub type DependencyMap = IndexMap<String, String>;

/// The four manifest sections the tool reads and rewrites, in processing order.
pub const DEPENDENCY_TYPES: [DependencyType; 4] = [
    DependencyType::Dependencies,
    DependencyType::DevDependencies,
    DependencyType::PeerDependencies,
    DependencyType::OptionalDependencies,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

impl DependencyType {
    pub fn key(self) -> &'static str {
        match self {
            DependencyType::Dependencies => "dependencies",
            DependencyType::DevDependencies => "devDependencies",
            DependencyType::PeerDependencies => "peerDependencies",
            DependencyType::OptionalDependencies => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Extract one dependency section from the manifest. Returns `None` when the
/// key is absent (or not an object); entries with non-string versions are
/// left out and therefore never rewritten.
pub fn discover_dependency_map(manifest: &Value, kind: DependencyType) -> Option<DependencyMap> {
    let section = manifest.get(kind.key())?.as_object()?;

    let mut map = DependencyMap::new();
    for (name, value) in section {
        if let Some(version) = value.as_str() {
            map.insert(name.clone(), version.to_string());
        }
    }

    Some(map)
}

/// Sparse merge: only the given entries are overwritten, everything else in
/// the section keeps its value and position.
pub fn apply_updates(manifest: &mut Value, kind: DependencyType, updates: &DependencyMap) {
    if let Some(section) = manifest.get_mut(kind.key()).and_then(Value::as_object_mut) {
        for (name, version) in updates {
            section.insert(name.clone(), Value::String(version.clone()));
        }
    }
}
