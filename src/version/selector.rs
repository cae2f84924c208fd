use crate::registry::VersionDateMap;
use crate::version::parser;
use jiff::Timestamp;
use regex::Regex;
use std::sync::LazyLock;

static STRICT_SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("strict semver pattern"));

static LOOSE_SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+[^-\s]*$").expect("loose semver pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Candidates must share the currently declared major component.
    Major,
    /// Candidates must share the currently declared major and minor components.
    Minor,
}

/// Pins candidate versions to the currently declared components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockConstraint {
    pub current: (Option<u64>, Option<u64>),
    pub mode: LockMode,
}

impl LockConstraint {
    /// An unknown current component admits nothing.
    fn admits(&self, candidate: &parser::ParsedVersion) -> bool {
        let (major, minor) = self.current;
        match self.mode {
            LockMode::Major => major.is_some() && candidate.major == major,
            LockMode::Minor => {
                major.is_some()
                    && minor.is_some()
                    && candidate.major == major
                    && candidate.minor == minor
            }
        }
    }
}

/// Selects the highest version released at or before `cutoff`.
///
/// `strict` restricts candidates to exactly `MAJOR.MINOR.PATCH`; otherwise any
/// suffix without a leading dash or whitespace is admitted. Entries whose
/// release date does not parse are ineligible.
///
/// Version strings compare lexically, so "9.0.0" ranks above "10.0.0".
pub fn select_highest(
    versions: &VersionDateMap,
    cutoff: Timestamp,
    strict: bool,
    lock: Option<&LockConstraint>,
) -> Option<String> {
    let pattern = if strict { &STRICT_SEMVER } else { &LOOSE_SEMVER };

    let mut highest: Option<&str> = None;

    for (version, release_date) in versions {
        if !pattern.is_match(version) {
            continue;
        }

        let Ok(released) = release_date.parse::<Timestamp>() else {
            continue;
        };
        if released > cutoff {
            continue;
        }

        if let Some(lock) = lock {
            if !lock.admits(&parser::parse(version)) {
                continue;
            }
        }

        if highest.is_none_or(|current| version.as_str() > current) {
            highest = Some(version.as_str());
        }
    }

    highest.map(str::to_string)
}
