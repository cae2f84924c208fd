use crate::version::parser::ParsedVersion;

/// Label and raw version string for one resolution choice.
pub type VersionAction = (String, String);

/// Builds the ordered menu of choices for one dependency. "Leave as" always
/// comes first; among the two "Change to" options for a prefixed version, the
/// preferred form (prefixed, or bare when `strip_prefixes` is set) comes
/// first.
pub fn build_actions(
    parsed: &ParsedVersion,
    proposed: &str,
    strip_prefixes: bool,
) -> Vec<VersionAction> {
    let mut actions = vec![
        ("Leave as".to_string(), parsed.raw.clone()),
        ("Change to".to_string(), proposed.to_string()),
    ];

    if let Some(prefix) = parsed.prefix {
        let position = if strip_prefixes { 2 } else { 1 };
        actions.insert(
            position,
            ("Change to".to_string(), format!("{prefix}{proposed}")),
        );
    }

    actions
}
