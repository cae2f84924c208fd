/// Range prefixes recognized in declared versions, in match order.
pub const SUPPORTED_PREFIXES: [&str; 6] = [">=", "<=", ">", "<", "~", "^"];

/// A declared version split into its range prefix and numeric components.
///
/// Invariant: `raw` is exactly the prefix (when present) followed by
/// `version`. `major`/`minor` are `None` when the corresponding segment is
/// missing or carries no digits; a `None` component never matches a lock
/// target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub raw: String,
    pub prefix: Option<&'static str>,
    pub version: String,
    pub major: Option<u64>,
    pub minor: Option<u64>,
}

/// Parsing never fails; arbitrary input degrades to a prefixless version with
/// unknown components.
pub fn parse(raw: &str) -> ParsedVersion {
    let prefix = SUPPORTED_PREFIXES
        .iter()
        .copied()
        .find(|prefix| raw.starts_with(prefix));

    let version = match prefix {
        Some(prefix) => &raw[prefix.len()..],
        None => raw,
    };

    let mut segments = version.split('.');
    let major = segments.next().and_then(parse_segment);
    let minor = segments.next().and_then(parse_segment);

    ParsedVersion {
        raw: raw.to_string(),
        prefix,
        version: version.to_string(),
        major,
        minor,
    }
}

fn parse_segment(segment: &str) -> Option<u64> {
    let digits: String = segment.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_prefixes_round_trip() {
        for prefix in SUPPORTED_PREFIXES {
            let raw = format!("{prefix}1.2.3");
            let parsed = parse(&raw);

            assert_eq!(parsed.prefix, Some(prefix));
            assert_eq!(parsed.version, "1.2.3");
            assert_eq!(format!("{}{}", prefix, parsed.version), raw);
        }
    }

    #[test]
    fn bare_version_has_no_prefix() {
        let parsed = parse("1.2.3");

        assert_eq!(parsed.prefix, None);
        assert_eq!(parsed.version, "1.2.3");
        assert_eq!(parsed.major, Some(1));
        assert_eq!(parsed.minor, Some(2));
    }

    #[test]
    fn unsupported_prefix_is_kept_in_the_version() {
        let parsed = parse("=1.2.3");

        assert_eq!(parsed.prefix, None);
        assert_eq!(parsed.version, "=1.2.3");
    }

    #[test]
    fn greater_equal_wins_over_greater() {
        let parsed = parse(">=2.0.0");

        assert_eq!(parsed.prefix, Some(">="));
        assert_eq!(parsed.version, "2.0.0");
    }

    #[test]
    fn components_strip_non_digit_characters() {
        let parsed = parse("^1x.2y.3");

        assert_eq!(parsed.major, Some(1));
        assert_eq!(parsed.minor, Some(2));
    }

    #[test]
    fn unparseable_components_are_none() {
        let parsed = parse("not-a-version");

        assert_eq!(parsed.prefix, None);
        assert_eq!(parsed.major, None);
        assert_eq!(parsed.minor, None);
    }

    #[test]
    fn missing_minor_segment_is_none() {
        let parsed = parse("~7");

        assert_eq!(parsed.major, Some(7));
        assert_eq!(parsed.minor, None);
    }
}
