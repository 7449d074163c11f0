//! Pattern matching for include/exclude rules
//!
//! Three syntaxes are understood:
//! - `/body/` - a regular expression, matched anywhere in the candidate
//! - anything containing `*` - a case-insensitive, fully anchored glob
//! - anything else - exact, case-sensitive equality

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A compiled pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    Exact(String),
    Glob(Regex),
    Regex(Regex),
}

impl Pattern {
    /// Compile a pattern string
    ///
    /// A `/…/` body that is not a valid expression is logged and the
    /// pattern falls back to exact equality with the original text, slashes
    /// included.
    pub fn parse(pattern: &str) -> Self {
        if let Some(body) = regex_body(pattern) {
            return match Regex::new(body) {
                Ok(re) => Pattern::Regex(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid regex pattern, matching literally");
                    Pattern::Exact(pattern.to_string())
                }
            };
        }

        if pattern.contains('*') {
            let expr = pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            return match RegexBuilder::new(&format!("^{expr}$"))
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
            {
                Ok(re) => Pattern::Glob(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid wildcard pattern, matching literally");
                    Pattern::Exact(pattern.to_string())
                }
            };
        }

        Pattern::Exact(pattern.to_string())
    }

    /// Check a candidate; a missing candidate never matches
    pub fn is_match(&self, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        match self {
            Pattern::Exact(s) => s == candidate,
            Pattern::Glob(re) | Pattern::Regex(re) => re.is_match(candidate),
        }
    }
}

/// Body of a `/…/` pattern, if the pattern has that form and a non-empty body
fn regex_body(pattern: &str) -> Option<&str> {
    pattern
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .filter(|body| !body.is_empty())
}

/// A list of compiled patterns, compiled once and checked many times
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| Pattern::parse(p)).collect(),
        }
    }

    /// Compile an optional list; `None` gives an empty set
    pub fn from_option(patterns: Option<&[String]>) -> Self {
        patterns.map(Self::new).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any pattern matches the candidate
    pub fn is_match(&self, candidate: Option<&str>) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    /// True if any pattern matches any of the candidates
    pub fn is_match_any(&self, candidates: &[Option<&str>]) -> bool {
        self.patterns
            .iter()
            .any(|p| candidates.iter().any(|c| p.is_match(*c)))
    }
}

/// Match a single candidate against a single pattern string
pub fn matches(candidate: Option<&str>, pattern: &str) -> bool {
    candidate.is_some() && Pattern::parse(pattern).is_match(candidate)
}

/// Match an id, a name and an extra name against a pattern list
///
/// An absent or empty list matches nothing.
pub fn matches_any(
    id: &str,
    name: Option<&str>,
    extra_name: Option<&str>,
    patterns: Option<&[String]>,
) -> bool {
    match patterns {
        Some(patterns) if !patterns.is_empty() => {
            PatternSet::new(patterns).is_match_any(&[Some(id), name, extra_name])
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        assert!(matches(Some("light.kitchen"), "light.kitchen"));
        assert!(!matches(Some("light.kitchen"), "Light.Kitchen"));
        assert!(!matches(Some("light.kitchen"), "light.kitche"));
    }

    #[test]
    fn test_every_string_matches_itself() {
        for s in ["", "a", "light.kitchen", "with space", "dots.and+plus", "(parens)", "[x]"] {
            assert!(matches(Some(s), s), "{s:?} should match itself");
        }
    }

    #[test]
    fn test_missing_candidate_never_matches() {
        assert!(!matches(None, "*"));
        assert!(!matches(None, ""));
        assert!(!matches(None, "/.*/"));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty() {
        assert!(matches(Some(""), ""));
        assert!(!matches(Some("x"), ""));
    }

    #[test]
    fn test_lone_star_matches_everything() {
        assert!(matches(Some(""), "*"));
        assert!(matches(Some("anything at all"), "*"));
        assert!(matches(Some("line\nbreak"), "*"));
    }

    #[test]
    fn test_wildcard_is_anchored_and_case_insensitive() {
        assert!(matches(Some("light.kitchen"), "light.*"));
        assert!(!matches(Some("switch.kitchen"), "light.*"));
        assert!(matches(Some("SENSOR.temp"), "sensor.*"));
        assert!(matches(Some("sensor.kitchen_temp"), "*kitchen*"));
        assert!(!matches(Some("xlight.kitchen"), "light.*"));
    }

    #[test]
    fn test_wildcard_escapes_metacharacters() {
        // The dot is literal in a glob
        assert!(!matches(Some("lightxkitchen"), "light.*"));
        assert!(matches(Some("a+b (1)"), "a+b (*)"));
        assert!(!matches(Some("aab (1)"), "a+b (*)"));
    }

    #[test]
    fn test_regex_is_unanchored() {
        assert!(matches(Some("sensor.kitchen_rssi"), "/rssi/"));
        assert!(matches(Some("sensor.kitchen_rssi"), "/_rssi$/"));
        assert!(!matches(Some("sensor.rssi_kitchen"), "/_rssi$/"));
        // Regex branch does not imply case folding
        assert!(!matches(Some("SENSOR"), "/sensor/"));
    }

    #[test]
    fn test_regex_needs_a_body() {
        // "//" has no body: exact match on the literal
        assert!(matches(Some("//"), "//"));
        assert!(!matches(Some("anything"), "//"));
        // A lone slash is also literal
        assert!(matches(Some("/"), "/"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        assert!(!matches(Some("x"), "/[/"));
        assert!(matches(Some("/[/"), "/[/"));
    }

    #[test]
    fn test_matches_any_fields() {
        let patterns = list(&["dev_*", "Kitchen Hub"]);
        assert!(matches_any("dev_1", None, None, Some(patterns.as_slice())));
        assert!(matches_any("abc", Some("Kitchen Hub"), None, Some(patterns.as_slice())));
        assert!(matches_any("abc", Some("Hub"), Some("Kitchen Hub"), Some(patterns.as_slice())));
        assert!(!matches_any("abc", Some("Hub"), None, Some(patterns.as_slice())));
    }

    #[test]
    fn test_matches_any_without_patterns() {
        assert!(!matches_any("dev_1", Some("x"), None, None));
        assert!(!matches_any("dev_1", Some("x"), None, Some(&[][..])));
    }

    #[test]
    fn test_pattern_set() {
        let set = PatternSet::new(&list(&["sensor.*_rssi", "/^button\\./"]));
        assert!(set.is_match(Some("sensor.hub_rssi")));
        assert!(set.is_match(Some("button.reset")));
        assert!(!set.is_match(Some("switch.power")));
        assert!(!set.is_match(None));
        assert!(PatternSet::from_option(None).is_empty());
    }
}
