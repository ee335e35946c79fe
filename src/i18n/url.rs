//! URL inspection and path-segment helpers.
//!
//! Language-prefixed URLs have the shape `<base>/<lang>/<rest>`. The helpers
//! here split a current URL relative to its base and detect or replace the
//! language segment.

use regex::Regex;
use std::sync::OnceLock;

/// Read access to the application's base path and the current request URL.
pub trait UrlInspector {
    /// Application base (e.g. "/app" or "https://example.com/app").
    fn base(&self) -> &str;

    /// Current URL, including the base (e.g. "/app/fr/page?x=1").
    fn current(&self) -> &str;
}

/// URL of the request being handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    base: String,
    current: String,
}

impl RequestUrl {
    pub fn new(base: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            current: current.into(),
        }
    }
}

impl UrlInspector for RequestUrl {
    fn base(&self) -> &str {
        &self.base
    }

    fn current(&self) -> &str {
        &self.current
    }
}

// A lower-case two-letter segment at the start of a base-relative path
static LANGUAGE_SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_segment_regex() -> &'static Regex {
    LANGUAGE_SEGMENT_REGEX.get_or_init(|| {
        Regex::new(r"^([a-z]{2})(?:[/?#]|$)").expect("Invalid language segment regex")
    })
}

/// Base with trailing slashes removed.
pub fn trimmed_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Part of `current` after `base`, without leading slashes.
///
/// The base only matches whole segments: with base `/app`, `/apple` is
/// outside it. A URL outside the base is returned whole (minus leading
/// slashes).
pub fn relative_path<'a>(base: &str, current: &'a str) -> &'a str {
    let inside = current
        .strip_prefix(trimmed_base(base))
        .filter(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']));

    inside.unwrap_or(current).trim_start_matches('/')
}

/// Leading lower-case two-letter segment of a base-relative path, if any.
pub fn language_segment(path: &str) -> Option<&str> {
    language_segment_regex()
        .captures(path)
        .and_then(|c| c.get(1))
        .map(|segment| segment.as_str())
}

/// Language candidate of a base-relative path.
///
/// Returns the leading two-letter segment when there is one, otherwise the
/// whole path.
pub fn language_candidate(path: &str) -> &str {
    language_segment(path).unwrap_or(path)
}

/// Split a base-relative path into its first segment and the remainder.
///
/// The segment ends at the first `/`, `?` or `#`. A `/` separator is
/// consumed; `?` and `#` stay with the remainder.
pub fn split_first_segment(path: &str) -> (&str, &str) {
    match path.find(['/', '?', '#']) {
        Some(idx) if path.as_bytes()[idx] == b'/' => (&path[..idx], &path[idx + 1..]),
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    }
}
