//! Free-endpoint rules: which paths bypass payment entirely.

/// A single allow rule pairing a path pattern with a match mode.
///
/// Strict matchers require exact string equality; non-strict matchers
/// perform a case-insensitive prefix match. Matcher identity is the
/// pattern string alone, independent of strictness.
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    pattern: String,
    strict: bool,
}

impl EndpointMatcher {
    pub fn new(pattern: impl Into<String>, strict: bool) -> Self {
        Self {
            pattern: pattern.into(),
            strict,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.strict {
            return path == self.pattern;
        }
        path.to_ascii_lowercase()
            .starts_with(&self.pattern.to_ascii_lowercase())
    }
}

/// Unordered collection of free-endpoint rules, keyed by pattern.
///
/// Populated during startup configuration and read-only afterwards, so
/// request workers share it without locking. When multiple matchers
/// could match the same path, which one matches first is don't-care.
#[derive(Debug, Clone, Default)]
pub struct FreeEndpointSet {
    matchers: Vec<EndpointMatcher>,
}

impl FreeEndpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a free endpoint. Adding a pattern that is already
    /// present is a no-op, regardless of strictness.
    pub fn add(&mut self, pattern: &str, strict: bool) {
        if self.matchers.iter().any(|m| m.pattern() == pattern) {
            return;
        }
        self.matchers.push(EndpointMatcher::new(pattern, strict));
    }

    /// Whether the given request path bypasses payment.
    pub fn is_free(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
