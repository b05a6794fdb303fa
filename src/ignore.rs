//! Ignore patterns for snapshot.
//!
//! Patterns are plain path prefixes relative to the snapshot root, not globs.
//! A path is ignored when it equals a pattern or lives underneath it, so `foo`
//! ignores `foo` and `foo/bar.txt` but leaves `foo2` alone.

/// Returns true if `relative_path` is excluded by any of `patterns`.
///
/// Both sides are compared with `/` separators.
pub fn is_ignored<S: AsRef<str>>(relative_path: &str, patterns: &[S]) -> bool {
    let path = to_slash(relative_path);
    patterns.iter().any(|pattern| {
        let pattern = to_slash(pattern.as_ref());
        path == pattern
            || path
                .strip_prefix(pattern.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn to_slash(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Ordered set of ignore patterns gathered from config and the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    patterns: Vec<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from patterns, dropping empty strings and duplicates while keeping order.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        list.extend(patterns);
        list
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            let pattern = pattern.into();
            if pattern.is_empty() || self.patterns.contains(&pattern) {
                continue;
            }
            self.patterns.push(pattern);
        }
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        is_ignored(relative_path, &self.patterns)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
