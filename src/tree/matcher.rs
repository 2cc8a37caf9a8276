//! Ignore matching for directory entry names.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

/// Decides whether an entry name is excluded from traversal.
///
/// Literal rules match by exact, case-sensitive equality. Rules containing
/// `*` or `?` are globs matched against the whole name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    exact: HashSet<String>,
    globs: Vec<Regex>,
}

impl IgnoreMatcher {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exact = HashSet::new();
        let mut globs = Vec::new();
        for rule in rules {
            let rule = rule.as_ref();
            exact.insert(rule.to_string());
            if is_glob(rule) {
                match glob_to_regex(rule) {
                    Ok(re) => globs.push(re),
                    Err(e) => tracing::warn!(rule, error = %e, "skipping unusable ignore rule"),
                }
            }
        }
        Self { exact, globs }
    }

    /// Matcher that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.exact.contains(name) || self.globs.iter().any(|re| re.is_match(name))
    }
}

/// Whether a rule uses wildcards.
pub fn is_glob(rule: &str) -> bool {
    rule.contains('*') || rule.contains('?')
}

/// Translate `*`/`?` into an anchored, case-insensitive expression.
fn glob_to_regex(rule: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(rule.len() + 8);
    pattern.push('^');
    for c in rule.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}
