//! Ordered pattern/handler lists for extracting one field from a line.
//!
//! CLI output pasted from a fabric controller is noisy and the same field can
//! appear in several shapes. Rather than one large alternation, each field is
//! described by a [`Grammar`]: an ordered list of [`Rule`]s where the first
//! rule whose regex matches *and* whose handler accepts the captures wins.

use std::fmt;

use regex::{Captures, Regex};

/// Handler turning regex captures into a value, or rejecting them.
pub type Handler<T> = fn(&Captures<'_>) -> Option<T>;

/// A named regex paired with a capture handler.
pub struct Rule<T> {
    name: &'static str,
    pattern: Regex,
    handler: Handler<T>,
}

impl<T> Rule<T> {
    /// Build a rule from a static pattern.
    ///
    /// Patterns are compile-time literals, so a compile failure is a bug in
    /// the grammar definition rather than bad input.
    pub fn new(name: &'static str, pattern: &str, handler: Handler<T>) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|err| panic!("grammar rule '{name}' has invalid pattern: {err}"));
        Self {
            name,
            pattern,
            handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply the rule to one line.
    pub fn apply(&self, line: &str) -> Option<T> {
        let caps = self.pattern.captures(line)?;
        (self.handler)(&caps)
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Ordered list of rules for one field. Earlier rules take precedence.
pub struct Grammar<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Grammar<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// Return the value of the first accepting rule.
    pub fn first_match(&self, line: &str) -> Option<T> {
        self.first_match_named(line).map(|(_, value)| value)
    }

    /// Like [`Grammar::first_match`], also reporting which rule accepted.
    pub fn first_match_named(&self, line: &str) -> Option<(&'static str, T)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(line).map(|value| (rule.name, value)))
    }

    /// Rule names in precedence order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }
}

impl<T> fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}

/// Capture group `idx` as an owned string, if present and non-empty.
pub fn group(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
