//! Failure classification by description keywords
//!
//! The transport does not expose typed errors for every failure, so the
//! gateway classifies them by looking for known substrings in the failure
//! description. Rules are evaluated top-to-bottom and the first match wins.

use once_cell::sync::Lazy;

use crate::error::ErrorKind;

/// One classification rule: any of `patterns` maps to `kind`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    /// Lowercase substrings searched for in the description
    pub patterns: Vec<String>,
    /// Kind assigned when a pattern matches
    pub kind: ErrorKind,
}

impl ClassificationRule {
    pub fn new<I, S>(kind: ErrorKind, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
            kind,
        }
    }

    fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| description.contains(p.as_str()))
    }
}

/// Ordered table of classification rules
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorClassifier {
    rules: Vec<ClassificationRule>,
}

static DEFAULT_RULES: Lazy<Vec<ClassificationRule>> = Lazy::new(|| {
    vec![
        ClassificationRule::new(ErrorKind::ModelNotFound, ["model not found", "404", "not found"]),
        ClassificationRule::new(ErrorKind::Timeout, ["timeout", "timed out"]),
        ClassificationRule::new(
            ErrorKind::EndpointUnreachable,
            [
                "connection refused",
                "connecterror",
                "connection",
                "error sending request",
                "dns error",
            ],
        ),
        ClassificationRule::new(
            ErrorKind::MalformedResponse,
            ["jsondecodeerror", "decode", "expected value", "invalid json"],
        ),
    ]
});

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl ErrorClassifier {
    /// Classifier with no rules; everything is `Unknown`
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule, evaluated after the existing ones
    pub fn with_rule(mut self, rule: ClassificationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule ahead of the existing ones
    pub fn with_priority_rule(mut self, rule: ClassificationRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Map a failure description to an `ErrorKind`
    pub fn classify(&self, description: &str) -> ErrorKind {
        let description = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&description))
            .map(|rule| rule.kind)
            .unwrap_or(ErrorKind::Unknown)
    }
}
