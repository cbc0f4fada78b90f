//! Ingredient response normalization
//!
//! Turns free-form model output such as `"I can see onion, potato, carrot."`
//! into an `IngredientList`. Known preamble phrases are removed by an ordered
//! rule table so new model phrasings can be handled by adding a rule.
//!
//! Rules are anchored: they strip a phrase from the start of the response and
//! from the start of each comma-separated segment. A phrase in the middle of a
//! segment, as in `"egg and the image shows milk"`, is kept.

use std::fmt;
use std::ops::Deref;

use once_cell::sync::Lazy;
use regex::Regex;

/// A single rewrite applied to the start of the response
#[derive(Debug, Clone)]
pub struct PreambleRule {
    pattern: Regex,
    replacement: String,
}

impl PreambleRule {
    /// Rule from an arbitrary regex; callers should anchor it with `^`
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }

    /// Case-insensitive rule that strips every leading repeat of `phrase`
    /// (each with an optional colon) from the start of the text
    pub fn phrase(phrase: &str) -> Self {
        // Word phrases must end on a word boundary so "i can see" leaves "seeds" alone
        let boundary = match phrase.chars().last() {
            Some(c) if c.is_alphanumeric() => r"\b",
            _ => "",
        };
        let pattern = Regex::new(&format!(
            r"(?i)^(?:\s*{}{}\s*:?\s*)+",
            regex::escape(phrase),
            boundary
        ))
        .expect("escaped phrase is always a valid pattern");
        Self::new(pattern, "")
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace(text, self.replacement.as_str())
            .into_owned()
    }
}

static DEFAULT_PHRASES: &[&str] = &[
    "the ingredients are",
    "the image shows",
    "i can see",
    "ingredients:",
    "this image appears to contain",
];

static DEFAULT_RULES: Lazy<Vec<PreambleRule>> =
    Lazy::new(|| DEFAULT_PHRASES.iter().map(|p| PreambleRule::phrase(p)).collect());

/// Ordered preamble rules, evaluated top-to-bottom
#[derive(Debug, Clone)]
pub struct PreambleRules {
    rules: Vec<PreambleRule>,
}

impl Default for PreambleRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl PreambleRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, rule: PreambleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order until the text stops shrinking
    ///
    /// Phrase rules only ever remove text, so they run to a fixed point. A
    /// custom rule whose replacement does not shorten the text ends the loop
    /// after its pass.
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.trim().to_string();
        loop {
            let next = self
                .rules
                .iter()
                .fold(current.clone(), |acc, rule| rule.apply(&acc).trim().to_string());
            if next.len() >= current.len() {
                return next;
            }
            current = next;
        }
    }
}

/// Ordered, deduplicated ingredient names
///
/// Entries are trimmed and never empty. Duplicates are removed by exact
/// string match, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; returns false if it was blank or already present
    pub fn push(&mut self, entry: impl AsRef<str>) -> bool {
        let entry = entry.as_ref().trim();
        if entry.is_empty() || self.0.iter().any(|e| e == entry) {
            return false;
        }
        self.0.push(entry.to_string());
        true
    }

    /// Run every entry through the per-entry normalization again
    pub fn renormalized(&self, rules: &PreambleRules) -> Self {
        normalize_entries(self.0.iter().map(String::as_str), rules)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for IngredientList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = IngredientList::new();
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

impl IntoIterator for IngredientList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for IngredientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

fn normalize_entries<'a>(
    entries: impl IntoIterator<Item = &'a str>,
    rules: &PreambleRules,
) -> IngredientList {
    entries.into_iter().map(|entry| rules.strip(entry)).collect()
}

/// Parse a raw model response into an `IngredientList`
///
/// Strips preambles from the start, drops one trailing period, splits on
/// commas, and normalizes each segment. Blank input yields an empty list.
pub fn parse_ingredients(raw: &str, rules: &PreambleRules) -> IngredientList {
    let cleaned = rules.strip(raw);
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    normalize_entries(cleaned.split(','), rules)
}
