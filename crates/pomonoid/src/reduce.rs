//! String rewriting to normal forms.

use crate::{error::PomonoidError, presentation::IDENTITY};

/// Default bound on full rewriting passes before a word is declared
/// non-convergent.
pub const DEFAULT_PASS_LIMIT: usize = 10_000;

/// A left-to-right rewrite: every occurrence of `pattern` as a substring is
/// replaced by `replacement`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Rule {
    pub(crate) pattern: String,
    pub(crate) replacement: String,
}

impl Rule {
    /// Creates a rewrite rule.
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_owned(),
            replacement: replacement.to_owned(),
        }
    }

    /// The substring this rule matches.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The word substituted for each match.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Applies a fixed rule set to words until no rule fires. The application
/// order is deterministic: longest pattern first, ties broken
/// lexicographically by pattern.
#[derive(Clone, Debug)]
pub struct WordReducer {
    rules: Vec<Rule>,
    pass_limit: usize,
}

impl WordReducer {
    /// Creates a reducer over `rules` with the default pass limit.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| {
            b.pattern
                .len()
                .cmp(&a.pattern.len())
                .then_with(|| a.pattern.cmp(&b.pattern))
        });
        rules.dedup();

        Self {
            rules,
            pass_limit: DEFAULT_PASS_LIMIT,
        }
    }

    /// Replaces the pass limit.
    pub fn with_pass_limit(mut self, pass_limit: usize) -> Self {
        self.pass_limit = pass_limit;

        self
    }

    /// The rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rewrites `word` to its normal form. One pass applies every rule whose
    /// pattern occurs, replacing all occurrences; passes repeat until a pass
    /// changes nothing.
    pub fn reduce(&self, word: &str) -> Result<String, PomonoidError> {
        let mut word = if word.is_empty() {
            IDENTITY.to_string()
        } else {
            word.to_owned()
        };

        for _ in 0..self.pass_limit {
            let mut next = word.clone();

            for rule in &self.rules {
                if next.contains(&rule.pattern) {
                    next = next.replace(&rule.pattern, &rule.replacement);
                }
            }

            if next.is_empty() {
                next = IDENTITY.to_string();
            }

            if next == word {
                return Ok(word);
            }

            word = next;
        }

        Err(PomonoidError::ReductionDidNotConverge {
            word,
            limit: self.pass_limit,
        })
    }

    /// The monoid operation: concatenate, then reduce. Multiplication must
    /// always go through here so results stay in normal form.
    pub fn product(&self, x: &str, y: &str) -> Result<String, PomonoidError> {
        self.reduce(&format!("{x}{y}"))
    }
}
