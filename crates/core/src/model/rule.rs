// Rule model - matching predicates and the ordered knowledge base

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Matching predicate evaluated against a normalized column name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// Matches when the token appears as a whole normalized token.
    ExactToken { token: String },
    /// Matches when the folded name starts with the prefix, or the first
    /// token equals the prefix stripped of delimiters.
    Prefix { prefix: String },
    /// Matches when the folded name ends with the suffix, or the last
    /// token equals the suffix stripped of delimiters.
    Suffix { suffix: String },
    /// Matches when the needle occurs anywhere in the folded name.
    Substring { needle: String },
    /// Matches when the regex matches the folded name.
    Regex { pattern: String },
    /// Matches when any alternative matches; scores as the best alternative.
    AnyOf { patterns: Vec<Pattern> },
}

/// One naming-convention rule from the knowledge base.
///
/// Immutable once loaded. Several rules may target the same semantic label
/// with different patterns, priorities, or confidences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub pattern: Pattern,
    pub label: String,
    pub priority: i32,
    pub base_confidence: f64,
    #[serde(default)]
    pub notes: String,
}

/// Ordered, read-only set of rules shared across analyze calls.
///
/// Authoring and file loading belong to the caller; the core only validates
/// and evaluates. Rule order is significant: it is the evaluation order and
/// the final tie-breaker when ranking hypotheses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
    /// Technical tokens dropped during name normalization (e.g. `tbl`, `col`).
    #[serde(default)]
    stopwords: BTreeSet<String>,
}

impl KnowledgeBase {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            stopwords: BTreeSet::new(),
        }
    }

    pub fn with_stopwords(rules: Vec<Rule>, stopwords: BTreeSet<String>) -> Self {
        Self { rules, stopwords }
    }

    /// Build a knowledge base, rejecting malformed rules up front.
    pub fn validated(rules: Vec<Rule>) -> Result<Self, AnalysisError> {
        let kb = Self::new(rules);
        kb.validate()?;
        Ok(kb)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Resolve the weak rule reference carried by a `Hypothesis`.
    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn stopwords(&self) -> &BTreeSet<String> {
        &self.stopwords
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reject malformed entries before any column is processed.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(AnalysisError::InvalidRule {
                    index,
                    reason: "label must not be empty".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&rule.base_confidence) {
                return Err(AnalysisError::InvalidRule {
                    index,
                    reason: format!(
                        "base_confidence {} is outside [0.0, 1.0]",
                        rule.base_confidence
                    ),
                });
            }
            validate_pattern(index, &rule.pattern)?;
        }
        Ok(())
    }
}

fn validate_pattern(index: usize, pattern: &Pattern) -> Result<(), AnalysisError> {
    let empty = |what: &str| AnalysisError::InvalidRule {
        index,
        reason: format!("{what} must not be empty"),
    };
    match pattern {
        Pattern::ExactToken { token } if token.trim().is_empty() => Err(empty("token")),
        Pattern::Prefix { prefix } if prefix.trim().is_empty() => Err(empty("prefix")),
        Pattern::Suffix { suffix } if suffix.trim().is_empty() => Err(empty("suffix")),
        Pattern::Substring { needle } if needle.trim().is_empty() => Err(empty("needle")),
        Pattern::Regex { pattern } => match Regex::new(pattern) {
            Ok(_) => Ok(()),
            Err(err) => Err(AnalysisError::InvalidRule {
                index,
                reason: format!("invalid regex '{pattern}': {err}"),
            }),
        },
        Pattern::AnyOf { patterns } => {
            if patterns.is_empty() {
                return Err(empty("alternative list"));
            }
            for alternative in patterns {
                validate_pattern(index, alternative)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: Pattern) -> Rule {
        Rule {
            pattern,
            label: "identifier".to_string(),
            priority: 10,
            base_confidence: 0.9,
            notes: String::new(),
        }
    }

    #[test]
    fn accepts_well_formed_rules() {
        let kb = KnowledgeBase::new(vec![
            rule(Pattern::Suffix {
                suffix: "_id".to_string(),
            }),
            rule(Pattern::Regex {
                pattern: r"^is_[a-z]+$".to_string(),
            }),
        ]);
        assert!(kb.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let mut bad = rule(Pattern::ExactToken {
            token: "id".to_string(),
        });
        bad.base_confidence = 1.5;
        let kb = KnowledgeBase::new(vec![bad]);
        let err = kb.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRule { index: 0, .. }));
    }

    #[test]
    fn rejects_uncompilable_regex() {
        let kb = KnowledgeBase::new(vec![rule(Pattern::Regex {
            pattern: "[unclosed".to_string(),
        })]);
        assert!(kb.validate().is_err());
    }

    #[test]
    fn rejects_empty_label_and_empty_alternatives() {
        let mut unlabeled = rule(Pattern::ExactToken {
            token: "id".to_string(),
        });
        unlabeled.label = "  ".to_string();
        assert!(KnowledgeBase::new(vec![unlabeled]).validate().is_err());

        let hollow = rule(Pattern::AnyOf { patterns: vec![] });
        assert!(KnowledgeBase::new(vec![hollow]).validate().is_err());
    }
}
