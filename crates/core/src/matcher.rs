// Rule matcher - evaluates one rule against one normalized column name

use regex::Regex;

use crate::error::MatchError;
use crate::model::{Pattern, Rule};
use crate::normalizer::NormalizedName;

/// Outcome of evaluating one rule against one column name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    pub confidence: f64,
}

impl MatchOutcome {
    fn miss() -> Self {
        Self {
            matched: false,
            confidence: 0.0,
        }
    }

    fn hit(confidence: f64) -> Self {
        Self {
            matched: true,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// How well the pattern matched; scales the rule's base confidence.
///
/// Variant order matters: `Exact` outranks `Partial` when `AnyOf` picks the
/// best alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchQuality {
    Partial,
    Exact,
}

impl MatchQuality {
    fn factor(self) -> f64 {
        match self {
            MatchQuality::Exact => 1.0,
            MatchQuality::Partial => 0.85,
        }
    }
}

/// Evaluate a rule against a normalized column name.
///
/// Pure function, deterministic for identical inputs. Empty names never
/// match. The confidence is the rule's `base_confidence`, adjusted by match
/// quality and clamped to [0, 1]. The quality policy is part of the
/// knowledge-base contract:
///
/// - exact token, prefix, suffix, and regex matches score `base_confidence`
///   unchanged;
/// - a substring match scores `base_confidence` when the needle equals a
///   whole token, and `base_confidence * 0.85` when it only occurs inside
///   the folded name;
/// - `AnyOf` scores as its best-matching alternative.
pub fn evaluate(rule: &Rule, name: &NormalizedName) -> Result<MatchOutcome, MatchError> {
    if name.is_empty() {
        return Ok(MatchOutcome::miss());
    }
    match match_pattern(&rule.pattern, name)? {
        Some(quality) => Ok(MatchOutcome::hit(rule.base_confidence * quality.factor())),
        None => Ok(MatchOutcome::miss()),
    }
}

fn match_pattern(
    pattern: &Pattern,
    name: &NormalizedName,
) -> Result<Option<MatchQuality>, MatchError> {
    match pattern {
        Pattern::ExactToken { token } => {
            let token = fold(token);
            Ok((!token.is_empty() && name.has_token(&token)).then_some(MatchQuality::Exact))
        }
        Pattern::Prefix { prefix } => {
            let folded = fold(prefix);
            let token = strip_delimiters(&folded);
            let hit = (!folded.is_empty() && name.folded().starts_with(&folded))
                || (!token.is_empty() && name.tokens().first().is_some_and(|t| *t == token));
            Ok(hit.then_some(MatchQuality::Exact))
        }
        Pattern::Suffix { suffix } => {
            let folded = fold(suffix);
            let token = strip_delimiters(&folded);
            let hit = (!folded.is_empty() && name.folded().ends_with(&folded))
                || (!token.is_empty() && name.tokens().last().is_some_and(|t| *t == token));
            Ok(hit.then_some(MatchQuality::Exact))
        }
        Pattern::Substring { needle } => {
            let needle = fold(needle);
            if needle.is_empty() {
                Ok(None)
            } else if name.has_token(&needle) {
                Ok(Some(MatchQuality::Exact))
            } else if name.folded().contains(&needle) {
                Ok(Some(MatchQuality::Partial))
            } else {
                Ok(None)
            }
        }
        Pattern::Regex { pattern } => {
            let regex = Regex::new(pattern).map_err(|err| MatchError::InvalidRegex {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;
            Ok(regex.is_match(name.folded()).then_some(MatchQuality::Exact))
        }
        Pattern::AnyOf { patterns } => {
            let mut best: Option<MatchQuality> = None;
            let mut first_error: Option<MatchError> = None;
            for alternative in patterns {
                match match_pattern(alternative, name) {
                    Ok(Some(quality)) => best = best.max(Some(quality)),
                    Ok(None) => {}
                    // A broken alternative only surfaces when nothing matched.
                    Err(err) if first_error.is_none() => first_error = Some(err),
                    Err(_) => {}
                }
            }
            match (best, first_error) {
                (Some(quality), _) => Ok(Some(quality)),
                (None, Some(err)) => Err(err),
                (None, None) => Ok(None),
            }
        }
    }
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

fn strip_delimiters(text: &str) -> String {
    text.trim_matches(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .to_string()
}
