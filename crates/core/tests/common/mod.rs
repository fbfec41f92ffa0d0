// Shared fixtures for integration tests

#![allow(dead_code)]

use colsem_core::{KnowledgeBase, Pattern, Rule};

pub fn rule(pattern: Pattern, label: &str, priority: i32, confidence: f64) -> Rule {
    Rule {
        pattern,
        label: label.to_string(),
        priority,
        base_confidence: confidence,
        notes: String::new(),
    }
}

pub fn suffix(suffix: &str) -> Pattern {
    Pattern::Suffix {
        suffix: suffix.to_string(),
    }
}

pub fn exact_token(token: &str) -> Pattern {
    Pattern::ExactToken {
        token: token.to_string(),
    }
}

pub fn substring(needle: &str) -> Pattern {
    Pattern::Substring {
        needle: needle.to_string(),
    }
}

pub fn regex(pattern: &str) -> Pattern {
    Pattern::Regex {
        pattern: pattern.to_string(),
    }
}

/// The two-rule set from the identifier/monetary scenario.
pub fn scenario_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        rule(suffix("_id"), "identifier", 10, 0.9),
        rule(
            Pattern::AnyOf {
                patterns: vec![suffix("_amount"), suffix("_usd"), suffix("_eur")],
            },
            "monetary_amount",
            8,
            0.8,
        ),
    ])
}

/// A broader rule set exercising every pattern kind.
pub fn demo_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        rule(suffix("_id"), "identifier", 10, 0.9),
        rule(suffix("_at"), "timestamp", 9, 0.88),
        rule(
            Pattern::AnyOf {
                patterns: vec![suffix("_amount"), suffix("_usd"), suffix("_eur")],
            },
            "monetary_amount",
            8,
            0.8,
        ),
        rule(regex(r"^(is|has)_"), "boolean_flag", 7, 0.85),
        rule(exact_token("email"), "email_address", 6, 0.8),
        rule(substring("usd"), "currency_denominated", 5, 0.7),
    ])
}
