// Per-column inference: evaluation order, ranking, and failure isolation

mod common;

use colsem_core::engine::infer;
use colsem_core::{KnowledgeBase, Pattern};
use common::{demo_knowledge_base, exact_token, regex, rule, suffix};

#[test]
fn evaluates_every_rule_without_early_termination() {
    let kb = demo_knowledge_base();
    let result = infer("amount_usd", &kb);

    // Both the monetary and the currency rule apply to the same column.
    let labels: Vec<&str> = result.hypotheses.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec!["monetary_amount", "currency_denominated"]);
}

#[test]
fn ranks_by_confidence_descending() {
    let kb = demo_knowledge_base();
    let result = infer("is_active_usd", &kb);

    let confidences: Vec<f64> = result.hypotheses.iter().map(|h| h.confidence).collect();
    let mut sorted = confidences.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(confidences, sorted);
}

#[test]
fn breaks_confidence_ties_by_rule_priority() {
    let kb = KnowledgeBase::new(vec![
        rule(suffix("_id"), "identifier", 5, 0.8),
        rule(exact_token("id"), "key_column", 9, 0.8),
    ]);
    let result = infer("user_id", &kb);

    assert_eq!(result.hypotheses.len(), 2);
    assert_eq!(result.hypotheses[0].label, "key_column");
    assert_eq!(result.hypotheses[1].label, "identifier");
}

#[test]
fn breaks_remaining_ties_by_knowledge_base_order() {
    let kb = KnowledgeBase::new(vec![
        rule(suffix("_id"), "identifier", 7, 0.8),
        rule(exact_token("id"), "key_column", 7, 0.8),
    ]);
    let result = infer("user_id", &kb);

    assert_eq!(result.hypotheses[0].rule_index, 0);
    assert_eq!(result.hypotheses[1].rule_index, 1);
}

#[test]
fn repeated_inference_is_identical() {
    let kb = demo_knowledge_base();
    let first = infer("customer_email", &kb);
    let second = infer("customer_email", &kb);
    assert_eq!(first, second);
}

#[test]
fn broken_rule_is_isolated_not_fatal() {
    // Bypasses validation on purpose: a rule that slipped in malformed must
    // not abort inference for the column.
    let kb = KnowledgeBase::new(vec![
        rule(suffix("_id"), "identifier", 10, 0.9),
        rule(regex("[unclosed"), "broken", 9, 0.9),
        rule(exact_token("user"), "role", 8, 0.6),
    ]);
    let result = infer("user_id", &kb);

    let labels: Vec<&str> = result.hypotheses.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, vec!["identifier", "role"]);
}

#[test]
fn out_of_range_rule_confidence_is_clamped() {
    let mut overconfident = rule(suffix("_id"), "identifier", 10, 0.9);
    overconfident.base_confidence = 1.7;
    let kb = KnowledgeBase::new(vec![overconfident]);

    let result = infer("user_id", &kb);
    assert_eq!(result.hypotheses[0].confidence, 1.0);
}

#[test]
fn empty_and_unmatched_names_yield_empty_results() {
    let kb = demo_knowledge_base();
    assert!(infer("", &kb).hypotheses.is_empty());
    assert!(infer("notes", &kb).hypotheses.is_empty());
}

#[test]
fn hypotheses_reference_their_rule_by_index() {
    let kb = demo_knowledge_base();
    let result = infer("user_id", &kb);

    let hypothesis = &result.hypotheses[0];
    let origin = kb.rule(hypothesis.rule_index).unwrap();
    assert_eq!(origin.label, hypothesis.label);
    assert!(matches!(origin.pattern, Pattern::Suffix { .. }));
}
