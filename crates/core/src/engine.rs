// Inference engine - runs the whole knowledge base against one column name

use tracing::debug;

use crate::matcher;
use crate::model::{ColumnResult, Hypothesis, KnowledgeBase};
use crate::normalizer::Normalizer;

/// Infer semantic hypotheses for a single column name.
///
/// Every rule is evaluated in knowledge-base order; there is no early
/// termination, because rules are independent and a column may legitimately
/// carry several labels (`amount_usd` can be both a monetary amount and
/// currency-denominated). A rule that fails to evaluate is logged and
/// treated as a non-match; the remaining rules still run, so one malformed
/// rule never aborts a column.
///
/// Deterministic: identical `(column_name, knowledge_base)` inputs always
/// yield an identical result, including hypothesis ordering.
pub fn infer(column_name: &str, knowledge_base: &KnowledgeBase) -> ColumnResult {
    let normalizer = Normalizer::new(knowledge_base.stopwords().clone());
    let name = normalizer.normalize(column_name);

    let mut hypotheses = Vec::new();
    for (rule_index, rule) in knowledge_base.rules().iter().enumerate() {
        match matcher::evaluate(rule, &name) {
            Ok(outcome) if outcome.matched => hypotheses.push(Hypothesis {
                column_name: column_name.to_string(),
                label: rule.label.clone(),
                confidence: outcome.confidence,
                rule_index,
            }),
            Ok(_) => {}
            Err(err) => {
                debug!(
                    column = column_name,
                    rule_index,
                    error = %err,
                    "rule evaluation failed, treated as non-match"
                );
            }
        }
    }

    rank(&mut hypotheses, knowledge_base);
    ColumnResult {
        column_name: column_name.to_string(),
        hypotheses,
    }
}

/// Ordering invariant: confidence descending, ties to the higher-priority
/// rule, then to the earlier rule in the knowledge base.
fn rank(hypotheses: &mut [Hypothesis], knowledge_base: &KnowledgeBase) {
    let priority_of = |index: usize| {
        knowledge_base
            .rule(index)
            .map(|r| r.priority)
            .unwrap_or(i32::MIN)
    };
    hypotheses.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| priority_of(b.rule_index).cmp(&priority_of(a.rule_index)))
            .then_with(|| a.rule_index.cmp(&b.rule_index))
    });
}
