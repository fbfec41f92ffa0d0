// Hypothesis model - a single scored claim about a column's meaning

use serde::{Deserialize, Serialize};

/// A scored claim that a column carries a particular semantic label.
///
/// Created per successful rule match and never mutated afterwards.
/// `rule_index` is a weak reference to the originating rule: a stable index
/// into the knowledge base the batch was analyzed with, resolvable on demand
/// via [`KnowledgeBase::rule`](crate::model::KnowledgeBase::rule). Keeping an
/// index rather than a live reference leaves the rule lifecycle with the
/// caller and keeps hypotheses plain serializable values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hypothesis {
    pub column_name: String,
    pub label: String,
    /// Always within [0.0, 1.0]; the matcher clamps adjusted scores.
    pub confidence: f64,
    pub rule_index: usize,
}
