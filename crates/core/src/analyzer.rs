// Batch analyzer - runs inference over many columns and aggregates results

use tracing::warn;

use crate::engine;
use crate::error::AnalysisError;
use crate::model::{BatchResult, KnowledgeBase, SummaryStats};

/// Options recognized by the analysis entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeOptions {
    /// Attach [`SummaryStats`] to the batch.
    pub include_summary: bool,
    /// Drop hypotheses with confidence strictly below this value before
    /// they ever enter the result. Must lie in [0.0, 1.0].
    pub confidence_threshold: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_summary: false,
            confidence_threshold: 0.0,
        }
    }
}

impl AnalyzeOptions {
    pub fn with_summary() -> Self {
        Self {
            include_summary: true,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(AnalysisError::InvalidThreshold {
                value: self.confidence_threshold,
            });
        }
        Ok(())
    }
}

/// Analyze a batch of column names against a knowledge base.
///
/// Configuration and knowledge base are validated before any column is
/// processed; nothing partial is ever returned on that class of failure. An
/// empty knowledge base is not an error, only a warning: every column then
/// yields zero hypotheses and `total_hypotheses == 0` makes the state
/// observable.
///
/// Columns are processed independently, O(columns x rules), with no caching
/// between calls. The batch preserves input column order; a duplicate input
/// name keeps its first position and takes the result of its last
/// occurrence (inference is stateless per name, so the duplicates' results
/// are identical anyway).
pub fn analyze<S: AsRef<str>>(
    columns: &[S],
    knowledge_base: &KnowledgeBase,
    options: &AnalyzeOptions,
) -> Result<BatchResult, AnalysisError> {
    options.validate()?;
    knowledge_base.validate()?;
    if knowledge_base.is_empty() {
        warn!("knowledge base is empty, every column will yield zero hypotheses");
    }

    let mut results = Vec::with_capacity(columns.len());
    for column in columns {
        let mut result = engine::infer(column.as_ref(), knowledge_base);
        result
            .hypotheses
            .retain(|h| h.confidence >= options.confidence_threshold);
        results.push(result);
    }

    let summary = options
        .include_summary
        .then(|| SummaryStats::compute(results.iter().flat_map(|r| r.hypotheses.iter())));
    Ok(BatchResult::from_results(results, summary))
}

/// Merge two batches into a new one.
///
/// Conflict policy: the right-hand batch wins on duplicate column names,
/// consistent with the batch-level last-write-wins invariant; the duplicate
/// keeps its left-batch position. Column order is left-batch order followed
/// by right-only columns. The summary is recomputed over the merged
/// hypotheses when either input carried one, otherwise absent - it is never
/// copied stale.
pub fn merge(left: &BatchResult, right: &BatchResult) -> BatchResult {
    let columns = left
        .columns()
        .iter()
        .chain(right.columns().iter())
        .cloned()
        .collect::<Vec<_>>();
    let merged = BatchResult::from_results(columns, None);
    let summary = (left.has_summary() || right.has_summary())
        .then(|| SummaryStats::compute(merged.all_hypotheses()));
    BatchResult::from_results(merged.columns().to_vec(), summary)
}
