// Analysis view - read-only query surface over a batch result

use std::collections::BTreeSet;

use crate::error::UnknownColumnError;
use crate::model::{BatchResult, ColumnResult, Hypothesis, SummaryStats};

/// Queryable wrapper over a [`BatchResult`].
///
/// Every operation is a lookup or aggregation over already-computed
/// hypotheses; nothing here re-runs inference. Unknown columns and columns
/// with zero hypotheses are deliberately not distinguished by `best_for` and
/// `all_for` - callers that need the distinction check [`contains`] or use
/// [`column`], which signals the unknown name as an error.
///
/// [`contains`]: AnalysisView::contains
/// [`column`]: AnalysisView::column
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    batch: BatchResult,
}

impl AnalysisView {
    pub fn new(batch: BatchResult) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &BatchResult {
        &self.batch
    }

    pub fn into_batch(self) -> BatchResult {
        self.batch
    }

    /// Highest-ranked hypothesis for the column, `None` when the column is
    /// unknown or has no hypotheses.
    pub fn best_for(&self, column_name: &str) -> Option<&Hypothesis> {
        self.batch.get(column_name).and_then(ColumnResult::best)
    }

    /// All hypotheses for the column in rank order; empty for unknown or
    /// hypothesis-less columns.
    pub fn all_for(&self, column_name: &str) -> &[Hypothesis] {
        self.batch
            .get(column_name)
            .map(|r| r.hypotheses.as_slice())
            .unwrap_or(&[])
    }

    /// Columns holding at least one hypothesis with the label, at any rank,
    /// in input order.
    pub fn columns_with_label(&self, label: &str) -> Vec<&str> {
        self.batch
            .entries()
            .filter(|(_, result)| result.has_label(label))
            .map(|(name, _)| name)
            .collect()
    }

    /// New view keeping only hypotheses with confidence >= `min_confidence`.
    /// Emptied columns are retained; a summary on the source is recomputed.
    pub fn filter_by_confidence(&self, min_confidence: f64) -> AnalysisView {
        AnalysisView::new(self.batch.filter_by_confidence(min_confidence))
    }

    /// Error-signaling lookup; prefer [`get`](AnalysisView::get) when the
    /// absent case is routine.
    pub fn column(&self, column_name: &str) -> Result<&ColumnResult, UnknownColumnError> {
        self.batch.get(column_name).ok_or_else(|| UnknownColumnError {
            column: column_name.to_string(),
        })
    }

    pub fn get(&self, column_name: &str) -> Option<&ColumnResult> {
        self.batch.get(column_name)
    }

    pub fn contains(&self, column_name: &str) -> bool {
        self.batch.contains(column_name)
    }

    /// Column names in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.batch.keys()
    }

    /// `(name, result)` pairs in input order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ColumnResult)> {
        self.batch.entries()
    }

    /// Number of columns analyzed.
    pub fn count(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn summary(&self) -> Option<&SummaryStats> {
        self.batch.summary()
    }

    pub fn has_summary(&self) -> bool {
        self.batch.has_summary()
    }

    pub fn all_hypotheses(&self) -> impl Iterator<Item = &Hypothesis> {
        self.batch.all_hypotheses()
    }

    pub fn total_hypotheses(&self) -> usize {
        match self.batch.summary() {
            Some(summary) => summary.total_hypotheses,
            None => self.batch.total_hypotheses(),
        }
    }

    /// Single highest-confidence hypothesis across the batch; ties go to the
    /// earlier column, keeping the result deterministic.
    pub fn top_hypothesis(&self) -> Option<&Hypothesis> {
        self.all_hypotheses().fold(None, |best, candidate| match best {
            Some(current) if current.confidence.total_cmp(&candidate.confidence).is_ge() => {
                Some(current)
            }
            _ => Some(candidate),
        })
    }

    /// Distinct semantic labels present in the batch, sorted.
    pub fn semantic_types(&self) -> Vec<&str> {
        self.all_hypotheses()
            .map(|h| h.label.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<BatchResult> for AnalysisView {
    fn from(batch: BatchResult) -> Self {
        Self::new(batch)
    }
}
