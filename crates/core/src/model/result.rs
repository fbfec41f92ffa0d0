// Result model - per-column results, ordered batch container, summary stats

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::Hypothesis;

/// Inference outcome for one column.
///
/// `hypotheses` is sorted descending by confidence; ties go to the rule with
/// the higher priority, then to the earlier rule in the knowledge base. An
/// empty vec is a valid outcome (no pattern matched).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnResult {
    #[serde(default)]
    pub column_name: String,
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
}

impl ColumnResult {
    pub fn empty(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            hypotheses: Vec::new(),
        }
    }

    /// Highest-ranked hypothesis, if any.
    pub fn best(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.hypotheses.iter().any(|h| h.label == label)
    }
}

/// Summary statistics over all retained hypotheses in a batch.
///
/// Derived data only: recomputed whenever a batch is assembled, filtered, or
/// merged, never patched in place. `semantic_type_counts` counts hypotheses,
/// not columns; a column contributing two hypotheses of the same label
/// counts twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total_hypotheses: usize,
    pub semantic_type_counts: BTreeMap<String, usize>,
    pub average_confidence: f64,
}

impl SummaryStats {
    pub fn compute<'a, I>(hypotheses: I) -> Self
    where
        I: IntoIterator<Item = &'a Hypothesis>,
    {
        let mut total = 0usize;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut confidence_sum = 0.0;
        for hypothesis in hypotheses {
            total += 1;
            *counts.entry(hypothesis.label.clone()).or_insert(0) += 1;
            confidence_sum += hypothesis.confidence;
        }
        // Zero hypotheses is an observable empty state, not an error.
        let average_confidence = if total == 0 {
            0.0
        } else {
            confidence_sum / total as f64
        };
        Self {
            total_hypotheses: total,
            semantic_type_counts: counts,
            average_confidence,
        }
    }
}

/// Outcome of one batch analysis: an ordered map of column name to
/// [`ColumnResult`] plus optional summary statistics.
///
/// Entry order is the caller's input order. Keys are unique: a duplicate
/// input column name keeps its first position and takes the value of its
/// last occurrence (last-write-wins). Constructed once per analysis call and
/// immutable afterwards; filtering and merging build new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    entries: Vec<ColumnResult>,
    index: HashMap<String, usize>,
    summary: Option<SummaryStats>,
}

impl BatchResult {
    /// Assemble a batch from per-column results, applying the
    /// last-write-wins invariant for duplicate column names.
    pub fn from_results<I>(results: I, summary: Option<SummaryStats>) -> Self
    where
        I: IntoIterator<Item = ColumnResult>,
    {
        let mut entries: Vec<ColumnResult> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for result in results {
            match index.get(&result.column_name) {
                Some(&position) => entries[position] = result,
                None => {
                    index.insert(result.column_name.clone(), entries.len());
                    entries.push(result);
                }
            }
        }
        Self {
            entries,
            index,
            summary,
        }
    }

    pub fn get(&self, column_name: &str) -> Option<&ColumnResult> {
        self.index.get(column_name).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, column_name: &str) -> bool {
        self.index.contains_key(column_name)
    }

    /// Column names in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.column_name.as_str())
    }

    /// `(name, result)` pairs in input order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ColumnResult)> {
        self.entries.iter().map(|r| (r.column_name.as_str(), r))
    }

    pub fn columns(&self) -> &[ColumnResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Option<&SummaryStats> {
        self.summary.as_ref()
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn total_hypotheses(&self) -> usize {
        self.entries.iter().map(|r| r.hypotheses.len()).sum()
    }

    pub fn all_hypotheses(&self) -> impl Iterator<Item = &Hypothesis> {
        self.entries.iter().flat_map(|r| r.hypotheses.iter())
    }

    /// New batch keeping only hypotheses with confidence >= `min_confidence`.
    ///
    /// Columns whose hypotheses are all dropped are retained as empty
    /// results, not removed. The summary, when present on the source, is
    /// recomputed over the surviving hypotheses, never carried over stale.
    pub fn filter_by_confidence(&self, min_confidence: f64) -> BatchResult {
        let filtered: Vec<ColumnResult> = self
            .entries
            .iter()
            .map(|result| ColumnResult {
                column_name: result.column_name.clone(),
                hypotheses: result
                    .hypotheses
                    .iter()
                    .filter(|h| h.confidence >= min_confidence)
                    .cloned()
                    .collect(),
            })
            .collect();
        let summary = self
            .summary
            .is_some()
            .then(|| SummaryStats::compute(filtered.iter().flat_map(|r| r.hypotheses.iter())));
        BatchResult::from_results(filtered, summary)
    }

    /// Plain nested mapping for interchange with external formatting or
    /// serialization collaborators:
    /// `{"columns": {...}, "total_columns": n, "summary": {...}?}`.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

struct ColumnsInOrder<'a>(&'a [ColumnResult]);

impl Serialize for ColumnsInOrder<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in self.0 {
            map.serialize_entry(&result.column_name, result)?;
        }
        map.end()
    }
}

impl Serialize for BatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BatchResult", 3)?;
        state.serialize_field("columns", &ColumnsInOrder(&self.entries))?;
        state.serialize_field("total_columns", &self.entries.len())?;
        match &self.summary {
            Some(summary) => state.serialize_field("summary", summary)?,
            None => state.skip_field("summary")?,
        }
        state.end()
    }
}

struct ColumnEntries(Vec<ColumnResult>);

impl<'de> Deserialize<'de> for ColumnEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = ColumnEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column name to column result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, mut result)) =
                    map.next_entry::<String, ColumnResult>()?
                {
                    // The map key is authoritative for the column identity.
                    result.column_name = name;
                    entries.push(result);
                }
                Ok(ColumnEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for BatchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BatchVisitor;

        impl<'de> Visitor<'de> for BatchVisitor {
            type Value = BatchResult;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a batch result object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut columns: Option<ColumnEntries> = None;
                let mut summary: Option<SummaryStats> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "columns" => columns = Some(map.next_value()?),
                        "summary" => summary = Some(map.next_value()?),
                        _ => {
                            map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }
                let entries = columns.map(|c| c.0).unwrap_or_default();
                Ok(BatchResult::from_results(entries, summary))
            }
        }

        deserializer.deserialize_struct(
            "BatchResult",
            &["columns", "total_columns", "summary"],
            BatchVisitor,
        )
    }
}
