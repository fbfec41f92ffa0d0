pub mod analyzer;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod tokenizer;
pub mod view;

pub use analyzer::{analyze, merge, AnalyzeOptions};
pub use error::{AnalysisError, MatchError, Result, UnknownColumnError};
pub use matcher::MatchOutcome;
pub use model::{BatchResult, ColumnResult, Hypothesis, KnowledgeBase, Pattern, Rule, SummaryStats};
pub use view::AnalysisView;
