//! Value objects for column-semantics inference.
//!
//! Everything here is a plain serde value: immutable after construction,
//! freely clonable, and safe to hand to external serialization or caching
//! collaborators. The only cross-object reference is the weak rule index
//! carried by [`Hypothesis`].

pub mod hypothesis;
pub mod result;
pub mod rule;

pub use hypothesis::Hypothesis;
pub use result::{BatchResult, ColumnResult, SummaryStats};
pub use rule::{KnowledgeBase, Pattern, Rule};
