// Name normalizer - canonical form of a column name for rule matching

use std::collections::BTreeSet;

use crate::tokenizer::tokenize;

/// Canonicalizes raw column names into the form rules are matched against.
///
/// Stopwords are technical tokens (e.g. `tbl`, `col`, `stg`) the knowledge
/// base wants ignored during token matching; the folded full name keeps them
/// so substring and regex rules still see the original spelling.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    stopwords: BTreeSet<String>,
}

impl Normalizer {
    pub fn new(stopwords: BTreeSet<String>) -> Self {
        Self { stopwords }
    }

    /// Normalize a column name: case-fold the whole name and produce
    /// lowercased, stopword-free tokens. Never fails; a malformed or empty
    /// name simply yields a form nothing can match.
    pub fn normalize(&self, column_name: &str) -> NormalizedName {
        let folded = column_name.trim().to_lowercase();
        let tokens = tokenize(column_name)
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && !self.stopwords.contains(t))
            .collect();
        NormalizedName { folded, tokens }
    }
}

/// A column name in matchable form: the case-folded full name plus its
/// normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    folded: String,
    tokens: Vec<String>,
}

impl NormalizedName {
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// True when there is nothing to match against (empty input).
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}
