use serde::{Deserialize, Serialize};

use super::Operation;

/// One correction reported by a grammar check.
///
/// `offset` and `length` count Unicode scalar values (`char`s) of the
/// original input, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    pub offset: usize,
    pub length: usize,
    pub original: String,
    pub suggestion: String,
    pub explanation: String,
}

impl GrammarError {
    /// Whether `offset + length` addresses a real span of `input`.
    #[must_use]
    pub fn is_within(&self, input: &str) -> bool {
        self.offset
            .checked_add(self.length)
            .is_some_and(|end| end <= input.chars().count())
    }

    /// The substring of `input` this error points at, or `None` when out of bounds.
    #[must_use]
    pub fn span_in<'a>(&self, input: &'a str) -> Option<&'a str> {
        if !self.is_within(input) {
            return None;
        }
        let byte_at = |char_index: usize| {
            input
                .char_indices()
                .nth(char_index)
                .map_or(input.len(), |(byte, _)| byte)
        };
        let start = byte_at(self.offset);
        let end = byte_at(self.offset + self.length);
        input.get(start..end)
    }
}

/// Corrected text plus the list of individual corrections (empty when none were needed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarResult {
    pub corrected_text: String,
    pub errors: Vec<GrammarError>,
}

/// Simplified rewrite plus a one-sentence description of what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResult {
    pub simplified_text: String,
    pub summary: String,
}

/// Result of one analysis, tagged by the operation that produced it.
///
/// Serialized as `{"type": "grammar_check", "result": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum AnalysisResult {
    GrammarCheck(GrammarResult),
    Simplify(SimplifyResult),
}

impl AnalysisResult {
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::GrammarCheck(_) => Operation::GrammarCheck,
            Self::Simplify(_) => Operation::Simplify,
        }
    }

    /// The single text field offered for copy and download.
    #[must_use]
    pub fn primary_text(&self) -> &str {
        match self {
            Self::GrammarCheck(result) => &result.corrected_text,
            Self::Simplify(result) => &result.simplified_text,
        }
    }

    #[must_use]
    pub fn as_grammar(&self) -> Option<&GrammarResult> {
        match self {
            Self::GrammarCheck(result) => Some(result),
            Self::Simplify(_) => None,
        }
    }

    #[must_use]
    pub fn as_simplify(&self) -> Option<&SimplifyResult> {
        match self {
            Self::Simplify(result) => Some(result),
            Self::GrammarCheck(_) => None,
        }
    }
}
