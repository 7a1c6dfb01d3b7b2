use std::fmt::Write as _;

use crate::contracts::{AnalysisResult, GrammarResult, SimplifyResult};

/// Message shown for a grammar check with no corrections.
pub const NO_ERRORS_MESSAGE: &str = "No grammar or spelling errors were found in your text.";

/// Plain-text rendering of a result for terminal output.
#[must_use]
pub fn render_result(result: &AnalysisResult, input: &str) -> String {
    match result {
        AnalysisResult::GrammarCheck(grammar) => render_grammar(grammar, input),
        AnalysisResult::Simplify(simplify) => render_simplify(simplify),
    }
}

fn render_grammar(result: &GrammarResult, input: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Corrected text:\n{}\n", result.corrected_text);
    if result.errors.is_empty() {
        out.push_str(NO_ERRORS_MESSAGE);
        out.push('\n');
        return out;
    }
    let _ = writeln!(out, "Suggested improvements ({}):", result.errors.len());
    for (idx, error) in result.errors.iter().enumerate() {
        // Prefer the input's own span; the model's `original` can drift from it.
        let original = error.span_in(input).unwrap_or(&error.original);
        let _ = writeln!(
            out,
            "{}. \"{}\" -> \"{}\" (at {}): {}",
            idx + 1,
            original,
            error.suggestion,
            error.offset,
            error.explanation
        );
    }
    out
}

fn render_simplify(result: &SimplifyResult) -> String {
    format!(
        "Simplified text:\n{}\n\nWhat changed: {}\n",
        result.simplified_text, result.summary
    )
}
