//! System instruction templates, one per operation.

use crate::contracts::{LanguageCode, Operation};

/// Build the system instruction for `operation`, parameterized by the language display name.
#[must_use]
pub fn system_instruction(operation: Operation, language: LanguageCode) -> String {
    let language = language.display_name();
    match operation {
        Operation::GrammarCheck => grammar_instruction(language),
        Operation::Simplify => simplify_instruction(language),
    }
}

fn grammar_instruction(language: &str) -> String {
    format!(
        "You are an expert {language} proofreader.\n\
         Analyze the text provided. Fix all grammar, spelling, and punctuation errors.\n\
         Return a JSON object with:\n\
         - correctedText: the fully corrected version of the text.\n\
         - errors: an array with one object per correction, each with\n\
         \x20 offset (integer): the character index in the INPUT text where the wrong part starts,\n\
         \x20 length (integer): the number of characters of the wrong part in the INPUT text,\n\
         \x20 original (string): the wrong part exactly as it appears in the input,\n\
         \x20 suggestion (string): the corrected replacement,\n\
         \x20 explanation (string): a brief, student-friendly reason for the change.\n\
         If there are no errors, the errors array must be empty. Output ONLY JSON."
    )
}

fn simplify_instruction(language: &str) -> String {
    format!(
        "You are a helpful educator who writes in {language}.\n\
         Rewrite the text to be much simpler and clearer (Grade 5 reading level).\n\
         Use shorter sentences and easier vocabulary. Keep the original meaning.\n\
         Return a JSON object with:\n\
         - simplifiedText: the simplified version of the text, in {language}.\n\
         - summary: one sentence explaining how you simplified it (e.g. used shorter sentences).\n\
         Output ONLY JSON."
    )
}
