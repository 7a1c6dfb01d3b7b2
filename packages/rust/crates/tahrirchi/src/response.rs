//! Payload parsing: JSON text -> schema check -> typed, span-checked result.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::contracts::{AnalysisResult, GrammarError, GrammarResult, Operation, SimplifyResult};
use crate::error::AnalysisError;
use crate::schema::ResponseValidator;

/// Grammar payload as the backend sends it. Offsets stay raw JSON numbers so a
/// negative, fractional or huge span is dropped rather than failing the whole response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrammarPayload {
    corrected_text: String,
    errors: Vec<GrammarErrorPayload>,
}

#[derive(Debug, Deserialize)]
struct GrammarErrorPayload {
    offset: Number,
    length: Number,
    original: String,
    suggestion: String,
    explanation: String,
}

/// Parse the backend's text for `operation`, checking spans against `input`.
pub(crate) fn parse_payload(
    validator: &ResponseValidator,
    operation: Operation,
    input: &str,
    text: Option<&str>,
) -> Result<AnalysisResult, AnalysisError> {
    let text = text
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AnalysisError::malformed("empty response body"))?;
    let value: Value = serde_json::from_str(text)
        .map_err(|e| AnalysisError::malformed(format!("response is not valid JSON: {e}")))?;
    validator.validate(operation, &value)?;
    match operation {
        Operation::GrammarCheck => {
            let payload: GrammarPayload = decode(value)?;
            Ok(AnalysisResult::GrammarCheck(GrammarResult {
                corrected_text: payload.corrected_text,
                errors: retain_in_bounds(payload.errors, input),
            }))
        }
        Operation::Simplify => {
            let payload: SimplifyResult = decode(value)?;
            if payload.simplified_text.trim().is_empty() {
                return Err(AnalysisError::malformed("simplifiedText is empty"));
            }
            if payload.summary.trim().is_empty() {
                return Err(AnalysisError::malformed("summary is empty"));
            }
            Ok(AnalysisResult::Simplify(payload))
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, AnalysisError> {
    serde_json::from_value(value).map_err(|e| AnalysisError::malformed(e.to_string()))
}

/// Keep only errors whose span lies inside `input` (measured in chars).
fn retain_in_bounds(errors: Vec<GrammarErrorPayload>, input: &str) -> Vec<GrammarError> {
    let reported = errors.len();
    let kept = errors
        .into_iter()
        .filter_map(|raw| {
            let error = GrammarError {
                offset: span_index(&raw.offset)?,
                length: span_index(&raw.length)?,
                original: raw.original,
                suggestion: raw.suggestion,
                explanation: raw.explanation,
            };
            error.is_within(input).then_some(error)
        })
        .collect::<Vec<_>>();
    if kept.len() < reported {
        tracing::warn!(
            event = "tahrirchi.response.spans_dropped",
            reported,
            dropped = reported - kept.len(),
            input_chars = input.chars().count(),
            "dropped grammar errors with out-of-bounds spans"
        );
    }
    kept
}

/// Largest float that still names an exact integer.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// A non-negative whole number that fits `usize`. `2.0` counts, `2.5` and `1e20` do not.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn span_index(value: &Number) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n.fract() != 0.0 || !(0.0..=MAX_EXACT_F64).contains(&n) {
        return None;
    }
    usize::try_from(n as u64).ok()
}
