//! Output schemas sent with each request, and local validation against them.
//!
//! The same schema value constrains decoding on the backend and gates the
//! payload locally: a response is only deserialized once it validates.

use jsonschema::JSONSchema;
use serde_json::{Value, json};

use crate::contracts::Operation;
use crate::error::AnalysisError;

/// JSON Schema for `operation`'s response payload.
#[must_use]
pub fn response_schema(operation: Operation) -> Value {
    match operation {
        Operation::GrammarCheck => json!({
            "type": "object",
            "properties": {
                "correctedText": { "type": "string" },
                "errors": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "offset": { "type": "integer" },
                            "length": { "type": "integer" },
                            "original": { "type": "string" },
                            "suggestion": { "type": "string" },
                            "explanation": { "type": "string" }
                        },
                        "required": ["offset", "length", "original", "suggestion", "explanation"]
                    }
                }
            },
            "required": ["correctedText", "errors"]
        }),
        Operation::Simplify => json!({
            "type": "object",
            "properties": {
                "simplifiedText": { "type": "string" },
                "summary": { "type": "string" }
            },
            "required": ["simplifiedText", "summary"]
        }),
    }
}

/// Compiled validators for both response schemas.
pub struct ResponseValidator {
    grammar: JSONSchema,
    simplify: JSONSchema,
}

impl ResponseValidator {
    /// Compile both schemas.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Configuration`] if a schema fails to compile.
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            grammar: compile(Operation::GrammarCheck)?,
            simplify: compile(Operation::Simplify)?,
        })
    }

    /// Validate `payload` against `operation`'s schema.
    ///
    /// # Errors
    /// Returns [`AnalysisError::MalformedResponse`] listing the first violations.
    pub fn validate(&self, operation: Operation, payload: &Value) -> Result<(), AnalysisError> {
        let schema = match operation {
            Operation::GrammarCheck => &self.grammar,
            Operation::Simplify => &self.simplify,
        };
        if let Err(errors) = schema.validate(payload) {
            let reasons = errors
                .take(3)
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{path}: {error}")
                    }
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AnalysisError::malformed(reasons));
        }
        Ok(())
    }
}

fn compile(operation: Operation) -> Result<JSONSchema, AnalysisError> {
    let schema = response_schema(operation);
    JSONSchema::compile(&schema).map_err(|error| {
        AnalysisError::Configuration(format!(
            "response schema for {operation} failed to compile: {error}"
        ))
    })
}
