//! Contracts namespace: request, language, operation and result shapes.

mod language;
mod operation;
mod request;
mod result;

pub use language::LanguageCode;
pub use operation::Operation;
pub use request::AnalysisRequest;
pub use result::{AnalysisResult, GrammarError, GrammarResult, SimplifyResult};
