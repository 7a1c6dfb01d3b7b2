use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Analysis mode. Selects both the instruction template and the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[serde(alias = "grammar", alias = "grammar-check")]
    GrammarCheck,
    Simplify,
}

impl Operation {
    /// Stable snake_case label (`grammar_check`, `simplify`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GrammarCheck => "grammar_check",
            Self::Simplify => "simplify",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grammar" | "grammar_check" | "grammar-check" => Ok(Self::GrammarCheck),
            "simplify" => Ok(Self::Simplify),
            other => Err(format!(
                "unsupported operation '{other}' (expected grammar-check or simplify)"
            )),
        }
    }
}
