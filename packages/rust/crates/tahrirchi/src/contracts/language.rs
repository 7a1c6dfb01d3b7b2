//! Supported input/output languages and their display names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Natural language of the text being analyzed.
///
/// The display name is what gets interpolated into the instruction text,
/// so the backend is told "You are an expert Uzbek proofreader", not "UZ".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageCode {
    #[serde(alias = "en")]
    En,
    #[serde(alias = "uz")]
    Uz,
    #[serde(alias = "ru")]
    Ru,
    #[serde(alias = "de")]
    De,
    #[serde(alias = "ar")]
    Ar,
    #[serde(alias = "tr")]
    Tr,
    #[serde(alias = "zh")]
    Zh,
    #[serde(alias = "es")]
    Es,
}

impl LanguageCode {
    /// Every supported language, in menu order.
    pub const ALL: [Self; 8] = [
        Self::En,
        Self::Uz,
        Self::Ru,
        Self::De,
        Self::Ar,
        Self::Tr,
        Self::Zh,
        Self::Es,
    ];

    /// Two-letter uppercase code (`EN`, `UZ`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Uz => "UZ",
            Self::Ru => "RU",
            Self::De => "DE",
            Self::Ar => "AR",
            Self::Tr => "TR",
            Self::Zh => "ZH",
            Self::Es => "ES",
        }
    }

    /// English display name used inside instruction templates.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Uz => "Uzbek",
            Self::Ru => "Russian",
            Self::De => "German",
            Self::Ar => "Arabic",
            Self::Tr => "Turkish",
            Self::Zh => "Chinese",
            Self::Es => "Spanish",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| {
                let supported = Self::ALL.map(Self::code).join(", ");
                format!("unsupported language code '{normalized}' (expected one of {supported})")
            })
    }
}
