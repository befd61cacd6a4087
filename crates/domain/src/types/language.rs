//! Supported translation languages

use serde::{Deserialize, Serialize};

/// Indian languages the dashboard can translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Hindi,
    Bengali,
    Telugu,
    Marathi,
    Tamil,
    Urdu,
    Gujarati,
    Kannada,
    Odia,
    Punjabi,
    Malayalam,
    Assamese,
    Maithili,
}

impl_code_conversions!(Language {
    Hindi => "hi",
    Bengali => "bn",
    Telugu => "te",
    Marathi => "mr",
    Tamil => "ta",
    Urdu => "ur",
    Gujarati => "gu",
    Kannada => "kn",
    Odia => "or",
    Punjabi => "pa",
    Malayalam => "ml",
    Assamese => "as",
    Maithili => "mai",
});

impl Language {
    /// English name, as used in the translation prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::Bengali => "Bengali",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Tamil => "Tamil",
            Self::Urdu => "Urdu",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Odia => "Odia",
            Self::Punjabi => "Punjabi",
            Self::Malayalam => "Malayalam",
            Self::Assamese => "Assamese",
            Self::Maithili => "Maithili",
        }
    }
}

/// What a requested language code resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationTarget {
    /// Source text is already English.
    English,
    Language(Language),
    /// Not in the language map; the text is passed through.
    Unsupported(String),
}

impl TranslationTarget {
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("en") {
            return Self::English;
        }
        code.parse::<Language>()
            .map_or_else(|_| Self::Unsupported(code.to_string()), Self::Language)
    }

    /// Whether a model call is needed at all.
    pub fn needs_translation(&self) -> bool {
        matches!(self, Self::Language(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}
