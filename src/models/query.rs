//! User query, language selection, and advisory models

use crate::error::ReliefAiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a query entered the system
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuerySource {
    Typed,
    Voice,
}

/// One user question, ephemeral per interaction
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserQuery {
    pub text: String,
    pub source: QuerySource,
}

impl UserQuery {
    #[must_use]
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: QuerySource::Typed,
        }
    }

    #[must_use]
    pub fn voice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: QuerySource::Voice,
        }
    }
}

/// Supported response languages
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
    Ta,
}

impl Language {
    /// ISO 639-1 code used by the speech synthesis service
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Ta => "ta",
        }
    }

    /// Whether this is the default language (text-only output)
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Language::En
    }
}

impl FromStr for Language {
    type Err = ReliefAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "te" => Ok(Language::Te),
            "ta" => Ok(Language::Ta),
            other => Err(ReliefAiError::validation(format!(
                "Unsupported language '{other}'. Supported: en, hi, te, ta"
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The composed multi-line response returned for a query
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Advisory {
    pub body: String,
    pub language: Language,
}

impl Advisory {
    #[must_use]
    pub fn new(body: impl Into<String>, language: Language) -> Self {
        Self {
            body: body.into(),
            language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        for code in ["en", "hi", "te", "ta"] {
            let language: Language = code.parse().unwrap();
            assert_eq!(language.code(), code);
        }
    }

    #[test]
    fn test_language_rejects_unknown() {
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_parse_is_case_insensitive() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" Hi ".parse::<Language>().unwrap(), Language::Hi);
    }

    #[test]
    fn test_default_language_is_text_only() {
        assert!(Language::default().is_default());
        assert!(!Language::Ta.is_default());
    }
}
