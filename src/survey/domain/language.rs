//! Languages a survey issue can be rendered in.

use super::ParseLanguageCodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 639-1 code of a supported survey language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// English, also the fallback language.
    #[default]
    En,
    /// Spanish.
    Es,
    /// Portuguese.
    Pt,
    /// French.
    Fr,
}

impl LanguageCode {
    /// Language used whenever detection is skipped, fails, or yields an
    /// unsupported code.
    pub const FALLBACK: Self = Self::En;

    /// Every language a template ships for.
    pub const SUPPORTED: [Self; 4] = [Self::En, Self::Es, Self::Pt, Self::Fr];

    /// Returns the ISO 639-1 code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Fr => "fr",
        }
    }

    /// Maps a detected ISO 639-1 code onto a supported language, falling back
    /// to [`Self::FALLBACK`] for anything else.
    #[must_use]
    pub fn from_detected(code: &str) -> Self {
        Self::try_from(code).unwrap_or(Self::FALLBACK)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = ParseLanguageCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "pt" => Ok(Self::Pt),
            "fr" => Ok(Self::Fr),
            _ => Err(ParseLanguageCodeError(value.to_owned())),
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
