//! Languages available for user-facing error messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language of the localized message attached to a [`ClassifiedError`].
///
/// [`ClassifiedError`]: super::ClassifiedError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English (default).
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    /// Vietnamese, the language the tutor's learners read.
    #[serde(rename = "vi", alias = "vietnamese")]
    Vietnamese,
}

/// Returned when a locale name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale '{0}' (expected 'en' or 'vi')")]
pub struct ParseLocaleError(pub String);

impl Locale {
    /// Short language tag (`en`, `vi`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Vietnamese => "vi",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            "vi" | "vi-vn" | "vietnamese" => Ok(Self::Vietnamese),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}
