//! Configuration for the retry executor.

use crate::error::{Locale, ParseLocaleError};
use crate::retry::{PolicyError, PolicySettings, RetryExecutor, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const MAX_RETRIES_VAR: &str = "LEXI_MAX_RETRIES";
const INITIAL_DELAY_VAR: &str = "LEXI_INITIAL_DELAY_MS";
const MAX_DELAY_VAR: &str = "LEXI_MAX_DELAY_MS";
const MULTIPLIER_VAR: &str = "LEXI_BACKOFF_MULTIPLIER";
const LOCALE_VAR: &str = "LEXI_LOCALE";

/// Errors raised while loading an [`ExecutorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// An environment variable holds a value of the wrong type.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// The assembled policy breaks an invariant.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The locale tag is not supported.
    #[error(transparent)]
    Locale(#[from] ParseLocaleError),
}

crate::error_boundary!(io::Error => ConfigError, |e| {
    ConfigError::Io(e.to_string())
});

crate::error_boundary!(toml::de::Error => ConfigError, |e| {
    ConfigError::Parse(e.message().to_string())
});

/// Settings for building a [`RetryExecutor`].
///
/// Loaded from TOML:
///
/// ```toml
/// locale = "vi"
///
/// [retry]
/// max_retries = 2
/// initial_delay_ms = 100
/// max_delay_ms = 1000
/// backoff_multiplier = 2.0
/// ```
///
/// Missing keys keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Retry policy applied to every call
    pub retry: RetryPolicy,

    /// Language of localized error messages
    pub locale: Locale,
}

impl ExecutorConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `LEXI_MAX_RETRIES` for the retry count
    /// - `LEXI_INITIAL_DELAY_MS` for the first delay in milliseconds
    /// - `LEXI_MAX_DELAY_MS` for the delay cap in milliseconds
    /// - `LEXI_BACKOFF_MULTIPLIER` for the growth factor
    /// - `LEXI_LOCALE` for the message language (`en`, `vi`)
    ///
    /// Unset variables keep their defaults. A set but malformed variable is
    /// an error, as is a combination that breaks the policy invariants.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = PolicySettings::default();

        if let Some(max_retries) = read_var(MAX_RETRIES_VAR)? {
            settings.max_retries = max_retries;
        }
        if let Some(initial) = read_var(INITIAL_DELAY_VAR)? {
            settings.initial_delay_ms = initial;
        }
        if let Some(max) = read_var(MAX_DELAY_VAR)? {
            settings.max_delay_ms = max;
        }
        if let Some(multiplier) = read_var(MULTIPLIER_VAR)? {
            settings.backoff_multiplier = multiplier;
        }

        let locale = match env::var(LOCALE_VAR) {
            Ok(tag) if !tag.trim().is_empty() => tag.parse()?,
            _ => Locale::default(),
        };

        Ok(Self {
            retry: RetryPolicy::try_from(settings)?,
            locale,
        })
    }

    /// Load a `.env` file into the process environment, then call
    /// [`from_env`](Self::from_env).
    ///
    /// Variables already present in the environment are not overwritten.
    #[cfg(feature = "env")]
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_env()
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// The policy is replaced as a whole so the result stays valid.
    ///
    /// A field of `other` only takes effect when it differs from the default.
    /// An environment that spells out the default values (`LEXI_MAX_RETRIES=3`
    /// alone, say) therefore leaves a file's non-default policy in place.
    pub fn merge(mut self, other: ExecutorConfig) -> Self {
        if other.retry != RetryPolicy::default() {
            self.retry = other.retry;
        }
        if other.locale != Locale::default() {
            self.locale = other.locale;
        }
        self
    }

    /// Executor using this policy and locale, reporting through `tracing`.
    pub fn build_executor(&self) -> RetryExecutor {
        RetryExecutor::new(self.retry).with_locale(self.locale)
    }
}

fn read_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
