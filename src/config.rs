//! Bot configuration loaded from environment variables.

use camino::Utf8PathBuf;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::survey::adapters::github::DEFAULT_GITHUB_API_URL;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
/// Four connections.
const DEFAULT_POOL_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(3);
const DEFAULT_TEMPLATE_DIR: &str = "issue_template";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    /// A variable holds a value of the wrong shape.
    #[error("environment variable {name} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Runtime configuration of the survey bot.
///
/// | Env Var                | Default                   |
/// |------------------------|---------------------------|
/// | `HOST`                 | `0.0.0.0`                 |
/// | `PORT`                 | `3000`                    |
/// | `GITHUB_API_URL`       | `https://api.github.com`  |
/// | `GITHUB_TOKEN`         | required                  |
/// | `LANGUAGE_ENDPOINT`    | required                  |
/// | `LANGUAGE_KEY`         | required                  |
/// | `DATABASE_URL`         | required                  |
/// | `DATABASE_POOL_SIZE`   | `4`                       |
/// | `TEMPLATE_DIR`         | `issue_template`          |
/// | `REQUEST_TIMEOUT_SECS` | `10`                      |
/// | `APPLY_SCHEMA`         | `false`                   |
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// GitHub REST API base URL.
    pub github_api_url: String,
    /// Token used to open and close issues.
    pub github_token: String,
    /// Language detection resource endpoint.
    pub language_endpoint: String,
    /// Language detection subscription key.
    pub language_key: String,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled database connections, never zero.
    pub database_pool_size: u32,
    /// Directory holding `copilot-usage-<lang>.md` templates.
    pub template_dir: Utf8PathBuf,
    /// Timeout applied to outbound HTTP requests.
    pub request_timeout: Duration,
    /// Whether to create the survey table at start-up.
    pub apply_schema: bool,
}

impl BotConfig {
    /// Loads configuration from the process environment, after reading a
    /// `.env` file when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "failed to read .env file");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Lookup(lookup);
        Ok(Self {
            host: vars.optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: vars.parsed("PORT", DEFAULT_PORT)?,
            github_api_url: vars
                .optional("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_owned()),
            github_token: vars.required("GITHUB_TOKEN")?,
            language_endpoint: vars.required("LANGUAGE_ENDPOINT")?,
            language_key: vars.required("LANGUAGE_KEY")?,
            database_url: vars.required("DATABASE_URL")?,
            database_pool_size: vars
                .parsed::<NonZeroU32>("DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?
                .get(),
            template_dir: vars
                .optional("TEMPLATE_DIR")
                .map_or_else(|| Utf8PathBuf::from(DEFAULT_TEMPLATE_DIR), Utf8PathBuf::from),
            request_timeout: Duration::from_secs(
                vars.parsed("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            ),
            apply_schema: vars.parsed("APPLY_SCHEMA", false)?,
        })
    }

    /// Returns the `host:port` pair the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &"<redacted>")
            .field("language_endpoint", &self.language_endpoint)
            .field("language_key", &"<redacted>")
            .field("database_url", &"<redacted>")
            .field("database_pool_size", &self.database_pool_size)
            .field("template_dir", &self.template_dir)
            .field("request_timeout", &self.request_timeout)
            .field("apply_schema", &self.apply_schema)
            .finish()
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn parsed<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.optional(name).map_or(Ok(default), |value| {
            value.parse().map_err(|err: T::Err| ConfigError::Invalid {
                name,
                reason: err.to_string(),
                value,
            })
        })
    }
}
