//! Environment-based configuration.
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `MAILFORM_API_URL` | Yes | Base URL of the mail API, e.g. `https://mail.example.com` |

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Prefix for every variable read by [`ApiConfig::load`].
pub const ENV_PREFIX: &str = "MAILFORM";

/// Path appended to the configured base URL.
pub const SEND_PATH: &str = "/api/mail/send";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading environment: {0}")]
    Env(#[from] config::ConfigError),

    #[error("invalid API URL {url:?}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
}

pub trait EnvConfig: Sized {
    fn from_env() -> Result<Self, config::ConfigError>;
    fn from_env_with_prefix(prefix: &str) -> Result<Self, config::ConfigError>;
}

impl<D> EnvConfig for D
where
    D: DeserializeOwned,
{
    fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix(prefix))
            .build()?
            .try_deserialize()
    }
}

/// Where submissions are sent.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the mail API. [`SEND_PATH`] is appended to it.
    pub api_url: String,
}

impl ApiConfig {
    /// Create a config from an explicit base URL.
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            api_url: api_url.into(),
        };
        config.endpoint()?;
        Ok(config)
    }

    /// Create a config from `MAILFORM_*` environment variables, reading `.env` first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::from_env_with_prefix(ENV_PREFIX)?;
        config.endpoint()?;
        Ok(config)
    }

    /// The full URL submissions are posted to.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = format!("{}{}", self.api_url.trim_end_matches('/'), SEND_PATH);
        Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_send_path() {
        let config = ApiConfig::new("http://localhost:5000").unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://localhost:5000/api/mail/send"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_and_tolerates_trailing_slash() {
        let config = ApiConfig::new("https://example.com/mailer/").unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://example.com/mailer/api/mail/send"
        );
    }

    #[test]
    fn rejects_relative_url() {
        let err = ApiConfig::new("localhost").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
