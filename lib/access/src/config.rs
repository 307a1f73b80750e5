//! Access-control configuration.
//!
//! Strongly-typed settings for the access core, loaded via the `config`
//! crate from environment variables.

use serde::Deserialize;

/// Configuration for the access-control core.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Minimum accepted secret length, in characters.
    #[serde(default = "default_min_secret_length")]
    pub min_secret_length: usize,

    /// Entry point unauthenticated navigations are redirected to.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_min_secret_length() -> usize {
    6
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            min_secret_length: default_min_secret_length(),
            login_path: default_login_path(),
        }
    }
}

impl AccessConfig {
    /// Loads configuration from `ACCESS`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse.
    pub fn from_env() -> landreg_core::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("ACCESS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
