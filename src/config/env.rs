use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub x_api: XApiConfig,
    pub bot: BotConfig,
    pub trust: TrustConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

/// Credentials for the X API v2. The app-only bearer token covers user and
/// tweet lookups plus the filtered stream; posting a reply needs a
/// user-context OAuth2 access token.
#[derive(Debug, Clone)]
pub struct XApiConfig {
    pub bearer_token: String,
    pub user_access_token: String,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub username: String,
    pub trigger_phrase: String,
}

#[derive(Debug, Clone)]
pub struct TrustConfig {
    pub list_url: Url,
    pub cache_ttl: Duration,
    pub min_trusted_followers: usize,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}
