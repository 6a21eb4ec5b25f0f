use std::{env, time::Duration};

use url::Url;

use super::env::{
    AppConfig, BotConfig, ConfigError, DirectoryConfig, LoggingConfig, TrustConfig, XApiConfig,
};
use crate::trust::scoring::MIN_TRUSTED_FOLLOWERS;

const DEFAULT_TRUSTED_LIST_URL: &str = "https://raw.githubusercontent.com/devsyrem/turst-list/main/list";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let x_api = XApiConfig {
            bearer_token: require("X_BEARER_TOKEN")?,
            user_access_token: require("X_USER_ACCESS_TOKEN")?,
        };

        let bot = BotConfig {
            username: env::var("BOT_USERNAME").unwrap_or_else(|_| "projectruggaurd".to_string()),
            trigger_phrase: env::var("TRIGGER_PHRASE")
                .unwrap_or_else(|_| "riddle me this".to_string()),
        };

        let list_url = env::var("TRUSTED_LIST_URL")
            .unwrap_or_else(|_| DEFAULT_TRUSTED_LIST_URL.to_string());
        let trust = TrustConfig {
            list_url: Url::parse(&list_url).map_err(|source| ConfigError::InvalidUrl {
                key: "TRUSTED_LIST_URL",
                source,
            })?,
            cache_ttl: Duration::from_secs(
                env::var("TRUST_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
            min_trusted_followers: env::var("MIN_TRUSTED_FOLLOWERS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(MIN_TRUSTED_FOLLOWERS),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            x_api,
            bot,
            trust,
            directories,
            logging,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}
