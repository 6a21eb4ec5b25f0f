use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config::XApiConfig, domain::RawProfile, trust::ProfileSource};

use super::types::{
    CreateTweetRequest, ReplyTarget, TweetLookupResponse, TweetObject, UserLookupResponse,
};

pub const API_BASE: &str = "https://api.twitter.com/2";

#[derive(Debug, Error)]
pub enum XApiError {
    #[error("X API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("X API returned status {0}")]
    Status(StatusCode),
}

/// Thin wrapper over the X API v2 REST endpoints the bot needs. Lookups use
/// the app-only bearer token; posting uses the user-context token.
#[derive(Clone)]
pub struct XApiClient {
    pub(super) http: Client,
    pub(super) config: XApiConfig,
}

impl XApiClient {
    pub fn new(http: Client, config: XApiConfig) -> Self {
        Self { http, config }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<RawProfile>, XApiError> {
        let response = self
            .http
            .get(format!("{API_BASE}/users/{user_id}"))
            .bearer_auth(&self.config.bearer_token)
            .query(&[(
                "user.fields",
                "created_at,description,public_metrics,verified",
            )])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }

        let body: UserLookupResponse = response.json().await?;
        Ok(body.data.map(RawProfile::from))
    }

    pub async fn get_tweet(&self, tweet_id: &str) -> Result<Option<TweetObject>, XApiError> {
        let response = self
            .http
            .get(format!("{API_BASE}/tweets/{tweet_id}"))
            .bearer_auth(&self.config.bearer_token)
            .query(&[("expansions", "author_id")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }

        let body: TweetLookupResponse = response.json().await?;
        Ok(body.data)
    }

    pub async fn post_reply(&self, text: &str, in_reply_to: &str) -> Result<(), XApiError> {
        let request = CreateTweetRequest {
            text: text.to_string(),
            reply: ReplyTarget {
                in_reply_to_tweet_id: in_reply_to.to_string(),
            },
        };

        let response = self
            .http
            .post(format!("{API_BASE}/tweets"))
            .bearer_auth(&self.config.user_access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }
        Ok(())
    }
}

impl ProfileSource for XApiClient {
    async fn profile(&self, user_id: &str) -> anyhow::Result<Option<RawProfile>> {
        Ok(self.get_user(user_id).await?)
    }
}
