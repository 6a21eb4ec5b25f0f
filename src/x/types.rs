use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RawProfile, StreamEvent};

#[derive(Debug, Deserialize)]
pub struct UserLookupResponse {
    pub data: Option<UserObject>,
}

#[derive(Debug, Deserialize)]
pub struct UserObject {
    pub id: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public_metrics: PublicMetrics,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
}

impl From<UserObject> for RawProfile {
    fn from(user: UserObject) -> Self {
        Self {
            id: user.id,
            handle: user.username,
            display_name: user.name,
            created_at: user.created_at,
            verified: user.verified,
            // An empty description means no bio.
            bio: user.description.filter(|bio| !bio.trim().is_empty()),
            followers: user.public_metrics.followers_count,
            following: user.public_metrics.following_count,
            tweet_count: user.public_metrics.tweet_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TweetLookupResponse {
    pub data: Option<TweetObject>,
}

#[derive(Debug, Deserialize)]
pub struct TweetObject {
    #[serde(default)]
    pub author_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
    pub reply: ReplyTarget,
}

#[derive(Debug, Serialize)]
pub struct ReplyTarget {
    pub in_reply_to_tweet_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RulesResponse {
    #[serde(default)]
    pub data: Vec<StreamRule>,
}

#[derive(Debug, Deserialize)]
pub struct StreamRule {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct AddRulesRequest {
    pub add: Vec<RuleSpec>,
}

#[derive(Debug, Serialize)]
pub struct RuleSpec {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteRulesRequest {
    pub delete: RuleIds,
}

#[derive(Debug, Serialize)]
pub struct RuleIds {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamPayload {
    pub data: StreamEvent,
}
