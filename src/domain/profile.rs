use chrono::{DateTime, Utc};

/// Raw account data as returned by the platform, before analysis.
#[derive(Debug, Clone)]
pub struct RawProfile {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub verified: bool,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub tweet_count: u64,
}

/// Normalized view of one account at analysis time. Built once per trigger,
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub handle: String,
    pub display_name: String,
    pub id: String,
    pub account_age_days: i64,
    pub created_at_label: String,
    pub is_verified: bool,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub follower_ratio: f64,
    pub tweet_count: u64,
    pub is_on_trusted_list: bool,
    pub vouched_by_count: usize,
    pub trusted_check_note: Option<String>,
}

/// What the analyzer hands to the reply formatter: either a snapshot ready
/// for scoring, or a user-facing failure message.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Report(ProfileSnapshot),
    Failure(String),
}
