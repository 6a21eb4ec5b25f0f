use std::{future::Future, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::{AnalysisOutcome, ProfileSnapshot, RawProfile};

use super::cache::{ListSource, TrustedList, TrustedListCache};

/// Cross-referencing who actually follows an account needs 'Basic' tier API
/// access, which this deployment does not have. Documented limitation.
pub const TRUSTED_CHECK_NOTE: &str =
    "Follower check requires 'Basic' tier X API access or higher.";

/// Where raw profiles come from. `Ok(None)` means the account does not exist
/// (or is suspended); `Err` is an upstream failure.
pub trait ProfileSource: Send + Sync {
    fn profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = anyhow::Result<Option<RawProfile>>> + Send;
}

pub struct ProfileAnalyzer<P, S> {
    profiles: P,
    trusted: Arc<TrustedListCache<S>>,
}

impl<P: ProfileSource, S: ListSource> ProfileAnalyzer<P, S> {
    pub fn new(profiles: P, trusted: Arc<TrustedListCache<S>>) -> Self {
        Self { profiles, trusted }
    }

    /// Fetches and normalizes one account. Every failure mode collapses into
    /// an `AnalysisOutcome::Failure` with a user-facing message; nothing here
    /// can abort the triggering flow.
    pub async fn analyze(&self, user_id: &str) -> AnalysisOutcome {
        let raw = match self.profiles.profile(user_id).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return AnalysisOutcome::Failure("User not found.".to_string()),
            Err(err) => {
                tracing::warn!(target: "analysis", user_id, error = %err, "profile fetch failed");
                return AnalysisOutcome::Failure(format!(
                    "Failed to fetch user data from X. The account might be protected. (Error: {err})"
                ));
            }
        };

        tracing::info!(target: "analysis", user_id, handle = %raw.handle, "analyzing account");
        let trusted = self.trusted.get().await;
        let snapshot = build_snapshot(raw, &trusted, Utc::now());
        tracing::debug!(
            target: "analysis",
            id = %snapshot.id,
            display_name = %snapshot.display_name,
            tweets = snapshot.tweet_count,
            "profile snapshot built"
        );
        AnalysisOutcome::Report(snapshot)
    }
}

fn build_snapshot(raw: RawProfile, trusted: &TrustedList, now: DateTime<Utc>) -> ProfileSnapshot {
    let account_age_days = now.signed_duration_since(raw.created_at).num_days().max(0);
    // Zero following would divide by zero; fall back to the raw follower
    // count so the ratio stays numeric.
    let follower_ratio = if raw.following > 0 {
        raw.followers as f64 / raw.following as f64
    } else {
        raw.followers as f64
    };

    let is_on_trusted_list = trusted.contains(&raw.handle);
    ProfileSnapshot {
        account_age_days,
        created_at_label: raw.created_at.format("%b %Y").to_string(),
        follower_ratio,
        is_on_trusted_list,
        // The list size stands in for a real voucher count: membership is a
        // maximal-confidence signal, and non-members stay at zero until
        // follower-level cross-referencing becomes possible.
        vouched_by_count: if is_on_trusted_list { trusted.len() } else { 0 },
        trusted_check_note: (!is_on_trusted_list).then(|| TRUSTED_CHECK_NOTE.to_string()),
        handle: raw.handle,
        display_name: raw.display_name,
        id: raw.id,
        is_verified: raw.verified,
        bio: raw.bio,
        followers: raw.followers,
        following: raw.following,
        tweet_count: raw.tweet_count,
    }
}
