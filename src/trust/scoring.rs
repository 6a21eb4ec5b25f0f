use crate::domain::{ProfileSnapshot, ScoreResult, TrustTier};

/// How many trusted accounts must follow a profile before the vouch bonus
/// applies. The vouch count itself is always zero on the free API tier, so
/// this path stays dormant until a richer data source exists.
pub const MIN_TRUSTED_FOLLOWERS: usize = 3;

#[derive(Debug, Default)]
struct Accumulator {
    score: i64,
    reasons: Vec<String>,
}

/// Derives the trust score for a snapshot. Pure and deterministic; the rules
/// run in a fixed order because the trusted-list rule overrides everything
/// accumulated before it.
pub fn score(snapshot: &ProfileSnapshot, min_vouches: usize) -> ScoreResult {
    let rules: [&dyn Fn(&ProfileSnapshot, Accumulator) -> Accumulator; 5] = [
        &account_age,
        &follower_count,
        &follower_ratio,
        &verified,
        &|snapshot, acc| trusted_standing(snapshot, min_vouches, acc),
    ];

    let mut acc = Accumulator::default();
    for rule in rules {
        acc = rule(snapshot, acc);
    }

    let score = acc.score.clamp(0, 100) as u32;
    ScoreResult {
        score,
        tier: TrustTier::from_score(score),
        reasons: acc.reasons,
    }
}

fn account_age(snapshot: &ProfileSnapshot, mut acc: Accumulator) -> Accumulator {
    if snapshot.account_age_days > 365 {
        acc.score += 25;
        acc.reasons.push("✅ Account age > 1 year".to_string());
    }
    acc
}

// Silent bonus: counts toward the score but is not worth calling out.
fn follower_count(snapshot: &ProfileSnapshot, mut acc: Accumulator) -> Accumulator {
    if snapshot.followers > 1000 {
        acc.score += 15;
    }
    acc
}

fn follower_ratio(snapshot: &ProfileSnapshot, mut acc: Accumulator) -> Accumulator {
    if snapshot.follower_ratio > 2.0 {
        acc.score += 20;
        acc.reasons
            .push("✅ Follower/Following ratio > 2".to_string());
    }
    acc
}

fn verified(snapshot: &ProfileSnapshot, mut acc: Accumulator) -> Accumulator {
    if snapshot.is_verified {
        acc.score += 25;
        acc.reasons.push("✅ Verified Account".to_string());
    }
    acc
}

/// List membership resets the score to exactly 100 instead of adding to it.
fn trusted_standing(
    snapshot: &ProfileSnapshot,
    min_vouches: usize,
    mut acc: Accumulator,
) -> Accumulator {
    if snapshot.is_on_trusted_list {
        acc.score = 100;
        acc.reasons
            .push("🚀 RUGGUARD Trusted List Member!".to_string());
    } else if snapshot.vouched_by_count >= min_vouches {
        acc.score += 50;
        acc.reasons.push(format!(
            "🔥 Vouched by {} trusted accounts!",
            snapshot.vouched_by_count
        ));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            handle: "example".to_string(),
            display_name: "Example".to_string(),
            id: "42".to_string(),
            account_age_days: 0,
            created_at_label: "Jan 2024".to_string(),
            is_verified: false,
            bio: None,
            followers: 0,
            following: 0,
            follower_ratio: 0.0,
            tweet_count: 0,
            is_on_trusted_list: false,
            vouched_by_count: 0,
            trusted_check_note: None,
        }
    }

    #[test]
    fn established_account_scores_medium() {
        let result = score(
            &ProfileSnapshot {
                account_age_days: 400,
                followers: 5000,
                following: 100,
                follower_ratio: 50.0,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(result.score, 60);
        assert_eq!(result.tier, TrustTier::Medium);
        assert_eq!(result.reasons.len(), 2);
    }

    #[test]
    fn verification_lifts_established_account_to_very_high() {
        let result = score(
            &ProfileSnapshot {
                account_age_days: 400,
                followers: 5000,
                following: 100,
                follower_ratio: 50.0,
                is_verified: true,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(result.score, 85);
        assert_eq!(result.tier, TrustTier::VeryHigh);
    }

    #[test]
    fn trusted_list_member_always_scores_exactly_100() {
        let bare = score(
            &ProfileSnapshot {
                is_on_trusted_list: true,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(bare.score, 100);
        assert_eq!(bare.tier, TrustTier::VeryHigh);

        // Membership overrides every earlier bonus, and the clamp keeps the
        // total inside 0..=100 regardless.
        let maxed = score(
            &ProfileSnapshot {
                account_age_days: 4000,
                followers: 2_000_000,
                following: 10,
                follower_ratio: 200_000.0,
                is_verified: true,
                is_on_trusted_list: true,
                vouched_by_count: 50,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(maxed.score, 100);
        assert!(maxed
            .reasons
            .iter()
            .any(|r| r.contains("Trusted List Member")));
    }

    #[test]
    fn vouch_bonus_applies_at_threshold_for_non_members() {
        let result = score(
            &ProfileSnapshot {
                vouched_by_count: 3,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(result.score, 50);
        assert_eq!(result.reasons, vec!["🔥 Vouched by 3 trusted accounts!"]);

        let below = score(
            &ProfileSnapshot {
                vouched_by_count: 2,
                ..snapshot()
            },
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(below.score, 0);
    }

    #[test]
    fn no_triggered_rules_leaves_reasons_empty() {
        let result = score(&snapshot(), MIN_TRUSTED_FOLLOWERS);
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, TrustTier::Low);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn tier_boundaries_are_closed_above() {
        assert_eq!(TrustTier::from_score(100), TrustTier::VeryHigh);
        assert_eq!(TrustTier::from_score(85), TrustTier::VeryHigh);
        assert_eq!(TrustTier::from_score(84), TrustTier::High);
        assert_eq!(TrustTier::from_score(65), TrustTier::High);
        assert_eq!(TrustTier::from_score(64), TrustTier::Medium);
        assert_eq!(TrustTier::from_score(40), TrustTier::Medium);
        assert_eq!(TrustTier::from_score(39), TrustTier::Low);
        assert_eq!(TrustTier::from_score(0), TrustTier::Low);
    }
}
