use crate::domain::{AnalysisOutcome, ProfileSnapshot, ScoreResult};

use super::scoring;

const NO_SIGNALS: &str = "No strong signals detected.";
const DIVIDER: &str = "-----------------------------------";
const FOOTER: &str = "A bot by #ProjectRUGGUARD";

/// Renders the final reply text. Failures become a single apology line;
/// reports are scored and templated. Nothing downstream parses this text.
pub fn render(outcome: &AnalysisOutcome, min_vouches: usize) -> String {
    match outcome {
        AnalysisOutcome::Failure(error) => format!("🤖 Analysis failed. {error}"),
        AnalysisOutcome::Report(snapshot) => {
            let result = scoring::score(snapshot, min_vouches);
            render_report(snapshot, &result)
        }
    }
}

fn render_report(snapshot: &ProfileSnapshot, result: &ScoreResult) -> String {
    let reasons = if result.reasons.is_empty() {
        NO_SIGNALS.to_string()
    } else {
        result.reasons.join(" | ")
    };

    // Bio content is deliberately never echoed back, only its presence.
    let bio = if snapshot.bio.is_some() { "Present" } else { "Empty" };
    let note = snapshot.trusted_check_note.as_deref().unwrap_or("");

    let body = format!(
        "🤖 Trustworthiness Analysis for @{handle}\n\
         {DIVIDER}\n\
         📊 Trust Level: {tier} ({score}/100)\n\
         \n\
         📝 Summary:\n\
         - Account Age: {age} days (Created {created})\n\
         - Followers: {followers} | Following: {following}\n\
         - Bio: {bio}\n\
         \n\
         💡 Key Signals:\n\
         {reasons}\n\
         \n\
         {note}\n\
         {DIVIDER}\n\
         {FOOTER}",
        handle = snapshot.handle,
        tier = result.tier,
        score = result.score,
        age = snapshot.account_age_days,
        created = snapshot.created_at_label,
        followers = snapshot.followers,
        following = snapshot.following,
    );
    tidy(&body)
}

// Each line trimmed independently, no blank first or last line.
fn tidy(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use crate::domain::TrustTier;
    use crate::trust::analyzer::TRUSTED_CHECK_NOTE;
    use crate::trust::scoring::MIN_TRUSTED_FOLLOWERS;

    use super::*;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            handle: "somebuilder".to_string(),
            display_name: "Some Builder".to_string(),
            id: "42".to_string(),
            account_age_days: 400,
            created_at_label: "Mar 2020".to_string(),
            is_verified: false,
            bio: Some("shipping daily".to_string()),
            followers: 5000,
            following: 100,
            follower_ratio: 50.0,
            tweet_count: 900,
            is_on_trusted_list: false,
            vouched_by_count: 0,
            trusted_check_note: Some(TRUSTED_CHECK_NOTE.to_string()),
        }
    }

    #[test]
    fn failure_renders_a_single_apology_line() {
        let text = render(
            &AnalysisOutcome::Failure("User not found.".to_string()),
            MIN_TRUSTED_FOLLOWERS,
        );
        assert_eq!(text, "🤖 Analysis failed. User not found.");
    }

    #[test]
    fn report_includes_score_tier_and_reasons() {
        let text = render(
            &AnalysisOutcome::Report(snapshot()),
            MIN_TRUSTED_FOLLOWERS,
        );
        assert!(text.contains("@somebuilder"));
        assert!(text.contains(&format!("{} (60/100)", TrustTier::Medium)));
        assert!(text.contains("Account Age: 400 days (Created Mar 2020)"));
        assert!(text.contains("Followers: 5000 | Following: 100"));
        assert!(text.contains("✅ Account age > 1 year | ✅ Follower/Following ratio > 2"));
        assert!(text.contains(TRUSTED_CHECK_NOTE));
        assert!(text.ends_with(FOOTER));
    }

    #[test]
    fn bio_presence_is_reported_without_its_content() {
        let text = render(
            &AnalysisOutcome::Report(snapshot()),
            MIN_TRUSTED_FOLLOWERS,
        );
        assert!(text.contains("Bio: Present"));
        assert!(!text.contains("shipping daily"));

        let empty_bio = ProfileSnapshot {
            bio: None,
            ..snapshot()
        };
        let text = render(&AnalysisOutcome::Report(empty_bio), MIN_TRUSTED_FOLLOWERS);
        assert!(text.contains("Bio: Empty"));
    }

    #[test]
    fn quiet_profile_falls_back_to_the_no_signals_phrase() {
        let quiet = ProfileSnapshot {
            account_age_days: 10,
            created_at_label: "Jan 2026".to_string(),
            followers: 3,
            following: 50,
            follower_ratio: 0.06,
            ..snapshot()
        };
        let text = render(&AnalysisOutcome::Report(quiet), MIN_TRUSTED_FOLLOWERS);
        assert!(text.contains(NO_SIGNALS));
    }

    #[test]
    fn output_has_no_padding_whitespace() {
        let text = render(
            &AnalysisOutcome::Report(snapshot()),
            MIN_TRUSTED_FOLLOWERS,
        );
        assert!(!text.starts_with('\n'));
        assert!(!text.ends_with('\n'));
        for line in text.lines() {
            assert_eq!(line, line.trim(), "line should carry no edge whitespace");
        }
    }
}
