use std::fmt;

/// Ordinal trust label derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustTier {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl TrustTier {
    /// Thresholds are closed-above and checked high to low; first match wins.
    pub fn from_score(score: u32) -> Self {
        if score >= 85 {
            TrustTier::VeryHigh
        } else if score >= 65 {
            TrustTier::High
        } else if score >= 40 {
            TrustTier::Medium
        } else {
            TrustTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrustTier::VeryHigh => "Very High 🟢",
            TrustTier::High => "High 🟡",
            TrustTier::Medium => "Medium 🟠",
            TrustTier::Low => "Low 🔴",
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub score: u32,
    pub tier: TrustTier,
    pub reasons: Vec<String>,
}
