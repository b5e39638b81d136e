//! Weighted overall score and verdict

use crate::model::{DimensionScores, ScoreSummary, Verdict};

pub const LEGITIMACY_WEIGHT: f64 = 0.55;
pub const RELATABILITY_WEIGHT: f64 = 0.30;
pub const TRUSTWORTHINESS_WEIGHT: f64 = 0.15;

/// Lowest overall score that is still VERIFIED
pub const VERIFIED_THRESHOLD: i64 = 75;
/// Lowest overall score that is still SUSPICIOUS
pub const SUSPICIOUS_THRESHOLD: i64 = 50;

/// Blend the three dimensions into one score and classify it.
///
/// Inputs are expected in 0-100 and are not clamped.
pub fn aggregate_scores(scores: &DimensionScores) -> ScoreSummary {
    let blended = scores.legitimacy * LEGITIMACY_WEIGHT
        + scores.relatability * RELATABILITY_WEIGHT
        + scores.trustworthiness * TRUSTWORTHINESS_WEIGHT;

    // half-up rounding, so x.5 always rounds toward +inf
    let overall_score = (blended + 0.5).floor() as i64;

    ScoreSummary {
        overall_score,
        overall_verdict: verdict_for(overall_score),
    }
}

pub fn verdict_for(overall_score: i64) -> Verdict {
    if overall_score >= VERIFIED_THRESHOLD {
        Verdict::Verified
    } else if overall_score >= SUSPICIOUS_THRESHOLD {
        Verdict::Suspicious
    } else {
        Verdict::Fake
    }
}
