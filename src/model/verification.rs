use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::model::OutletId;

/// An outlet article the reasoning service matched against the claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchedArticle {
    pub title: String,
    pub similarity: f64,
    pub url: String,
    pub publish_date: String,
    pub excerpt: String,
}

/// Cross-reference outcome for a claim.
///
/// Wire names are flat (`bbcVerified`, `cnnArticles`, ...) to match the schema the
/// reasoning service is asked to produce. Every field has a default so the object
/// is complete even when the reply was not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub bbc_verified: bool,
    pub bbc_similarity: f64,
    pub bbc_articles: Vec<MatchedArticle>,
    pub cnn_verified: bool,
    pub cnn_similarity: f64,
    pub cnn_articles: Vec<MatchedArticle>,
    pub abc_verified: bool,
    pub abc_similarity: f64,
    pub abc_articles: Vec<MatchedArticle>,
    pub guardian_verified: bool,
    pub guardian_similarity: f64,
    pub guardian_articles: Vec<MatchedArticle>,
    pub legitimacy_score: f64,
    pub topics: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub credibility_indicators: Vec<String>,
    pub red_flags: Vec<String>,
    pub overall_assessment: String,
}

/// Borrowed per-outlet slice of a [`VerificationResult`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutletVerification<'a> {
    pub verified: bool,
    pub similarity: f64,
    pub articles: &'a [MatchedArticle],
}

impl VerificationResult {
    pub fn outlet(&self, id: OutletId) -> OutletVerification<'_> {
        let (verified, similarity, articles) = match id {
            OutletId::Bbc => (self.bbc_verified, self.bbc_similarity, &self.bbc_articles),
            OutletId::Cnn => (self.cnn_verified, self.cnn_similarity, &self.cnn_articles),
            OutletId::Abc => (self.abc_verified, self.abc_similarity, &self.abc_articles),
            OutletId::Guardian => (
                self.guardian_verified,
                self.guardian_similarity,
                &self.guardian_articles,
            ),
        };

        OutletVerification {
            verified,
            similarity,
            articles,
        }
    }

    pub fn verified_outlets(&self) -> usize {
        OutletId::ALL
            .iter()
            .filter(|id| self.outlet(**id).verified)
            .count()
    }
}

/// The three scored dimensions of an analysis, each nominally 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub legitimacy: f64,
    pub relatability: f64,
    pub trustworthiness: f64,
}

/// Three-way discretization of the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Verified,
    Suspicious,
    Fake,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Verified => "VERIFIED",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Fake => "FAKE",
        };
        f.write_str(label)
    }
}

/// Weighted overall score and its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall_score: i64,
    pub overall_verdict: Verdict,
}
