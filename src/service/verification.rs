//! News verification pipeline
//!
//! Claim text -> search terms -> concurrent outlet searches -> prompt ->
//! reasoning service -> normalized result. Nothing is kept between calls.

use std::sync::Arc;
use std::time::Instant;

use crate::model::{
    Claim, DimensionDefaults, DimensionScores, OutletId, ScoreSummary, VerificationResult,
};
use crate::service::corpus::CorpusAggregator;
use crate::service::llm::{ReasonerError, TextReasoner};
use crate::service::normalizer::{NormalizeError, normalize_reply};
use crate::service::prompts::build_verification_prompt;
use crate::service::scoring::aggregate_scores;
use crate::service::terms::extract_search_terms;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VerificationError {
    #[error("News content is required")]
    MissingContent,

    #[error("Reasoning call failed: {0}")]
    Reasoning(#[from] ReasonerError),

    #[error(transparent)]
    InvalidOutput(#[from] NormalizeError),
}

/// Verification plus the combined three-dimension score
#[derive(Debug, Clone, PartialEq)]
pub struct NewsAnalysis {
    pub verification: VerificationResult,
    pub dimensions: DimensionScores,
    pub summary: ScoreSummary,
}

/// Entry point for verifying a claim against the configured outlets
pub struct VerificationService {
    corpus: CorpusAggregator,
    reasoner: Arc<dyn TextReasoner>,
    dimension_defaults: DimensionDefaults,
}

impl VerificationService {
    pub fn new(
        corpus: CorpusAggregator,
        reasoner: Arc<dyn TextReasoner>,
        dimension_defaults: DimensionDefaults,
    ) -> Self {
        tracing::info!(
            outlets = corpus.outlet_count(),
            model = %reasoner.model(),
            "Verification service initialized"
        );
        Self {
            corpus,
            reasoner,
            dimension_defaults,
        }
    }

    /// Verify a claim. Returns a complete result or an error, never a partial result.
    pub async fn verify(&self, claim: &Claim) -> Result<VerificationResult, VerificationError> {
        if claim.text.trim().is_empty() {
            return Err(VerificationError::MissingContent);
        }

        tracing::info!(
            content_length = claim.text.len(),
            has_url = claim.source_url.is_some(),
            "Verifying news content"
        );

        let terms = extract_search_terms(&claim.text);
        tracing::debug!(
            headline = %terms.headline,
            entities = ?terms.entities,
            keywords = ?terms.keywords,
            "Derived search terms"
        );

        let corpus = self.corpus.collect(&terms).await;
        let prompt = build_verification_prompt(claim, &corpus);

        let start_time = Instant::now();
        let reply = match self.reasoner.generate(&prompt).await {
            Ok(reply) => {
                tracing::info!(
                    model = %self.reasoner.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt.user.len(),
                    articles = corpus.len(),
                    "Reasoning call completed"
                );
                reply
            }
            Err(e) => {
                tracing::error!(
                    model = %self.reasoner.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Reasoning call failed"
                );
                return Err(e.into());
            }
        };

        let result = normalize_reply(&reply)?;

        for id in OutletId::ALL {
            let outlet = result.outlet(id);
            tracing::debug!(
                outlet = %id,
                verified = outlet.verified,
                similarity = outlet.similarity,
                matched = outlet.articles.len(),
                "Outlet verification"
            );
        }

        tracing::info!(
            verified_outlets = result.verified_outlets(),
            legitimacy_score = result.legitimacy_score,
            "Verification complete"
        );

        Ok(result)
    }

    /// Verify a claim and blend its legitimacy with the sibling dimensions.
    /// Dimensions not supplied fall back to the configured defaults.
    pub async fn analyze(
        &self,
        claim: &Claim,
        relatability: Option<f64>,
        trustworthiness: Option<f64>,
    ) -> Result<NewsAnalysis, VerificationError> {
        let verification = self.verify(claim).await?;

        let dimensions = DimensionScores {
            legitimacy: verification.legitimacy_score,
            relatability: relatability.unwrap_or(self.dimension_defaults.relatability),
            trustworthiness: trustworthiness.unwrap_or(self.dimension_defaults.trustworthiness),
        };
        let summary = aggregate_scores(&dimensions);

        tracing::info!(
            overall_score = summary.overall_score,
            verdict = %summary.overall_verdict,
            "Analysis complete"
        );

        Ok(NewsAnalysis {
            verification,
            dimensions,
            summary,
        })
    }
}
