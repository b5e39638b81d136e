//! REST API endpoints for news verification

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{
    Claim, DimensionScores, MatchedArticle, ScoreSummary, Verdict, VerificationResult,
};
use crate::service::{NewsAnalysis, VerificationService, aggregate_scores};

/// News content submitted for verification
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Claim text; the first non-empty line is treated as the headline
    pub news_content: Option<String>,
    /// Where the user found the content
    pub source_url: Option<String>,
}

/// News content plus optional scores for the sibling dimensions
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub news_content: Option<String>,
    pub source_url: Option<String>,
    /// Relatability score (0-100); configured default when absent
    pub relatability: Option<f64>,
    /// Trustworthiness score (0-100); configured default when absent
    pub trustworthiness: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub verification: VerificationResult,
    pub dimensions: DimensionScores,
    pub overall_score: i64,
    pub overall_verdict: Verdict,
}

impl From<NewsAnalysis> for AnalyzeResponse {
    fn from(analysis: NewsAnalysis) -> Self {
        Self {
            verification: analysis.verification,
            dimensions: analysis.dimensions,
            overall_score: analysis.summary.overall_score,
            overall_verdict: analysis.summary.overall_verdict,
        }
    }
}

fn claim_from(news_content: Option<String>, source_url: Option<String>) -> Claim {
    Claim::new(news_content.unwrap_or_default(), source_url)
}

/// Cross-reference news content against BBC, CNN, ABC News and The Guardian
#[utoipa::path(
    post,
    path = "/v1/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification completed", body = VerificationResult),
        (status = 400, description = "News content is missing or body is malformed", body = ErrorResponse),
        (status = 502, description = "Reasoning service failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "verification"
)]
#[post("/v1/verify")]
pub async fn verify_news(
    service: web::Data<VerificationService>,
    request: web::Json<VerifyRequest>,
) -> Result<HttpResponse, ApiError> {
    let VerifyRequest {
        news_content,
        source_url,
    } = request.into_inner();

    let result = service.verify(&claim_from(news_content, source_url)).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Verify news content and combine legitimacy with relatability and trustworthiness
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "News content is missing or body is malformed", body = ErrorResponse),
        (status = 502, description = "Reasoning service failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "verification"
)]
#[post("/v1/analyze")]
pub async fn analyze_news(
    service: web::Data<VerificationService>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let AnalyzeRequest {
        news_content,
        source_url,
        relatability,
        trustworthiness,
    } = request.into_inner();

    let analysis = service
        .analyze(
            &claim_from(news_content, source_url),
            relatability,
            trustworthiness,
        )
        .await?;

    Ok(HttpResponse::Ok().json(AnalyzeResponse::from(analysis)))
}

/// Combine three dimension scores into an overall score and verdict
#[utoipa::path(
    post,
    path = "/v1/score",
    request_body = DimensionScores,
    responses(
        (status = 200, description = "Score computed", body = ScoreSummary),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    ),
    tag = "verification"
)]
#[post("/v1/score")]
pub async fn score(request: web::Json<DimensionScores>) -> HttpResponse {
    HttpResponse::Ok().json(aggregate_scores(&request))
}

#[derive(OpenApi)]
#[openapi(
    paths(verify_news, analyze_news, score, crate::api::health::liveness),
    components(schemas(
        VerifyRequest,
        AnalyzeRequest,
        AnalyzeResponse,
        VerificationResult,
        MatchedArticle,
        DimensionScores,
        ScoreSummary,
        Verdict,
        ErrorResponse,
        crate::api::health::HealthStatus
    )),
    tags(
        (name = "verification", description = "News cross-reference verification"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "News Verify API",
        description = "Cross-references news claims against major outlets and scores their legitimacy"
    )
)]
pub struct ApiDoc;

/// Configure verification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    // malformed bodies get the same error shape as every other failure
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config)
        .service(verify_news)
        .service(analyze_news)
        .service(score);
}
