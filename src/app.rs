//! Application state and service initialization
//!
//! Builds the verification service graph from [`Config`]. Credentials are validated
//! here once, so a misconfigured process never starts serving requests.

use std::sync::Arc;

use crate::model::{Config, ConfigError};
use crate::retriever::{NewsApiClient, NewsSearchClient};
use crate::service::{CorpusAggregator, GatewayReasoner, TextReasoner, VerificationService};

/// Application state shared with the Actix-web handlers
pub struct AppState {
    /// News verification pipeline
    pub verification_service: Arc<VerificationService>,
}

impl AppState {
    /// Validate configuration and build the service graph
    pub fn new(config: Config) -> Result<Self, AppError> {
        let credentials = config.credentials()?;

        let search_client: Arc<dyn NewsSearchClient> = Arc::new(NewsApiClient::new(
            &config.newsapi_base_url,
            &credentials.newsapi_key,
        ));

        let reasoner: Arc<dyn TextReasoner> = Arc::new(GatewayReasoner::new(
            &config.ai_gateway_url,
            &credentials.ai_gateway_api_key,
            &config.model,
        ));

        Ok(Self::with_clients(config, search_client, reasoner))
    }

    /// Build state around already-constructed clients
    pub fn with_clients(
        config: Config,
        search_client: Arc<dyn NewsSearchClient>,
        reasoner: Arc<dyn TextReasoner>,
    ) -> Self {
        let corpus = CorpusAggregator::new(config.outlets, search_client);
        let verification_service = Arc::new(VerificationService::new(
            corpus,
            reasoner,
            config.dimensions,
        ));

        Self {
            verification_service,
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingConfig(name) => AppError::MissingConfig(name),
            ConfigError::InvalidConfig { .. } => AppError::InvalidConfig(err.to_string()),
        }
    }
}
