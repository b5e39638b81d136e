use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

use crate::model::OutletId;

const ENV_CONFIG_PATH: &str = "NEWS_VERIFY_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
pub const ENV_AI_GATEWAY_API_KEY: &str = "AI_GATEWAY_API_KEY";

const DEFAULT_NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1";
const DEFAULT_VERIFICATION_MODEL: &str = "google/gemini-2.5-flash";

/// Results requested per search call, and the cap kept per outlet.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sibling dimension scores used when a caller supplies none.
pub const DEFAULT_RELATABILITY: f64 = 72.0;
pub const DEFAULT_TRUSTWORTHINESS: f64 = 68.0;

/// One way of asking the search API for an outlet's coverage of a query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Restrict results to the outlet's own domains.
    Domain,
    /// Unrestricted search with the outlet's name appended as a boost clause.
    Boosted { boost: String },
}

/// Outlet descriptor: everything that distinguishes one outlet's search from another
#[derive(Debug, Clone, Deserialize)]
pub struct OutletConfig {
    pub id: OutletId,
    /// Label used in logs and in the prompt's per-outlet counts
    pub display_name: String,
    /// Comma-separated domain filter, as the search API expects it
    pub domains: String,
    /// Attempted in order for every candidate query
    pub strategies: Vec<SearchStrategy>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl OutletConfig {
    fn new(id: OutletId, display_name: &str, domains: &str, strategies: Vec<SearchStrategy>) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            domains: domains.to_string(),
            strategies,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// The four reference outlets with their established strategy order
    pub fn defaults() -> Vec<OutletConfig> {
        let boosted = |boost: &str| SearchStrategy::Boosted {
            boost: boost.to_string(),
        };

        vec![
            Self::new(
                OutletId::Bbc,
                "BBC",
                "bbc.com,bbc.co.uk",
                vec![SearchStrategy::Domain, boosted(r#"(bbc.com OR "BBC")"#)],
            ),
            Self::new(
                OutletId::Cnn,
                "CNN",
                "cnn.com",
                vec![boosted(r#"(cnn.com OR "CNN")"#), SearchStrategy::Domain],
            ),
            Self::new(
                OutletId::Abc,
                "ABC News",
                "abcnews.go.com",
                vec![SearchStrategy::Domain, boosted(r#"(abcnews OR "ABC News")"#)],
            ),
            Self::new(
                OutletId::Guardian,
                "Guardian",
                "theguardian.com",
                vec![
                    SearchStrategy::Domain,
                    boosted(r#"(theguardian OR "The Guardian")"#),
                ],
            ),
        ]
    }
}

/// Default scores for the dimensions computed outside this service
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DimensionDefaults {
    #[serde(default = "default_relatability")]
    pub relatability: f64,
    #[serde(default = "default_trustworthiness")]
    pub trustworthiness: f64,
}

fn default_relatability() -> f64 {
    DEFAULT_RELATABILITY
}

fn default_trustworthiness() -> f64 {
    DEFAULT_TRUSTWORTHINESS
}

impl Default for DimensionDefaults {
    fn default() -> Self {
        Self {
            relatability: DEFAULT_RELATABILITY,
            trustworthiness: DEFAULT_TRUSTWORTHINESS,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub outlets: Option<Vec<OutletConfig>>,
    #[serde(default)]
    pub dimensions: Option<DimensionDefaults>,
}

/// Credentials required before any request can be served
#[derive(Debug, Clone)]
pub struct Credentials {
    pub newsapi_key: String,
    pub ai_gateway_api_key: String,
}

/// Missing or unusable settings detected at startup
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} not configured")]
    MissingConfig(&'static str),

    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub newsapi_key: Option<String>,
    pub newsapi_base_url: String,
    pub ai_gateway_api_key: Option<String>,
    pub ai_gateway_url: String,
    pub model: String,
    pub outlets: Vec<OutletConfig>,
    pub dimensions: DimensionDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            newsapi_key: None,
            newsapi_base_url: DEFAULT_NEWSAPI_BASE_URL.to_string(),
            ai_gateway_api_key: None,
            ai_gateway_url: DEFAULT_AI_GATEWAY_URL.to_string(),
            model: DEFAULT_VERIFICATION_MODEL.to_string(),
            outlets: OutletConfig::defaults(),
            dimensions: DimensionDefaults::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            port,
            host,
            newsapi_key: non_empty_var(ENV_NEWSAPI_KEY),
            newsapi_base_url: std::env::var("NEWSAPI_BASE_URL")
                .unwrap_or(defaults.newsapi_base_url),
            ai_gateway_api_key: non_empty_var(ENV_AI_GATEWAY_API_KEY),
            ai_gateway_url: std::env::var("AI_GATEWAY_URL").unwrap_or(defaults.ai_gateway_url),
            model: std::env::var("VERIFICATION_MODEL").unwrap_or(defaults.model),
            outlets: file.outlets.unwrap_or(defaults.outlets),
            dimensions: file.dimensions.unwrap_or(defaults.dimensions),
        }
    }

    /// Validate every required setting in one place
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let newsapi_key = self
            .newsapi_key
            .clone()
            .ok_or(ConfigError::MissingConfig(ENV_NEWSAPI_KEY))?;
        let ai_gateway_api_key = self
            .ai_gateway_api_key
            .clone()
            .ok_or(ConfigError::MissingConfig(ENV_AI_GATEWAY_API_KEY))?;

        check_url("NEWSAPI_BASE_URL", &self.newsapi_base_url)?;
        check_url("AI_GATEWAY_URL", &self.ai_gateway_url)?;

        if self.outlets.is_empty() {
            return Err(ConfigError::InvalidConfig {
                name: "outlets",
                reason: "at least one outlet is required".to_string(),
            });
        }

        Ok(Credentials {
            newsapi_key,
            ai_gateway_api_key,
        })
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidConfig {
            name,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            newsapi_key: Some("news-key".to_string()),
            ai_gateway_api_key: Some("gateway-key".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_credentials_present() {
        let creds = configured().credentials().unwrap();
        assert_eq!(creds.newsapi_key, "news-key");
        assert_eq!(creds.ai_gateway_api_key, "gateway-key");
    }

    #[test]
    fn test_missing_newsapi_key_is_named() {
        let config = Config {
            newsapi_key: None,
            ..configured()
        };
        assert_eq!(
            config.credentials().unwrap_err(),
            ConfigError::MissingConfig("NEWSAPI_KEY")
        );
    }

    #[test]
    fn test_missing_gateway_key_is_named() {
        let config = Config {
            ai_gateway_api_key: None,
            ..configured()
        };
        let err = config.credentials().unwrap_err();
        assert_eq!(err.to_string(), "AI_GATEWAY_API_KEY not configured");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = Config {
            newsapi_base_url: "not a url".to_string(),
            ..configured()
        };
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::InvalidConfig {
                name: "NEWSAPI_BASE_URL",
                ..
            })
        ));
    }

    #[test]
    fn test_default_outlets() {
        let outlets = OutletConfig::defaults();
        let ids: Vec<_> = outlets.iter().map(|o| o.id).collect();
        assert_eq!(
            ids,
            vec![OutletId::Bbc, OutletId::Cnn, OutletId::Abc, OutletId::Guardian]
        );
        assert!(outlets.iter().all(|o| o.strategies.len() == 2));
        assert!(outlets.iter().all(|o| o.page_size == 10));
        // CNN tries the boosted query before the domain filter
        assert!(matches!(
            outlets[1].strategies[0],
            SearchStrategy::Boosted { .. }
        ));
    }

    #[test]
    fn test_parse_outlet_file() {
        let yaml = r#"
outlets:
  - id: bbc
    display_name: BBC
    domains: bbc.com
    strategies:
      - kind: domain
      - kind: boosted
        boost: '(bbc.com OR "BBC")'
dimensions:
  relatability: 50
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let outlets = file.outlets.unwrap();
        assert_eq!(outlets.len(), 1);
        assert_eq!(outlets[0].page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(outlets[0].strategies[0], SearchStrategy::Domain);

        let dims = file.dimensions.unwrap();
        assert_eq!(dims.relatability, 50.0);
        assert_eq!(dims.trustworthiness, DEFAULT_TRUSTWORTHINESS);
    }
}
