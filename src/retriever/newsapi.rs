//! NewsAPI `/v2/everything` search client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{NewsSearchClient, SearchError, SearchRequest};
use crate::model::Article;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Default, Deserialize)]
struct WireSource {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    #[serde(default)]
    source: WireSource,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        Article {
            source_name: wire.source.name.unwrap_or_default(),
            title: wire.title.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            content: wire.content.unwrap_or_default(),
            url: wire.url.unwrap_or_default(),
            published_at: wire.published_at.unwrap_or_default(),
        }
    }
}

/// Search client for newsapi.org
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", request.query.clone())];
        if let Some(domains) = &request.domains {
            params.push(("domains", domains.clone()));
        }
        params.push(("sortBy", request.sort_by.to_string()));
        params.push(("pageSize", request.page_size.to_string()));
        params.push(("language", request.language.to_string()));
        params.push(("apiKey", self.api_key.clone()));
        params
    }
}

/// Interpret an `/everything` reply. Error bodies carry `code` and `message`.
fn parse_everything(status: StatusCode, body: &str) -> Result<Vec<Article>, SearchError> {
    let parsed: Result<EverythingResponse, _> = serde_json::from_str(body);

    if !status.is_success() {
        let (code, message) = match parsed {
            Ok(resp) => (
                resp.code.unwrap_or_else(|| status.as_u16().to_string()),
                resp.message.unwrap_or_default(),
            ),
            Err(_) => (status.as_u16().to_string(), body.to_string()),
        };
        return Err(SearchError::Api { code, message });
    }

    let resp = parsed.map_err(|e| SearchError::ParseError(e.to_string()))?;

    if resp.status != "ok" {
        return Err(SearchError::Api {
            code: resp.code.unwrap_or_else(|| resp.status.clone()),
            message: resp.message.unwrap_or_default(),
        });
    }

    Ok(resp.articles.into_iter().map(Article::from).collect())
}

#[async_trait]
impl NewsSearchClient for NewsApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Article>, SearchError> {
        let url = format!("{}/everything", self.base_url);

        tracing::debug!(
            query = %request.query,
            domains = ?request.domains,
            "Querying NewsAPI"
        );

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(request))
            .header("User-Agent", "news-verify/1.0")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        parse_everything(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_articles() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": "bbc-news", "name": "BBC News"},
                    "author": null,
                    "title": "Storm batters coast",
                    "description": null,
                    "url": "https://www.bbc.com/news/1",
                    "publishedAt": "2024-05-01T10:00:00Z",
                    "content": "Heavy rain..."
                },
                {
                    "source": {"id": null, "name": "CNN"},
                    "title": "Second",
                    "url": "https://cnn.com/2",
                    "publishedAt": "2024-05-02T10:00:00Z"
                }
            ]
        }"#;

        let articles = parse_everything(StatusCode::OK, body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_name, "BBC News");
        assert_eq!(articles[0].description, "");
        assert_eq!(articles[0].content, "Heavy rain...");
        assert_eq!(articles[1].content, "");
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#;
        let err = parse_everything(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        match err {
            SearchError::Api { code, message } => {
                assert_eq!(code, "rateLimited");
                assert_eq!(message, "Too many requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_status_with_ok_http() {
        let body = r#"{"status":"error","code":"parameterInvalid","message":"bad"}"#;
        assert!(matches!(
            parse_everything(StatusCode::OK, body),
            Err(SearchError::Api { .. })
        ));
    }

    #[test]
    fn test_parse_non_json_body() {
        assert!(matches!(
            parse_everything(StatusCode::OK, "<html>"),
            Err(SearchError::ParseError(_))
        ));
        assert!(matches!(
            parse_everything(StatusCode::BAD_GATEWAY, "<html>"),
            Err(SearchError::Api { .. })
        ));
    }

    #[test]
    fn test_query_params() {
        let client = NewsApiClient::new("https://newsapi.org/v2/", "secret");
        let request = SearchRequest::new("Floods in Italy", Some("bbc.com".to_string()), 10);
        let params = client.query_params(&request);

        assert_eq!(client.base_url, "https://newsapi.org/v2");
        assert_eq!(params[0], ("q", "Floods in Italy".to_string()));
        assert!(params.contains(&("domains", "bbc.com".to_string())));
        assert!(params.contains(&("sortBy", "relevancy".to_string())));
        assert!(params.contains(&("pageSize", "10".to_string())));
        assert!(params.contains(&("language", "en".to_string())));
        assert!(params.contains(&("apiKey", "secret".to_string())));
    }

    #[tokio::test]
    #[ignore] // Requires network access and NEWSAPI_KEY
    async fn test_live_search() {
        let key = std::env::var("NEWSAPI_KEY").unwrap();
        let client = NewsApiClient::new("https://newsapi.org/v2", &key);
        let request = SearchRequest::new("climate", Some("bbc.com".to_string()), 5);
        let result = client.search(&request).await;
        assert!(result.is_ok());
    }
}
