//! Per-outlet search with a query-then-fallback ladder

use std::sync::Arc;

use crate::model::{Article, OutletConfig, SearchStrategy, SearchTerms};
use crate::retriever::{NewsSearchClient, SearchRequest};

/// Searches one outlet, walking every candidate query through every strategy
pub struct SourceSearcher {
    outlet: OutletConfig,
    client: Arc<dyn NewsSearchClient>,
}

impl SourceSearcher {
    pub fn new(outlet: OutletConfig, client: Arc<dyn NewsSearchClient>) -> Self {
        Self { outlet, client }
    }

    pub fn outlet(&self) -> &OutletConfig {
        &self.outlet
    }

    /// Build the request a strategy issues for a candidate query
    fn request_for(&self, strategy: &SearchStrategy, query: &str) -> SearchRequest {
        match strategy {
            SearchStrategy::Domain => SearchRequest::new(
                query,
                Some(self.outlet.domains.clone()),
                self.outlet.page_size,
            ),
            SearchStrategy::Boosted { boost } => {
                SearchRequest::new(format!("{query} AND {boost}"), None, self.outlet.page_size)
            }
        }
    }

    /// Return the first non-empty result set, or empty once the ladder is exhausted.
    ///
    /// Attempts are sequential and bounded by `queries x strategies`. Failed attempts
    /// are logged and count as "nothing found".
    pub async fn search(&self, terms: &SearchTerms) -> Vec<Article> {
        let plan = terms.query_plan();
        let outlet = &self.outlet.display_name;

        if plan.is_empty() {
            tracing::debug!(outlet = %outlet, "No usable search queries, skipping outlet");
            return Vec::new();
        }
        tracing::debug!(outlet = %outlet, queries = plan.len(), "Searching outlet");

        for query in plan.iter() {
            tracing::debug!(outlet = %outlet, query = %query, "Trying outlet search");

            for strategy in &self.outlet.strategies {
                let request = self.request_for(strategy, query);

                match self.client.search(&request).await {
                    Ok(mut articles) if !articles.is_empty() => {
                        articles.truncate(self.outlet.page_size as usize);
                        tracing::info!(
                            outlet = %outlet,
                            query = %query,
                            found = articles.len(),
                            "Outlet search successful"
                        );
                        return articles;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(
                            outlet = %outlet,
                            query = %request.query,
                            error = %e,
                            "Outlet search failed, trying next strategy"
                        );
                    }
                }
            }
        }

        tracing::debug!(outlet = %outlet, "Outlet search exhausted without results");
        Vec::new()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{ScriptedSearch, article};
    use super::*;
    use crate::model::OutletId;
    use crate::retriever::SearchError;
    use crate::service::terms::extract_search_terms;

    fn bbc() -> OutletConfig {
        OutletConfig::defaults()
            .into_iter()
            .find(|o| o.id == OutletId::Bbc)
            .unwrap()
    }

    const CLAIM: &str = "Floods hit northern Italy\nEmilia Romagna residents evacuated after torrential rainfall";

    #[tokio::test]
    async fn test_returns_first_non_empty_result() {
        let client = Arc::new(ScriptedSearch::new(|_| Ok(vec![article("BBC News", "Floods")])));
        let searcher = SourceSearcher::new(bbc(), client.clone());

        let articles = searcher.search(&extract_search_terms(CLAIM)).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(client.calls(), 1);
        let request = &client.requests()[0];
        assert_eq!(request.query, "Floods hit northern Italy");
        assert_eq!(request.domains.as_deref(), Some("bbc.com,bbc.co.uk"));
        assert_eq!(request.page_size, 10);
    }

    #[tokio::test]
    async fn test_falls_back_to_boosted_query() {
        let client = Arc::new(ScriptedSearch::new(|req| {
            if req.domains.is_some() {
                Ok(vec![])
            } else {
                Ok(vec![article("BBC News", "Boosted hit")])
            }
        }));
        let searcher = SourceSearcher::new(bbc(), client.clone());

        let articles = searcher.search(&extract_search_terms(CLAIM)).await;

        assert_eq!(articles[0].title, "Boosted hit");
        assert_eq!(client.calls(), 2);
        assert_eq!(
            client.requests()[1].query,
            r#"Floods hit northern Italy AND (bbc.com OR "BBC")"#
        );
    }

    #[tokio::test]
    async fn test_errors_are_not_fatal() {
        let client = Arc::new(ScriptedSearch::new(|req| {
            if req.query.starts_with("Floods hit") {
                Err(SearchError::Api {
                    code: "rateLimited".to_string(),
                    message: "slow down".to_string(),
                })
            } else {
                Ok(vec![article("BBC News", "Entity hit")])
            }
        }));
        let searcher = SourceSearcher::new(bbc(), client.clone());

        let articles = searcher.search(&extract_search_terms(CLAIM)).await;

        assert_eq!(articles[0].title, "Entity hit");
        // two failed attempts for the headline, then the entity query succeeds
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_is_bounded() {
        let client = Arc::new(ScriptedSearch::new(|_| Ok(vec![])));
        let searcher = SourceSearcher::new(bbc(), client.clone());

        let articles = searcher.search(&extract_search_terms(CLAIM)).await;

        assert!(articles.is_empty());
        assert_eq!(client.calls(), 6);
    }

    #[tokio::test]
    async fn test_no_usable_queries_means_no_calls() {
        let client = Arc::new(ScriptedSearch::new(|_| Ok(vec![article("BBC", "x")])));
        let searcher = SourceSearcher::new(bbc(), client.clone());

        let articles = searcher.search(&extract_search_terms("it is")).await;

        assert!(articles.is_empty());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_results_capped_at_page_size() {
        let client = Arc::new(ScriptedSearch::new(|_| {
            Ok((0..25).map(|i| article("BBC", &format!("story {i}"))).collect())
        }));
        let searcher = SourceSearcher::new(bbc(), client);

        let articles = searcher.search(&extract_search_terms(CLAIM)).await;

        assert_eq!(articles.len(), 10);
    }
}
