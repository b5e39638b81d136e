//! Concurrent multi-outlet corpus collection

use std::sync::Arc;

use futures::future::join_all;

use crate::model::{Corpus, OutletArticles, OutletConfig, SearchTerms};
use crate::retriever::NewsSearchClient;
use crate::service::searcher::SourceSearcher;

/// Runs every configured outlet search concurrently and waits for all of them
pub struct CorpusAggregator {
    searchers: Vec<SourceSearcher>,
}

impl CorpusAggregator {
    pub fn new(outlets: Vec<OutletConfig>, client: Arc<dyn NewsSearchClient>) -> Self {
        let searchers = outlets
            .into_iter()
            .map(|outlet| SourceSearcher::new(outlet, Arc::clone(&client)))
            .collect();

        Self { searchers }
    }

    pub fn outlet_count(&self) -> usize {
        self.searchers.len()
    }

    /// Collect articles from every outlet. One outlet coming back empty never
    /// shortens or fails the others; duplicates across outlets are kept.
    pub async fn collect(&self, terms: &SearchTerms) -> Corpus {
        let futures: Vec<_> = self
            .searchers
            .iter()
            .map(|searcher| searcher.search(terms))
            .collect();

        let results = join_all(futures).await;

        let partitions: Vec<OutletArticles> = self
            .searchers
            .iter()
            .zip(results)
            .map(|(searcher, articles)| OutletArticles {
                outlet: searcher.outlet().id,
                display_name: searcher.outlet().display_name.clone(),
                articles,
            })
            .collect();

        for partition in &partitions {
            tracing::info!(
                outlet = %partition.display_name,
                found = partition.articles.len(),
                "Outlet articles collected"
            );
        }

        Corpus { partitions }
    }
}
