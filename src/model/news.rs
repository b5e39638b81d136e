use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Longest headline prefix used as a search query, in characters
pub const HEADLINE_QUERY_CHARS: usize = 100;

/// Candidate queries this short (or shorter) are not worth a search call
pub const MIN_QUERY_CHARS: usize = 5;

/// Submitted news text awaiting verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub text: String,
    pub source_url: Option<String>,
}

impl Claim {
    pub fn new(text: impl Into<String>, source_url: Option<String>) -> Self {
        Self {
            text: text.into(),
            source_url: source_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Search material derived once per claim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    pub headline: String,
    /// Capitalized words or two-word phrases, first-seen order
    pub entities: Vec<String>,
    /// Long lowercase non-stop-words, original order
    pub keywords: Vec<String>,
}

impl SearchTerms {
    pub fn entity_query(&self) -> String {
        self.entities.join(" ")
    }

    pub fn keyword_query(&self) -> String {
        self.keywords.join(" ")
    }

    /// Ordered candidate queries: headline prefix, entities, keywords
    pub fn query_plan(&self) -> QueryPlan {
        let headline: String = self.headline.chars().take(HEADLINE_QUERY_CHARS).collect();

        let queries = [headline, self.entity_query(), self.keyword_query()]
            .into_iter()
            .filter(|q| q.chars().count() > MIN_QUERY_CHARS)
            .collect();

        QueryPlan { queries }
    }
}

/// Candidate query strings, tried in order until one yields articles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    pub queries: Vec<String>,
}

impl QueryPlan {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }
}

/// The reference outlets a verification reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutletId {
    Bbc,
    Cnn,
    Abc,
    Guardian,
}

impl OutletId {
    pub const ALL: [OutletId; 4] = [
        OutletId::Bbc,
        OutletId::Cnn,
        OutletId::Abc,
        OutletId::Guardian,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            OutletId::Bbc => "bbc",
            OutletId::Cnn => "cnn",
            OutletId::Abc => "abc",
            OutletId::Guardian => "guardian",
        }
    }
}

impl fmt::Display for OutletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A retrieved news article. Never mutated after retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub source_name: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub published_at: String,
}

/// Articles one outlet's search returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletArticles {
    pub outlet: OutletId,
    pub display_name: String,
    pub articles: Vec<Article>,
}

/// All retrieved articles, grouped by outlet in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub partitions: Vec<OutletArticles>,
}

impl Corpus {
    /// Flat view in grouping order. Cross-outlet duplicates are kept.
    pub fn articles(&self) -> impl Iterator<Item = (&OutletArticles, &Article)> {
        self.partitions
            .iter()
            .flat_map(|p| p.articles.iter().map(move |a| (p, a)))
    }

    pub fn len(&self) -> usize {
        self.partitions.iter().map(|p| p.articles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_for(&self, outlet: OutletId) -> usize {
        self.partitions
            .iter()
            .filter(|p| p.outlet == outlet)
            .map(|p| p.articles.len())
            .sum()
    }
}
