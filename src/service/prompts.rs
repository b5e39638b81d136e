//! Prompts for news cross-reference verification

use crate::model::{Claim, Corpus, OutletConfig, OutletId};

/// System instruction sent with every verification request
pub const VERIFICATION_SYSTEM_PROMPT: &str = "You are a helpful news verification assistant. When comparing articles, be generous with matches - articles covering the same general event or topic should be considered related even if specific details differ. Return only valid JSON without markdown formatting.";

/// Listing used in place of articles when nothing was retrieved
const NO_ARTICLES: &str = "No matching articles found in NewsAPI.";

/// Matching criteria, similarity floors, legitimacy bands and the reply schema.
/// Reproduced exactly; the thresholds are policy, not tuning knobs.
const VERIFICATION_POLICY: &str = r#"CRITICAL INSTRUCTIONS FOR VERIFICATION:

1. MATCHING CRITERIA (be VERY LIBERAL with matches):
   - Same topic/event (e.g., Russia-Ukraine war, Gaza conflict, political scandal) = HIGH match
   - Same location mentioned (e.g., Ukraine, Gaza, Washington) = MODERATE match
   - Same timeframe or date range = MODERATE match
   - Related events from same category = MODERATE match
   - If articles cover the SAME GENERAL STORY even with different specific details = VERIFIED

2. VERIFICATION THRESHOLDS (use these generously):
   - Mark as VERIFIED=TRUE if articles are about the SAME TOPIC
   - Articles don't need exact matches - covering the same event/topic is sufficient
   - Example: User's content about "Israeli strikes in Gaza" matches ANY article about Israel-Gaza conflict

3. SIMILARITY SCORING (be GENEROUS - articles found via keyword search are already topically related):
   - If articles found AND topic matches: MINIMUM 65% similarity (start here)
   - 80-100: Exact same event with matching details
   - 65-79: Same event/topic, details may vary
   - 50-64: Related topic, similar timeframe
   - 30-49: Same general category but different specific event
   - 0-29: Completely different topics (use ONLY if truly unrelated)

4. IMPORTANT: Articles were found through keyword search, so they're already topically relevant. Don't score below 60% unless articles are truly about different topics.

5. LEGITIMACY SCORE CALCULATION:
   - If 3+ sources verified: 75-95
   - If 2 sources verified: 70-85
   - If 1 source verified: 60-75
   - If 0 sources verified: 20-40

6. For each matched article, include: title, similarity score (minimum 65 if topic matches), url, publishDate, and excerpt (first 150 chars).

Respond in JSON format only:
{
  "bbcVerified": boolean,
  "bbcSimilarity": number (0-100),
  "bbcArticles": [{"title": string, "similarity": number, "url": string, "publishDate": string, "excerpt": string}],
  "cnnVerified": boolean,
  "cnnSimilarity": number (0-100),
  "cnnArticles": [{"title": string, "similarity": number, "url": string, "publishDate": string, "excerpt": string}],
  "abcVerified": boolean,
  "abcSimilarity": number (0-100),
  "abcArticles": [{"title": string, "similarity": number, "url": string, "publishDate": string, "excerpt": string}],
  "guardianVerified": boolean,
  "guardianSimilarity": number (0-100),
  "guardianArticles": [{"title": string, "similarity": number, "url": string, "publishDate": string, "excerpt": string}],
  "legitimacyScore": number (0-100, average of all source similarities),
  "topics": string[],
  "locations": string[],
  "dates": string[],
  "credibilityIndicators": string[],
  "redFlags": string[],
  "overallAssessment": string
}"#;

/// System instruction plus user payload for the reasoning service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningPrompt {
    pub system: String,
    pub user: String,
}

/// Build the full verification request for a claim and its retrieved corpus
pub fn build_verification_prompt(claim: &Claim, corpus: &Corpus) -> ReasoningPrompt {
    ReasoningPrompt {
        system: VERIFICATION_SYSTEM_PROMPT.to_string(),
        user: build_user_prompt(claim, corpus),
    }
}

fn build_user_prompt(claim: &Claim, corpus: &Corpus) -> String {
    let source_url = claim
        .source_url
        .as_ref()
        .map(|url| format!("User's Source URL: {url}\n"))
        .unwrap_or_default();

    let counts = OutletId::ALL
        .iter()
        .map(|id| {
            format!(
                "- {} Articles Found: {}",
                count_label(corpus, *id),
                corpus.count_for(*id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a news verification assistant. Compare the user's news content against real articles from major news sources.

User's News Content:
{}

{}

Found Articles ({} total):
{}

{}

{}"#,
        claim.text,
        source_url,
        corpus.len(),
        counts,
        render_articles(corpus),
        VERIFICATION_POLICY
    )
}

/// Outlet name used in the per-outlet counts; outlets missing from the corpus
/// fall back to the default outlet table
fn count_label(corpus: &Corpus, id: OutletId) -> String {
    corpus
        .partitions
        .iter()
        .find(|p| p.outlet == id)
        .map(|p| p.display_name.clone())
        .or_else(|| {
            OutletConfig::defaults()
                .into_iter()
                .find(|o| o.id == id)
                .map(|o| o.display_name)
        })
        .unwrap_or_else(|| id.to_string())
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Numbered listing of every article, in corpus order
fn render_articles(corpus: &Corpus) -> String {
    if corpus.is_empty() {
        return NO_ARTICLES.to_string();
    }

    corpus
        .articles()
        .enumerate()
        .map(|(idx, (_, article))| {
            format!(
                "Article {} [{}]:\nTitle: {}\nDescription: {}\nContent: {}\nPublished: {}\nURL: {}\n",
                idx + 1,
                article.source_name,
                article.title,
                or_na(&article.description),
                or_na(&article.content),
                article.published_at,
                article.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}
