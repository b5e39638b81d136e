//! Search term extraction from free claim text

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::SearchTerms;

/// Maximum number of entities and keywords kept
pub const MAX_TERMS: usize = 4;

/// Keywords must be longer than this many characters
const MIN_KEYWORD_CHARS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "that", "this",
    "it", "their",
];

/// Capitalized word, optionally followed by one more capitalized word
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\b").unwrap());

/// Derive headline, entity and keyword search material from claim text
pub fn extract_search_terms(text: &str) -> SearchTerms {
    SearchTerms {
        headline: extract_headline(text),
        entities: extract_entities(text),
        keywords: extract_keywords(text),
    }
}

/// First non-empty line with surrounding quote marks removed
fn extract_headline(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    let line = line.strip_prefix(['"', '\'']).unwrap_or(line);
    let line = line.strip_suffix(['"', '\'']).unwrap_or(line);
    line.trim().to_string()
}

fn extract_entities(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    ENTITY_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|entity| seen.insert(entity.clone()))
        .take(MAX_TERMS)
        .collect()
}

fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS)
        .filter(|word| !STOP_WORDS.contains(word))
        .filter(|word| seen.insert(word.to_string()))
        .take(MAX_TERMS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\"Israeli strikes hit Gaza City overnight\"\n\
        Officials in Gaza City said the strikes damaged several buildings. \
        The United Nations condemned the attacks while Israel said militants were targeted.";

    #[test]
    fn test_headline_is_first_line_without_quotes() {
        let terms = extract_search_terms(SAMPLE);
        assert_eq!(terms.headline, "Israeli strikes hit Gaza City overnight");
    }

    #[test]
    fn test_headline_skips_leading_blank_lines() {
        let terms = extract_search_terms("\n\n   \n'Markets rally on rate cut'\nmore");
        assert_eq!(terms.headline, "Markets rally on rate cut");
    }

    #[test]
    fn test_entities_first_seen_and_distinct() {
        let terms = extract_search_terms(SAMPLE);
        assert_eq!(
            terms.entities,
            vec![
                "Israeli".to_string(),
                "Gaza City".to_string(),
                "Officials".to_string(),
                "The United".to_string(),
            ]
        );
    }

    #[test]
    fn test_keywords_filtered_and_capped() {
        let terms = extract_search_terms(SAMPLE);
        assert_eq!(
            terms.keywords,
            vec![
                "\"israeli".to_string(),
                "strikes".to_string(),
                "overnight\"".to_string(),
                "officials".to_string(),
            ]
        );
        assert!(terms.keywords.iter().all(|k| k.chars().count() > 5));
    }

    #[test]
    fn test_keywords_deduplicated() {
        let terms = extract_search_terms("stocks stocks stocks rallied rallied");
        assert_eq!(
            terms.keywords,
            vec!["stocks".to_string(), "rallied".to_string()]
        );
    }

    #[test]
    fn test_no_capitals_and_only_short_words() {
        let terms = extract_search_terms("it is what it was and the end");
        assert!(terms.entities.is_empty());
        assert!(terms.keywords.is_empty());
        assert!(terms.query_plan().queries.iter().all(|q| q.len() > 5));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(extract_search_terms(SAMPLE), extract_search_terms(SAMPLE));
    }

    #[test]
    fn test_bounds_hold_for_long_text() {
        let text = "Alpha Beta Gamma Delta Epsilon Zeta Eta Theta ".repeat(20)
            + &"remarkable unprecedented developments everywhere throughout ".repeat(5);
        let terms = extract_search_terms(&text);
        assert!(terms.entities.len() <= MAX_TERMS);
        assert!(terms.keywords.len() <= MAX_TERMS);

        let unique: HashSet<_> = terms.keywords.iter().collect();
        assert_eq!(unique.len(), terms.keywords.len());
        assert!(terms.keywords.iter().all(|k| !STOP_WORDS.contains(&k.as_str())));
    }
}
