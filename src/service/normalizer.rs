//! Normalization of the reasoning service's reply
//!
//! The reply is untrusted free text. It is unwrapped from any code fence, parsed,
//! and then coerced field by field against [`VERIFICATION_SCHEMA`]. The schema is
//! data: each entry names a field and the coercion applied to it, so the defaulting
//! policy can be read and tested without reading the coercion code.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::model::VerificationResult;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NormalizeError {
    #[error("Invalid JSON response from reasoning service: {0}")]
    InvalidReasoningOutput(String),
}

/// How a single field is coerced
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Truthiness; absent is false
    Flag,
    /// Numeric coercion; absent, null or non-numeric is 0
    Number,
    /// Strings only; anything else is ""
    Text,
    /// Arrays only; non-string elements are dropped
    TextList,
    /// Arrays only; each element coerced as a record, non-records dropped
    Records(&'static [FieldRule]),
}

/// One schema entry: wire name plus coercion
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn rule(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule { name, kind }
}

/// Matched-article entries inside each outlet's article list
pub const MATCHED_ARTICLE_SCHEMA: &[FieldRule] = &[
    rule("title", FieldKind::Text),
    rule("similarity", FieldKind::Number),
    rule("url", FieldKind::Text),
    rule("publishDate", FieldKind::Text),
    rule("excerpt", FieldKind::Text),
];

const ARTICLES: FieldKind = FieldKind::Records(MATCHED_ARTICLE_SCHEMA);

/// Top-level verification result
pub const VERIFICATION_SCHEMA: &[FieldRule] = &[
    rule("bbcVerified", FieldKind::Flag),
    rule("bbcSimilarity", FieldKind::Number),
    rule("bbcArticles", ARTICLES),
    rule("cnnVerified", FieldKind::Flag),
    rule("cnnSimilarity", FieldKind::Number),
    rule("cnnArticles", ARTICLES),
    rule("abcVerified", FieldKind::Flag),
    rule("abcSimilarity", FieldKind::Number),
    rule("abcArticles", ARTICLES),
    rule("guardianVerified", FieldKind::Flag),
    rule("guardianSimilarity", FieldKind::Number),
    rule("guardianArticles", ARTICLES),
    rule("legitimacyScore", FieldKind::Number),
    rule("topics", FieldKind::TextList),
    rule("locations", FieldKind::TextList),
    rule("dates", FieldKind::TextList),
    rule("credibilityIndicators", FieldKind::TextList),
    rule("redFlags", FieldKind::TextList),
    rule("overallAssessment", FieldKind::Text),
];

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?\s*\n?").unwrap());
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n?```\s*$").unwrap());

/// Remove a surrounding markdown code fence, if any
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let start = OPENING_FENCE.find(trimmed).map(|m| m.end()).unwrap_or(0);
    let body = &trimmed[start..];
    let end = CLOSING_FENCE.find(body).map(|m| m.start()).unwrap_or(body.len());
    body[..end].trim()
}

/// Parse and coerce a raw reply into a complete [`VerificationResult`].
///
/// Text that does not parse at all is an error. Anything that parses is coerced;
/// a non-object value is treated as an empty object.
pub fn normalize_reply(raw: &str) -> Result<VerificationResult, NormalizeError> {
    let cleaned = strip_code_fence(raw);

    let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!(raw = %raw, error = %e, "Failed to parse reasoning reply");
        NormalizeError::InvalidReasoningOutput(e.to_string())
    })?;

    let record = match parsed {
        Value::Object(map) => map,
        other => {
            tracing::warn!(
                value = %other,
                "Reasoning reply is not an object, normalizing to defaults"
            );
            Map::new()
        }
    };

    let coerced = coerce_record(&record, VERIFICATION_SCHEMA);

    serde_json::from_value(Value::Object(coerced))
        .map_err(|e| NormalizeError::InvalidReasoningOutput(e.to_string()))
}

/// Coerce a record so it contains exactly the schema's fields
pub fn coerce_record(record: &Map<String, Value>, schema: &[FieldRule]) -> Map<String, Value> {
    schema
        .iter()
        .map(|field| {
            let value = coerce_field(record.get(field.name), field.kind);
            (field.name.to_string(), value)
        })
        .collect()
}

fn coerce_field(value: Option<&Value>, kind: FieldKind) -> Value {
    match kind {
        FieldKind::Flag => Value::Bool(value.is_some_and(truthy)),
        FieldKind::Number => number_value(value.map_or(0.0, to_number)),
        FieldKind::Text => match value {
            Some(Value::String(s)) => Value::String(s.clone()),
            _ => Value::String(String::new()),
        },
        FieldKind::TextList => match value {
            Some(Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .filter(|item| item.is_string())
                    .cloned()
                    .collect(),
            ),
            _ => Value::Array(Vec::new()),
        },
        FieldKind::Records(schema) => match value {
            Some(Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| Value::Object(coerce_record(item, schema)))
                    .collect(),
            ),
            _ => Value::Array(Vec::new()),
        },
    }
}

/// JavaScript-style truthiness
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric coercion; unparseable input becomes 0
fn to_number(value: &Value) -> f64 {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Array(_) | Value::Object(_) => 0.0,
    };

    if number.is_finite() { number } else { 0.0 }
}

fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0.0))
}
