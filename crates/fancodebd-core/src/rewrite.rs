//! Stream host rewrite over the feed's match records.
//!
//! Walks `matches[*].adfree_url` and swaps the leading host prefix. Anything
//! that does not have the expected shape passes through untouched.

use serde_json::Value;

use crate::config::RewriteRule;

/// Top-level key holding the match records.
pub const MATCHES_KEY: &str = "matches";
/// Record field holding the stream URL.
pub const URL_FIELD: &str = "adfree_url";

/// How a single match record relates to the rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField<'a> {
    /// Record is not an object, or has no `adfree_url`.
    Missing,
    /// `adfree_url` is present but not a string.
    NotString,
    /// String that does not start with the source prefix.
    Foreign,
    /// String starting with the source prefix; holds the remainder after it.
    Rewritable(&'a str),
}

/// Per-run counters for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Elements of `matches` visited.
    pub records: usize,
    pub rewritten: usize,
    pub missing: usize,
    pub not_string: usize,
    pub foreign: usize,
}

/// Classify one record against `rule`.
pub fn classify<'a>(record: &'a Value, rule: &RewriteRule) -> UrlField<'a> {
    match record.get(URL_FIELD) {
        None => UrlField::Missing,
        Some(Value::String(url)) => match url.strip_prefix(rule.from_prefix.as_str()) {
            Some(rest) => UrlField::Rewritable(rest),
            None => UrlField::Foreign,
        },
        Some(_) => UrlField::NotString,
    }
}

/// Rewrite a single URL. `None` if it does not start with `rule.from_prefix`.
/// Only the leading occurrence is replaced.
pub fn rewrite_url(url: &str, rule: &RewriteRule) -> Option<String> {
    url.strip_prefix(rule.from_prefix.as_str())
        .map(|rest| splice(rule, rest))
}

fn splice(rule: &RewriteRule, rest: &str) -> String {
    let mut out = String::with_capacity(rule.to_prefix.len() + rest.len());
    out.push_str(&rule.to_prefix);
    out.push_str(rest);
    out
}

/// Apply `rule` to every record of `doc["matches"]` in place.
///
/// A document without `matches`, or whose `matches` is not an array, is left
/// as is. Records are visited in order; only `adfree_url` is ever modified.
pub fn rewrite_matches(doc: &mut Value, rule: &RewriteRule) -> RewriteSummary {
    let mut summary = RewriteSummary::default();

    let records = match doc.get_mut(MATCHES_KEY) {
        Some(Value::Array(records)) => records,
        Some(other) => {
            tracing::debug!(kind = json_kind(other), "`matches` is not an array; skipping rewrite");
            return summary;
        }
        None => {
            tracing::debug!("document has no `matches`; skipping rewrite");
            return summary;
        }
    };

    for record in records.iter_mut() {
        summary.records += 1;
        let replacement = match classify(record, rule) {
            UrlField::Missing => {
                summary.missing += 1;
                continue;
            }
            UrlField::NotString => {
                summary.not_string += 1;
                continue;
            }
            UrlField::Foreign => {
                summary.foreign += 1;
                continue;
            }
            UrlField::Rewritable(rest) => splice(rule, rest),
        };
        if let Some(field) = record.get_mut(URL_FIELD) {
            *field = Value::String(replacement);
            summary.rewritten += 1;
        }
    }

    summary
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
