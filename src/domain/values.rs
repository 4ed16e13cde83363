//! Field parsing for scraped text and lenient decoding of JSON source records.
//!
//! A malformed field never fails the record it belongs to: it degrades to `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const MISSING_MARKER: &str = "N/A";
const MAX_SCORE: f64 = 10.0;

/// Parse an IMDb score such as `"7.8"`. Values outside `0..=10` are treated as missing.
pub fn parse_score(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    if is_missing(cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|score| is_valid_score(*score))
}

/// Parse a vote count such as `"12,345"`, `"(45K)"` or `"1.2M"`
pub fn parse_vote_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_matches(|c: char| c == '(' || c == ')')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if is_missing(&cleaned) {
        return None;
    }

    let (digits, multiplier) = split_suffix(&cleaned);
    let count = digits.parse::<f64>().ok()? * multiplier;
    to_vote_count(count)
}

fn split_suffix(cleaned: &str) -> (&str, f64) {
    if let Some(digits) = cleaned.strip_suffix('K') {
        (digits, 1e3)
    } else if let Some(digits) = cleaned.strip_suffix('M') {
        (digits, 1e6)
    } else {
        (cleaned, 1.0)
    }
}

fn is_missing(cleaned: &str) -> bool {
    cleaned.is_empty() || cleaned.eq_ignore_ascii_case(MISSING_MARKER)
}

fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (0.0..=MAX_SCORE).contains(&score)
}

pub(crate) fn to_vote_count(count: f64) -> Option<u64> {
    if count.is_finite() && count >= 0.0 {
        Some(count.round() as u64)
    } else {
        None
    }
}

// --- Serde adapters ---

pub(crate) fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(score_from_value))
}

pub(crate) fn lenient_vote_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(vote_count_from_value))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

pub(crate) fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn score_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|score| is_valid_score(*score)),
        Value::String(text) => parse_score(text),
        _ => None,
    }
}

fn vote_count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| number.as_f64().and_then(to_vote_count)),
        Value::String(text) => parse_vote_count(text),
        _ => None,
    }
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        // pandas serializes numeric columns (e.g. Year) as floats
        Value::Number(number) => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && number.as_i64().is_none() => {
                Some(format!("{}", float as i64))
            }
            _ => Some(number.to_string()),
        },
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
