//! Field normalizers shared by the source adapters.
//!
//! Every helper treats blank strings as missing values.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// First non-blank candidate, in order
pub fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .find_map(non_blank)
        .map(str::to_string)
}

/// Resolve a display title from a localized title map.
///
/// Preference: the locale's title, then the first localized title, then the
/// canonical title, then "Unknown Title".
pub fn resolve_title<'a, I>(localized: I, locale: &str, canonical: Option<&str>) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut first = None;
    for (lang, title) in localized {
        let Some(title) = non_blank(Some(title)) else {
            continue;
        };
        if lang.eq_ignore_ascii_case(locale) {
            return title.to_string();
        }
        if first.is_none() {
            first = Some(title);
        }
    }

    first
        .or_else(|| non_blank(canonical))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Pick the first available image URL; callers list the largest variant first
pub fn best_image<'a, I>(variants_largest_first: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    first_present(variants_largest_first)
}

/// Year from the leading digits of an ISO-like date ("2004-07-15", "2004")
pub fn extract_year(date: &str) -> Option<i32> {
    let head: String = date.trim().chars().take(4).collect();
    if head.len() != 4 {
        return None;
    }
    head.parse().ok()
}

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Remove HTML tags, keeping text content
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

/// Drop blanks and later duplicates, keeping first-occurrence order
pub fn dedup_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter_map(|value| non_blank(Some(value.as_ref())).map(str::to_string))
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole count from a label such as "12" or "12.5"; anything else is `None`
pub fn parse_count(label: &str) -> Option<u32> {
    let value: f64 = label.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.floor() as u32)
    } else {
        None
    }
}
