//! Read path: filtered, ordered, paginated listing and single-article lookup.
//!
//! Query-string normalization lives in [`ListParams::from_raw`]; the listing
//! itself is one filtered `SELECT` plus one `COUNT(*)` over the same predicate.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::types::{Article, ARTICLE_COLUMNS};
use crate::error::ServiceResult;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Raw query-string values, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub min_facts: Option<String>,
    pub min_calm: Option<String>,
    pub min_deep: Option<String>,
}

/// Normalized listing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
    pub min_facts: f64,
    pub min_calm: f64,
    pub min_deep: f64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            min_facts: 0.0,
            min_calm: 0.0,
            min_deep: 0.0,
        }
    }
}

impl ListParams {
    /// Normalize raw query values. Never fails: bad input falls back to defaults.
    ///
    /// `limit` outside `1..` becomes 20 and is clamped to 100; a negative
    /// `offset` becomes 0; unparsable thresholds become 0.0.
    pub fn from_raw(raw: &RawListQuery) -> Self {
        let limit = match raw.limit.as_deref().and_then(parse_leading_int) {
            Some(n) if n > 0 => n.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let offset = match raw.offset.as_deref().and_then(parse_leading_int) {
            Some(n) if n >= 0 => n,
            _ => 0,
        };

        Self {
            limit,
            offset,
            min_facts: parse_threshold(raw.min_facts.as_deref()),
            min_calm: parse_threshold(raw.min_calm.as_deref()),
            min_deep: parse_threshold(raw.min_deep.as_deref()),
        }
    }
}

/// A page of articles plus the unpaginated match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleList {
    pub articles: Vec<Article>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

const FILTER_SQL: &str = "epistemic_facts_score >= ?1 \
     AND emotive_calm_score >= ?2 \
     AND density_deep_score >= ?3";

/// List articles matching all three score thresholds.
///
/// Ordered by deep score, then calm score, then publication date (all
/// descending), with `id` as the final tie-break so pages are stable.
pub fn list_articles(conn: &Connection, p: &ListParams) -> ServiceResult<ArticleList> {
    let sql = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles \
         WHERE {FILTER_SQL} \
         ORDER BY density_deep_score DESC, emotive_calm_score DESC, published_at DESC, id ASC \
         LIMIT ?4 OFFSET ?5"
    );

    let mut stmt = conn.prepare(&sql)?;
    let articles = stmt
        .query_map(
            params![p.min_facts, p.min_calm, p.min_deep, p.limit, p.offset],
            Article::from_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM articles WHERE {FILTER_SQL}"),
        params![p.min_facts, p.min_calm, p.min_deep],
        |row| row.get(0),
    )?;

    tracing::debug!(
        returned = articles.len(),
        total,
        limit = p.limit,
        offset = p.offset,
        "articles listed"
    );

    Ok(ArticleList {
        articles,
        total: total as u64,
        limit: p.limit,
        offset: p.offset,
    })
}

/// Look up one article by primary key. `Ok(None)` means no such article.
pub fn get_article(conn: &Connection, id: &str) -> ServiceResult<Option<Article>> {
    let article = conn
        .query_row(
            &format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1"),
            params![id],
            Article::from_row,
        )
        .optional()?;
    Ok(article)
}

/// Parse a leading integer: optional whitespace, optional sign, then digits.
/// Trailing characters are ignored; values beyond `i64` saturate.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then(|| if negative { -value } else { value })
}

/// Parse a leading decimal float (`[+-]digits[.digits][e[+-]digits]`).
/// Anything without a numeric prefix yields `None`.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_threshold(raw: Option<&str>) -> f64 {
    raw.and_then(parse_leading_float).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_limit(v: &str) -> RawListQuery {
        RawListQuery {
            limit: Some(v.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(ListParams::from_raw(&RawListQuery::default()).limit, 20);
        assert_eq!(ListParams::from_raw(&raw_limit("500")).limit, 100);
        assert_eq!(ListParams::from_raw(&raw_limit("-5")).limit, 20);
        assert_eq!(ListParams::from_raw(&raw_limit("abc")).limit, 20);
        assert_eq!(ListParams::from_raw(&raw_limit("0")).limit, 20);
        assert_eq!(ListParams::from_raw(&raw_limit("")).limit, 20);
        assert_eq!(ListParams::from_raw(&raw_limit("7")).limit, 7);
        assert_eq!(ListParams::from_raw(&raw_limit("12abc")).limit, 12);
        assert_eq!(ListParams::from_raw(&raw_limit("99999999999999999999999")).limit, 100);
    }

    fn raw_offset(v: &str) -> RawListQuery {
        RawListQuery {
            offset: Some(v.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn offset_rejects_negative() {
        assert_eq!(ListParams::from_raw(&raw_offset("-3")).offset, 0);
        assert_eq!(ListParams::from_raw(&raw_offset("40")).offset, 40);
    }

    #[test]
    fn offset_falls_back_on_junk() {
        assert_eq!(ListParams::from_raw(&RawListQuery::default()).offset, 0);
        assert_eq!(ListParams::from_raw(&raw_offset("abc")).offset, 0);
        assert_eq!(ListParams::from_raw(&raw_offset("")).offset, 0);
        assert_eq!(ListParams::from_raw(&raw_offset("7x")).offset, 7);
    }

    #[test]
    fn thresholds_parse_leniently() {
        let raw = RawListQuery {
            min_facts: Some("0.5".into()),
            min_calm: Some("nope".into()),
            min_deep: Some(".25xyz".into()),
            ..Default::default()
        };
        let p = ListParams::from_raw(&raw);
        assert_eq!(p.min_facts, 0.5);
        assert_eq!(p.min_calm, 0.0);
        assert_eq!(p.min_deep, 0.25);
    }

    #[test]
    fn leading_float_edge_cases() {
        assert_eq!(parse_leading_float("1e-1"), Some(0.1));
        assert_eq!(parse_leading_float("3e"), Some(3.0));
        assert_eq!(parse_leading_float("-0.7"), Some(-0.7));
        assert_eq!(parse_leading_float("NaN"), None);
        assert_eq!(parse_leading_float("inf"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("5."), Some(5.0));
    }

    #[test]
    fn leading_int_edge_cases() {
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("+8"), Some(8));
    }
}
