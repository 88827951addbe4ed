//! Turns flat query-string tokens into a typed [FilterSet].
//!
//! Recognised keys:
//! - `property_<uid>`: a categorical value, repeated keys accumulate into a set
//! - `property_<uid>_from` / `property_<uid>_to`: inclusive integer bounds
//!
//! Parsing is purely syntactic. Whether `<uid>` exists and has the matching
//! type is checked when the filter set is composed into a query.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::domain::models::{FilterSet, NumericRange, PropertyFilter};

pub const PROPERTY_KEY_PREFIX: &str = "property_";
const FROM_SUFFIX: &str = "_from";
const TO_SUFFIX: &str = "_to";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("filter key '{0}' does not name a property")]
    EmptyPropertyUid(String),

    #[error("filter bound '{key}' must be an integer, got '{value}'")]
    InvalidBound { key: String, value: String },

    #[error("property '{0}' is filtered by both values and a numeric range")]
    MixedFilterKinds(String),
}

#[derive(Clone, Copy)]
enum FilterToken<'a> {
    Value(&'a str),
    From(&'a str),
    To(&'a str),
}

impl<'a> FilterToken<'a> {
    /// `None` for keys that are not filters at all
    fn classify(key: &'a str) -> Option<Result<Self, FilterParseError>> {
        let rest = key.strip_prefix(PROPERTY_KEY_PREFIX)?;

        let token = if let Some(uid) = rest.strip_suffix(FROM_SUFFIX) {
            FilterToken::From(uid)
        } else if let Some(uid) = rest.strip_suffix(TO_SUFFIX) {
            FilterToken::To(uid)
        } else {
            FilterToken::Value(rest)
        };

        let uid = match token {
            FilterToken::Value(uid) | FilterToken::From(uid) | FilterToken::To(uid) => uid,
        };
        if uid.is_empty() {
            return Some(Err(FilterParseError::EmptyPropertyUid(key.to_string())));
        }

        Some(Ok(token))
    }
}

#[derive(Default)]
struct Accumulated {
    values: BTreeSet<String>,
    range: Option<NumericRange>,
}

/// Parse raw `(key, value)` pairs. Keys may repeat.
///
/// Empty values are skipped, a repeated bound keeps its last value and
/// `from > to` is accepted as is (it simply matches nothing). Value uids
/// are taken verbatim; only numeric bounds ignore surrounding whitespace.
pub fn parse_filter_tokens<I, K, V>(tokens: I) -> Result<FilterSet, FilterParseError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut by_property: BTreeMap<String, Accumulated> = BTreeMap::new();

    for (key, value) in tokens {
        let key = key.as_ref();
        let Some(token) = FilterToken::classify(key) else {
            continue;
        };
        let value = value.as_ref();
        if value.is_empty() {
            continue;
        }

        match token? {
            FilterToken::Value(uid) => {
                by_property
                    .entry(uid.to_string())
                    .or_default()
                    .values
                    .insert(value.to_string());
            }
            FilterToken::From(uid) => {
                let Some(bound) = parse_bound(key, value)? else {
                    continue;
                };
                let acc = by_property.entry(uid.to_string()).or_default();
                acc.range.get_or_insert_with(NumericRange::default).from = Some(bound);
            }
            FilterToken::To(uid) => {
                let Some(bound) = parse_bound(key, value)? else {
                    continue;
                };
                let acc = by_property.entry(uid.to_string()).or_default();
                acc.range.get_or_insert_with(NumericRange::default).to = Some(bound);
            }
        }
    }

    let mut filters = FilterSet::new();
    for (uid, acc) in by_property {
        match (acc.values.is_empty(), acc.range) {
            (true, Some(range)) => filters.insert(uid, PropertyFilter::Range(range)),
            (false, None) => filters.insert(uid, PropertyFilter::Values(acc.values)),
            (false, Some(_)) => return Err(FilterParseError::MixedFilterKinds(uid)),
            (true, None) => {}
        }
    }

    Ok(filters)
}

/// None for a blank bound
fn parse_bound(key: &str, value: &str) -> Result<Option<i64>, FilterParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| FilterParseError::InvalidBound {
            key: key.to_string(),
            value: value.to_string(),
        })
}
