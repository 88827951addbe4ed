use super::FilterSet;
use crate::domain::error::{CatalogError, Result};
use crate::domain::filter_parser::parse_filter_tokens;

/// Request for one page of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCatalogRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Case-insensitive substring of the item name
    pub name: Option<String>,
    /// `uid` or `name`, anything else sorts by uid
    pub sort: Option<String>,
    pub filters: FilterSet,
}

/// Request for the facet statistics of a filtered population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStatsRequest {
    pub name: Option<String>,
    pub filters: FilterSet,
}

impl ListCatalogRequest {
    /// Build the request from raw query-string pairs. Keys may repeat.
    ///
    /// `page`, `page_size`, `name` and `sort` take their first occurrence,
    /// `property_*` keys are handed to the filter parser.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();

        Ok(Self {
            page: first_number(&pairs, "page")?,
            page_size: first_number(&pairs, "page_size")?,
            name: first_value(&pairs, "name"),
            sort: first_value(&pairs, "sort"),
            filters: parse_filter_tokens(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))?,
        })
    }
}

impl FilterStatsRequest {
    /// Build the request from raw query-string pairs, see [ListCatalogRequest::from_query_pairs]
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();

        Ok(Self {
            name: first_value(&pairs, "name"),
            filters: parse_filter_tokens(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))?,
        })
    }
}

fn first_value<K, V>(pairs: &[(K, V)], key: &str) -> Option<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.as_ref().to_string())
}

fn first_number<K, V>(pairs: &[(K, V)], key: &str) -> Result<Option<u32>>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    first_value(pairs, key)
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|_| {
                CatalogError::MalformedInput(format!("{key} must be a positive integer, got '{raw}'"))
            })
        })
        .transpose()
}
