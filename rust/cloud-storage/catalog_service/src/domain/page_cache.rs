//! Best-effort cache of catalog pages and facet statistics.
//!
//! Keys encode the whole normalised query shape so equal requests share an entry
//! however their filters were ordered. Every cache failure is logged and treated
//! as a miss, callers always fall back to the store.
//!
//! Entries live in a namespace `<prefix>:g<generation>`. The generation counter is
//! kept at `<prefix>.generation`, outside the namespaces, and every invalidation
//! bumps it before sweeping `<prefix>:`. A read resolves its namespace before it
//! touches the store, so a read that overlaps a write can only populate a namespace
//! no later read will look at.
//!
//! Staleness bound: a read may return pre-write results only between the moment a
//! write is persisted and the moment its generation bump lands. When the cache
//! rejects both the bump and the sweep, entries of the old generation stay
//! reachable until their TTL runs out; the failure is logged at `warn`.

use std::fmt::Write;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use crate::domain::models::{FilterSet, PageWindow, PropertyFilter, SortKey};
use crate::domain::ports::ResultCache;

/// Key of one catalog page
pub fn page_key(
    namespace: &str,
    window: PageWindow,
    name_fragment: Option<&str>,
    sort: SortKey,
    filters: &FilterSet,
) -> String {
    format!(
        "{namespace}:page={}:size={}:name={}:sort={}:filters={}",
        window.page(),
        window.page_size(),
        escape(name_fragment.unwrap_or_default()),
        sort,
        render_filters(filters)
    )
}

/// Key of the facet statistics of one filtered population
pub fn stats_key(namespace: &str, name_fragment: Option<&str>, filters: &FilterSet) -> String {
    format!(
        "{namespace}:stats:name={}:filters={}",
        escape(name_fragment.unwrap_or_default()),
        render_filters(filters)
    )
}

/// `uid=v1,v2;uid=from=1,to=` with uids and values in lexicographic order
fn render_filters(filters: &FilterSet) -> String {
    let mut out = String::new();
    for (i, (property_uid, filter)) in filters.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&escape(property_uid));
        out.push('=');
        match filter {
            PropertyFilter::Values(values) => {
                let values: Vec<String> = values.iter().map(|v| escape(v)).collect();
                out.push_str(&values.join(","));
            }
            PropertyFilter::Range(range) => {
                let _ = write!(
                    out,
                    "from={},to={}",
                    range.from.map(|n| n.to_string()).unwrap_or_default(),
                    range.to.map(|n| n.to_string()).unwrap_or_default()
                );
            }
        }
    }
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | ':' | ';' | ',' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wraps a [ResultCache] so that it can never fail a request
pub struct PageCache<C> {
    cache: C,
    prefix: String,
    ttl: Duration,
}

impl<C> PageCache<C>
where
    C: ResultCache,
{
    pub fn new(cache: C, prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
            ttl,
        }
    }

    fn generation_key(&self) -> String {
        format!("{}.generation", self.prefix)
    }

    /// Namespace for the keys of one read, resolved before the store is queried.
    /// None when the generation cannot be read, the read then skips the cache.
    pub async fn namespace(&self) -> Option<String> {
        let key = self.generation_key();

        let generation = match self.cache.get(&key).await {
            Ok(None) => 0,
            Ok(Some(raw)) => match raw.parse::<u64>() {
                Ok(generation) => generation,
                Err(err) => {
                    tracing::warn!(error=?err, key=%key, "catalog cache generation is not a number");
                    return None;
                }
            },
            Err(err) => {
                tracing::warn!(error=?err, key=%key, "unable to read catalog cache generation");
                return None;
            }
        };

        Some(format!("{}:g{generation}", self.prefix))
    }

    /// Cached value under `key`. Errors and undecodable entries read as a miss.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "catalog cache miss");
                return None;
            }
            Err(err) => {
                tracing::warn!(error=?err, key, "unable to read catalog cache");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key, "catalog cache hit");
                Some(value)
            }
            Err(err) => {
                tracing::warn!(error=?err, key, "discarding undecodable catalog cache entry");
                None
            }
        }
    }

    pub async fn put<T>(&self, key: &str, value: &T)
    where
        T: Serialize,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error=?err, key, "unable to serialize catalog cache entry");
                return;
            }
        };

        if let Err(err) = self.cache.set(key, raw, self.ttl).await {
            tracing::warn!(error=?err, key, "unable to populate catalog cache");
        }
    }

    /// Retire every cached page and facet result: bump the generation so no read
    /// resolves an older namespace, then drop everything under the prefix
    pub async fn invalidate_all_catalog_entries(&self) {
        let generation_key = self.generation_key();
        match self.cache.increment(&generation_key).await {
            Ok(generation) => tracing::debug!(generation, "bumped catalog cache generation"),
            Err(err) => {
                tracing::warn!(error=?err, key=%generation_key, "unable to bump catalog cache generation")
            }
        }

        let pattern = format!("{}:", self.prefix);

        let keys = match self.cache.keys_with_prefix(&pattern).await {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!(error=?err, prefix=%self.prefix, "unable to list catalog cache entries");
                return;
            }
        };
        if keys.is_empty() {
            return;
        }

        match self.cache.delete(&keys).await {
            Ok(()) => tracing::info!(count = keys.len(), "invalidated catalog cache"),
            Err(err) => {
                tracing::warn!(error=?err, count = keys.len(), "unable to invalidate catalog cache")
            }
        }
    }
}
