//! Outbound adapters - implementations of domain ports

pub mod memory;
pub mod memory_cache;
pub mod noop;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "redis")]
pub mod redis_cache;

pub use memory::InMemoryCatalogStorage;
pub use memory_cache::InMemoryResultCache;
pub use noop::NoopResultCache;
#[cfg(feature = "postgres")]
pub use postgres::CatalogPgStorage;
#[cfg(feature = "redis")]
pub use redis_cache::RedisResultCache;

#[cfg(feature = "redis")]
use crate::config::Config;
#[cfg(feature = "redis")]
use either::Either;

/// Redis when a url is configured, otherwise the cache that stores nothing.
/// A url the redis client rejects also falls back to no cache.
#[cfg(feature = "redis")]
pub fn result_cache_from_config(config: &Config) -> Either<RedisResultCache, NoopResultCache> {
    let Some(url) = config.redis_url.as_deref() else {
        tracing::info!("no REDIS_URL configured, catalog results will not be cached");
        return Either::Right(NoopResultCache);
    };

    match RedisResultCache::from_url(url) {
        Ok(cache) => Either::Left(cache),
        Err(err) => {
            tracing::warn!(error=?err, "unable to create redis result cache, caching disabled");
            Either::Right(NoopResultCache)
        }
    }
}
