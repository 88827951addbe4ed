//! Port definitions - interfaces for external dependencies and the facade exposed to transports

use std::time::Duration;

use either::Either;

use crate::domain::error::Result;
use crate::domain::models::{
    CatalogPage, CreateItemRequest, CreatePropertyRequest, FilterStats, FilterStatsRequest, Item,
    ItemPredicate, ItemResponse, ItemSelection, ListCatalogRequest, NewItem, Property,
    PropertyOption, PropertyResponse,
};

/// Storage port for the catalog: property registry, items and the
/// predicate-scoped reads the query engine needs.
#[cfg_attr(test, mockall::automock(type Error = crate::domain::error::CatalogError;))]
pub trait CatalogStorage: Send + Sync + 'static {
    /// Error type for storage operations
    type Error: Send + Sync + std::error::Error + 'static;

    // Property registry

    /// All properties with their values, ordered by uid
    fn list_properties(
        &self,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<Property>, Self::Error>> + Send;

    /// The stored values among `value_uids`, whichever property owns them
    fn find_options(
        &self,
        value_uids: &[String],
    ) -> impl std::future::Future<Output = std::result::Result<Vec<PropertyOption>, Self::Error>> + Send;

    /// Insert a property and its values atomically.
    /// Fails with a uniqueness violation when the property or a value uid exists.
    fn create_property(
        &self,
        property: Property,
    ) -> impl std::future::Future<Output = std::result::Result<Property, Self::Error>> + Send;

    /// Delete a property, its values and every assignment of it. false if absent.
    fn delete_property(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = std::result::Result<bool, Self::Error>> + Send;

    // Items

    fn get_item(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = std::result::Result<Option<Item>, Self::Error>> + Send;

    /// Insert an item and its assignments atomically
    fn create_item(
        &self,
        item: NewItem,
    ) -> impl std::future::Future<Output = std::result::Result<Item, Self::Error>> + Send;

    /// Delete an item and its assignments. false if absent.
    fn delete_item(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = std::result::Result<bool, Self::Error>> + Send;

    // Queries

    /// One ordered page of the items matching the selection's predicate
    fn select_items(
        &self,
        selection: &ItemSelection,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<Item>, Self::Error>> + Send;

    /// Number of items matching the predicate, ignoring any page window
    fn count_items(
        &self,
        predicate: &ItemPredicate,
    ) -> impl std::future::Future<Output = std::result::Result<u64, Self::Error>> + Send;

    /// `(value_uid, distinct matching items)` for one categorical property.
    /// Values held by no matching item are not returned.
    fn count_values(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> impl std::future::Future<Output = std::result::Result<Vec<(String, u64)>, Self::Error>> + Send;

    /// `(min, max)` of one numeric property over the matching items, None if unassigned
    fn numeric_range(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> impl std::future::Future<Output = std::result::Result<Option<(i64, i64)>, Self::Error>> + Send;
}

/// Key/value cache holding serialized catalog results.
/// Callers treat every failure as a miss, see [crate::domain::page_cache::PageCache].
#[cfg_attr(test, mockall::automock)]
pub trait ResultCache: Send + Sync + 'static {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<Option<String>>> + Send;

    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;

    fn delete(&self, keys: &[String]) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;

    /// Every live key starting with `prefix`
    fn keys_with_prefix(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<Vec<String>>> + Send;

    /// Atomically add one to the counter under `key` and return the new value.
    /// A missing counter starts at 0. Counters never expire.
    fn increment(&self, key: &str) -> impl std::future::Future<Output = anyhow::Result<u64>> + Send;
}

impl<L, R> ResultCache for Either<L, R>
where
    L: ResultCache,
    R: ResultCache,
{
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<Option<String>>> + Send {
        match self {
            Either::Left(l) => Either::Left(l.get(key)),
            Either::Right(r) => Either::Right(r.get(key)),
        }
    }

    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl std::future::Future<Output = anyhow::Result<()>> + Send {
        match self {
            Either::Left(l) => Either::Left(l.set(key, value, ttl)),
            Either::Right(r) => Either::Right(r.set(key, value, ttl)),
        }
    }

    fn delete(&self, keys: &[String]) -> impl std::future::Future<Output = anyhow::Result<()>> + Send {
        match self {
            Either::Left(l) => Either::Left(l.delete(keys)),
            Either::Right(r) => Either::Right(r.delete(keys)),
        }
    }

    fn keys_with_prefix(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<Vec<String>>> + Send {
        match self {
            Either::Left(l) => Either::Left(l.keys_with_prefix(prefix)),
            Either::Right(r) => Either::Right(r.keys_with_prefix(prefix)),
        }
    }

    fn increment(&self, key: &str) -> impl std::future::Future<Output = anyhow::Result<u64>> + Send {
        match self {
            Either::Left(l) => Either::Left(l.increment(key)),
            Either::Right(r) => Either::Right(r.increment(key)),
        }
    }
}

/// Catalog operations exposed to transport adapters
pub trait CatalogService: Send + Sync + 'static {
    fn list_catalog(
        &self,
        request: ListCatalogRequest,
    ) -> impl std::future::Future<Output = Result<CatalogPage>> + Send;

    fn get_filter_stats(
        &self,
        request: FilterStatsRequest,
    ) -> impl std::future::Future<Output = Result<FilterStats>> + Send;

    fn list_properties(&self) -> impl std::future::Future<Output = Result<Vec<PropertyResponse>>> + Send;

    fn get_item(&self, uid: &str) -> impl std::future::Future<Output = Result<ItemResponse>> + Send;

    fn create_item(
        &self,
        request: CreateItemRequest,
    ) -> impl std::future::Future<Output = Result<ItemResponse>> + Send;

    fn delete_item(&self, uid: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    fn create_property(
        &self,
        request: CreatePropertyRequest,
    ) -> impl std::future::Future<Output = Result<PropertyResponse>> + Send;

    fn delete_property(&self, uid: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}
