//! PostgreSQL implementation of the storage port
//! Rows map straight into the catalog models, predicates are built with QueryBuilder

mod items;
mod properties;
mod query;


use sqlx::PgPool;
use thiserror::Error;

use crate::domain::error::CatalogError;
use crate::domain::models::{
    Item, ItemPredicate, ItemSelection, NewItem, Property, PropertyOption,
};
use crate::domain::ports::CatalogStorage;

/// Schema read and written by [CatalogPgStorage]
pub static CATALOG_MIGRATIONS: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL storage implementation for the catalog
#[derive(Debug, Clone)]
pub struct CatalogPgStorage {
    pool: PgPool,
}

/// Error type for catalog storage operations
#[derive(Debug, Error)]
pub enum CatalogPgStorageError {
    /// Database error
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    /// Data parsing error (e.g., invalid enum value from database)
    #[error("Data parsing error: {0}")]
    Parse(String),
}

impl From<CatalogPgStorageError> for CatalogError {
    fn from(err: CatalogPgStorageError) -> Self {
        if let CatalogPgStorageError::Db(sqlx::Error::Database(db_err)) = &err {
            if db_err.is_unique_violation() {
                return CatalogError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return CatalogError::NotFound(db_err.message().to_string());
            }
            if db_err.is_check_violation() {
                return CatalogError::ValidationError(db_err.message().to_string());
            }
        }
        CatalogError::Internal(err.into())
    }
}

impl CatalogPgStorage {
    /// Create a new PostgreSQL catalog storage
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStorage for CatalogPgStorage {
    type Error = CatalogPgStorageError;

    async fn list_properties(&self) -> Result<Vec<Property>, Self::Error> {
        properties::list_properties(&self.pool).await
    }

    async fn find_options(&self, value_uids: &[String]) -> Result<Vec<PropertyOption>, Self::Error> {
        properties::find_options(&self.pool, value_uids).await
    }

    async fn create_property(&self, property: Property) -> Result<Property, Self::Error> {
        properties::create_property(&self.pool, property).await
    }

    async fn delete_property(&self, uid: &str) -> Result<bool, Self::Error> {
        properties::delete_property(&self.pool, uid).await
    }

    async fn get_item(&self, uid: &str) -> Result<Option<Item>, Self::Error> {
        items::get_item(&self.pool, uid).await
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Self::Error> {
        items::create_item(&self.pool, item).await
    }

    async fn delete_item(&self, uid: &str) -> Result<bool, Self::Error> {
        items::delete_item(&self.pool, uid).await
    }

    async fn select_items(&self, selection: &ItemSelection) -> Result<Vec<Item>, Self::Error> {
        query::select_items(&self.pool, selection).await
    }

    async fn count_items(&self, predicate: &ItemPredicate) -> Result<u64, Self::Error> {
        query::count_items(&self.pool, predicate).await
    }

    async fn count_values(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> Result<Vec<(String, u64)>, Self::Error> {
        query::count_values(&self.pool, property_uid, predicate).await
    }

    async fn numeric_range(
        &self,
        property_uid: &str,
        predicate: &ItemPredicate,
    ) -> Result<Option<(i64, i64)>, Self::Error> {
        query::numeric_range(&self.pool, property_uid, predicate).await
    }
}
