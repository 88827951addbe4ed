//! Property registry storage operations

use std::collections::HashMap;
use std::str::FromStr;

use models_catalog::PropertyType;
use models_catalog::service::{Property, PropertyOption};
use sqlx::{FromRow, PgPool};

use super::CatalogPgStorageError;

#[derive(Debug, FromRow)]
struct PropertyRow {
    uid: String,
    name: String,
    property_type: String,
}

#[derive(Debug, FromRow)]
struct PropertyValueRow {
    uid: String,
    property_uid: String,
    value: String,
}

impl From<PropertyValueRow> for PropertyOption {
    fn from(row: PropertyValueRow) -> Self {
        PropertyOption {
            uid: row.uid,
            property_uid: row.property_uid,
            text: row.value,
        }
    }
}

fn assemble(
    rows: Vec<PropertyRow>,
    value_rows: Vec<PropertyValueRow>,
) -> Result<Vec<Property>, CatalogPgStorageError> {
    let mut options: HashMap<String, Vec<PropertyOption>> = HashMap::new();
    for row in value_rows {
        options
            .entry(row.property_uid.clone())
            .or_default()
            .push(PropertyOption::from(row));
    }

    rows.into_iter()
        .map(|row| {
            Ok(Property {
                property_type: PropertyType::from_str(&row.property_type)
                    .map_err(|e| CatalogPgStorageError::Parse(e.to_string()))?,
                options: options.remove(&row.uid).unwrap_or_default(),
                uid: row.uid,
                name: row.name,
            })
        })
        .collect()
}

pub async fn list_properties(pool: &PgPool) -> Result<Vec<Property>, CatalogPgStorageError> {
    let rows = sqlx::query_as::<_, PropertyRow>(
        r#"
        SELECT uid, name, property_type
        FROM properties
        ORDER BY uid COLLATE "C"
        "#,
    )
    .fetch_all(pool)
    .await?;

    let value_rows = sqlx::query_as::<_, PropertyValueRow>(
        r#"
        SELECT uid, property_uid, value
        FROM property_values
        ORDER BY property_uid, display_order
        "#,
    )
    .fetch_all(pool)
    .await?;

    assemble(rows, value_rows)
}

pub async fn find_options(
    pool: &PgPool,
    value_uids: &[String],
) -> Result<Vec<PropertyOption>, CatalogPgStorageError> {
    let rows = sqlx::query_as::<_, PropertyValueRow>(
        r#"
        SELECT uid, property_uid, value
        FROM property_values
        WHERE uid = ANY($1)
        "#,
    )
    .bind(value_uids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PropertyOption::from).collect())
}

pub async fn create_property(
    pool: &PgPool,
    property: Property,
) -> Result<Property, CatalogPgStorageError> {
    // Start transaction
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO properties (uid, name, property_type)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(&property.uid)
    .bind(&property.name)
    .bind(property.property_type.to_string())
    .execute(&mut *tx)
    .await?;

    for (display_order, option) in property.options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO property_values (uid, property_uid, value, display_order)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&option.uid)
        .bind(&property.uid)
        .bind(&option.text)
        .bind(display_order as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(property)
}

/// Values and assignments go with the property through ON DELETE CASCADE
pub async fn delete_property(pool: &PgPool, uid: &str) -> Result<bool, CatalogPgStorageError> {
    let result = sqlx::query("DELETE FROM properties WHERE uid = $1")
        .bind(uid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
