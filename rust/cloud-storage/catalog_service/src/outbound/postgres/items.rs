//! Item storage operations

use std::collections::HashMap;

use models_catalog::service::{Item, ItemProperty, ItemPropertyValue, NewItem, PropertyValue};
use sqlx::{FromRow, PgExecutor, PgPool};

use super::CatalogPgStorageError;

#[derive(Debug, FromRow)]
pub(super) struct ItemRow {
    pub uid: String,
    pub name: String,
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    item_uid: String,
    property_uid: String,
    property_name: String,
    value_uid: Option<String>,
    value_text: Option<String>,
    value_int: Option<i64>,
}

impl TryFrom<AssignmentRow> for ItemProperty {
    type Error = CatalogPgStorageError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let value = match (row.value_uid, row.value_text, row.value_int) {
            (Some(value_uid), Some(text), None) => ItemPropertyValue::Categorical { value_uid, text },
            (None, None, Some(n)) => ItemPropertyValue::Numeric(n),
            _ => {
                return Err(CatalogPgStorageError::Parse(format!(
                    "item '{}' has a malformed assignment for property '{}'",
                    row.item_uid, row.property_uid
                )));
            }
        };

        Ok(ItemProperty {
            property_uid: row.property_uid,
            property_name: row.property_name,
            value,
        })
    }
}

/// Attach the assignments of every item in `rows`, keeping the row order
pub(super) async fn hydrate_items<'e, E>(
    executor: E,
    rows: Vec<ItemRow>,
) -> Result<Vec<Item>, CatalogPgStorageError>
where
    E: PgExecutor<'e>,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let uids: Vec<String> = rows.iter().map(|row| row.uid.clone()).collect();
    let assignment_rows = sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT
            ip.item_uid,
            ip.property_uid,
            p.name AS property_name,
            ip.value_uid,
            pv.value AS value_text,
            ip.value_int
        FROM item_properties ip
        JOIN properties p ON p.uid = ip.property_uid
        LEFT JOIN property_values pv ON pv.uid = ip.value_uid
        WHERE ip.item_uid = ANY($1)
        ORDER BY ip.item_uid, ip.property_uid COLLATE "C"
        "#,
    )
    .bind(&uids)
    .fetch_all(executor)
    .await?;

    let mut by_item: HashMap<String, Vec<ItemProperty>> = HashMap::new();
    for row in assignment_rows {
        let item_uid = row.item_uid.clone();
        by_item
            .entry(item_uid)
            .or_default()
            .push(ItemProperty::try_from(row)?);
    }

    Ok(rows
        .into_iter()
        .map(|row| Item {
            properties: by_item.remove(&row.uid).unwrap_or_default(),
            uid: row.uid,
            name: row.name,
        })
        .collect())
}

pub async fn get_item(pool: &PgPool, uid: &str) -> Result<Option<Item>, CatalogPgStorageError> {
    let row = sqlx::query_as::<_, ItemRow>("SELECT uid, name FROM items WHERE uid = $1")
        .bind(uid)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(hydrate_items(pool, vec![row]).await?.pop())
}

pub async fn create_item(pool: &PgPool, item: NewItem) -> Result<Item, CatalogPgStorageError> {
    // Start transaction
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO items (uid, name) VALUES ($1, $2)")
        .bind(&item.uid)
        .bind(&item.name)
        .execute(&mut *tx)
        .await?;

    for assignment in &item.assignments {
        let (value_uid, value_int) = match &assignment.value {
            PropertyValue::Categorical(value_uid) => (Some(value_uid.as_str()), None),
            PropertyValue::Numeric(n) => (None, Some(*n)),
        };

        sqlx::query(
            r#"
            INSERT INTO item_properties (item_uid, property_uid, value_uid, value_int)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.uid)
        .bind(&assignment.property_uid)
        .bind(value_uid)
        .bind(value_int)
        .execute(&mut *tx)
        .await?;
    }

    let created = hydrate_items(
        &mut *tx,
        vec![ItemRow {
            uid: item.uid,
            name: item.name,
        }],
    )
    .await?;

    tx.commit().await?;

    created
        .into_iter()
        .next()
        .ok_or_else(|| CatalogPgStorageError::Parse("created item could not be read back".to_string()))
}

/// Assignments go with the item through ON DELETE CASCADE
pub async fn delete_item(pool: &PgPool, uid: &str) -> Result<bool, CatalogPgStorageError> {
    let result = sqlx::query("DELETE FROM items WHERE uid = $1")
        .bind(uid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
