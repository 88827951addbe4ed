//! This module provides dynamic query building for catalog selections and facets

use sqlx::{PgPool, Postgres, QueryBuilder, prelude::FromRow};

use super::CatalogPgStorageError;
use super::items::{ItemRow, hydrate_items};
use crate::domain::models::{ConstraintKind, Item, ItemPredicate, ItemSelection, SortKey};

/// Append the predicate as `AND ...` clauses over the items table aliased `i`.
///
/// Each constraint is an EXISTS over the item's assignment of that property,
/// so the clauses intersect across properties.
fn push_predicate<'args>(builder: &mut QueryBuilder<'args, Postgres>, predicate: &ItemPredicate) {
    if let Some(fragment) = predicate.name_fragment() {
        builder
            .push(" AND i.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(fragment)));
    }

    for constraint in predicate.constraints() {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM item_properties f WHERE f.item_uid = i.uid AND f.property_uid = ",
            )
            .push_bind(constraint.property_uid.clone());

        match &constraint.kind {
            ConstraintKind::ValueIn(values) => {
                builder
                    .push(" AND f.value_uid = ANY(")
                    .push_bind(values.clone())
                    .push(")");
            }
            ConstraintKind::Between(range) => {
                builder.push(" AND f.value_int IS NOT NULL");
                if let Some(from) = range.from {
                    builder.push(" AND f.value_int >= ").push_bind(from);
                }
                if let Some(to) = range.to {
                    builder.push(" AND f.value_int <= ").push_bind(to);
                }
            }
        }

        builder.push(")");
    }
}

/// Escape LIKE wildcards so the fragment matches literally
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Uid => r#" ORDER BY i.uid COLLATE "C""#,
        SortKey::Name => r#" ORDER BY i.name COLLATE "C", i.uid COLLATE "C""#,
    }
}

pub async fn select_items(
    pool: &PgPool,
    selection: &ItemSelection,
) -> Result<Vec<Item>, CatalogPgStorageError> {
    let mut builder = QueryBuilder::new("SELECT i.uid, i.name FROM items i WHERE TRUE");
    push_predicate(&mut builder, &selection.predicate);
    builder.push(order_by(selection.sort));
    builder
        .push(" LIMIT ")
        .push_bind(i64::from(selection.window.page_size()))
        .push(" OFFSET ")
        .push_bind(i64::try_from(selection.window.offset()).unwrap_or(i64::MAX));

    let rows: Vec<ItemRow> = builder.build_query_as().fetch_all(pool).await?;

    hydrate_items(pool, rows).await
}

pub async fn count_items(
    pool: &PgPool,
    predicate: &ItemPredicate,
) -> Result<u64, CatalogPgStorageError> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM items i WHERE TRUE");
    push_predicate(&mut builder, predicate);

    let (count,): (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(count.max(0) as u64)
}

#[derive(Debug, FromRow)]
struct ValueCountRow {
    value_uid: String,
    item_count: i64,
}

pub async fn count_values(
    pool: &PgPool,
    property_uid: &str,
    predicate: &ItemPredicate,
) -> Result<Vec<(String, u64)>, CatalogPgStorageError> {
    let mut builder = QueryBuilder::new(
        r#"
        SELECT ip.value_uid, COUNT(DISTINCT ip.item_uid) AS item_count
        FROM item_properties ip
        JOIN items i ON i.uid = ip.item_uid
        WHERE ip.value_uid IS NOT NULL AND ip.property_uid = "#,
    );
    builder.push_bind(property_uid.to_string());
    push_predicate(&mut builder, predicate);
    builder.push(r#" GROUP BY ip.value_uid ORDER BY ip.value_uid COLLATE "C""#);

    let rows: Vec<ValueCountRow> = builder.build_query_as().fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.value_uid, row.item_count.max(0) as u64))
        .collect())
}

pub async fn numeric_range(
    pool: &PgPool,
    property_uid: &str,
    predicate: &ItemPredicate,
) -> Result<Option<(i64, i64)>, CatalogPgStorageError> {
    let mut builder = QueryBuilder::new(
        r#"
        SELECT MIN(ip.value_int), MAX(ip.value_int)
        FROM item_properties ip
        JOIN items i ON i.uid = ip.item_uid
        WHERE ip.value_int IS NOT NULL AND ip.property_uid = "#,
    );
    builder.push_bind(property_uid.to_string());
    push_predicate(&mut builder, predicate);

    let (min, max): (Option<i64>, Option<i64>) = builder.build_query_as().fetch_one(pool).await?;
    Ok(min.zip(max))
}
