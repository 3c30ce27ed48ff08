use std::collections::HashMap;

use anyhow::Context;
use derive_builder::Builder;
use sqlx::{sqlite::SqlitePool, Row};

use crate::data::{MenuData, MenuItem, Price, ALL_CATEGORY};

const SCHEMA: [&str; 2] = [
    r#"
CREATE TABLE IF NOT EXISTS category (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL UNIQUE,
    position INTEGER NOT NULL
)"#,
    r#"
CREATE TABLE IF NOT EXISTS item (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    category     TEXT NOT NULL,
    name         TEXT NOT NULL,
    description  TEXT,
    special      TEXT,
    small_price  TEXT,
    medium_price TEXT,
    large_price  TEXT
)"#,
];

pub async fn init_schema(db_conn: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(db_conn)
            .await
            .with_context(|| "fail to create menu tables")?;
    }
    Ok(())
}

/// Append a category after the existing ones.
pub async fn add_category(db_conn: &SqlitePool, name: &str) -> anyhow::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO category
    (name, position)
VALUES
    (?, (SELECT COALESCE(MAX(position), -1) + 1 FROM category))"#,
    )
    .bind(name)
    .execute(db_conn)
    .await
    .with_context(|| format!("fail to add category {name}"))?
    .last_insert_rowid();
    Ok(id)
}

#[derive(Builder)]
pub struct NewItemProps {
    #[builder(setter(into))]
    category: String,
    #[builder(setter(into))]
    name: String,
    #[builder(setter(into, strip_option), default)]
    description: Option<String>,
    #[builder(setter(into, strip_option), default)]
    special: Option<String>,
    #[builder(setter(into, strip_option), default)]
    small_price: Option<String>,
    #[builder(setter(into, strip_option), default)]
    medium_price: Option<String>,
    #[builder(setter(into, strip_option), default)]
    large_price: Option<String>,
}

pub async fn add_item(db_conn: &SqlitePool, prop: NewItemProps) -> anyhow::Result<i64> {
    let NewItemProps {
        category,
        name,
        description,
        special,
        small_price,
        medium_price,
        large_price,
    } = prop;

    let id = sqlx::query(
        r#"
INSERT INTO item
    (category, name, description, special, small_price, medium_price, large_price)
VALUES
    (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(category.as_str())
    .bind(name.as_str())
    .bind(description)
    .bind(special)
    .bind(small_price)
    .bind(medium_price)
    .bind(large_price)
    .execute(db_conn)
    .await
    .with_context(|| format!("fail to add item {name} to {category}"))?
    .last_insert_rowid();

    Ok(id)
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    category: String,
    name: String,
    description: Option<String>,
    special: Option<String>,
    small_price: Option<String>,
    medium_price: Option<String>,
    large_price: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ItemRow> for MenuItem {
    fn from(row: ItemRow) -> Self {
        Self {
            name: row.name,
            description: non_empty(row.description),
            category: row.category,
            price: Price::from_fields(
                non_empty(row.special),
                non_empty(row.small_price),
                non_empty(row.medium_price),
                non_empty(row.large_price),
            ),
        }
    }
}

/// Load the whole menu. Items of the `All` category are every item, in
/// category order.
pub async fn load_menu(db_conn: &SqlitePool) -> anyhow::Result<MenuData> {
    let categories: Vec<String> =
        sqlx::query("SELECT name FROM category ORDER BY position, id")
            .fetch_all(db_conn)
            .await
            .with_context(|| "fail to list categories")?
            .iter()
            .map(|row| row.get("name"))
            .collect();

    let rows = sqlx::query_as::<_, ItemRow>(
        r#"
SELECT item.category AS category, item.name AS name,
       item.description AS description, item.special AS special,
       item.small_price AS small_price, item.medium_price AS medium_price,
       item.large_price AS large_price
FROM item
LEFT JOIN category ON category.name = item.category
ORDER BY COALESCE(category.position, 9223372036854775807), item.id"#,
    )
    .fetch_all(db_conn)
    .await
    .with_context(|| "fail to list items")?;

    let mut items: HashMap<String, Vec<MenuItem>> = categories
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();
    let mut everything = Vec::with_capacity(rows.len());
    for row in rows {
        let item = MenuItem::from(row);
        if let Some(bucket) = items.get_mut(&item.category) {
            bucket.push(item.clone());
        }
        everything.push(item);
    }
    if let Some(all) = items.get_mut(ALL_CATEGORY) {
        *all = everything;
    }

    tracing::info!(categories = categories.len(), "menu loaded from sqlite");
    Ok(MenuData { categories, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_db() -> SqlitePool {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_load_menu_keeps_order() {
        let db = memory_db().await;

        add_category(&db, "All").await.unwrap();
        add_category(&db, "Drinks").await.unwrap();
        add_category(&db, "Grill").await.unwrap();

        let kebab = NewItemPropsBuilder::default()
            .category("Grill")
            .name("Kebab")
            .small_price("90")
            .large_price("150")
            .build()
            .unwrap();
        add_item(&db, kebab).await.unwrap();
        let tea = NewItemPropsBuilder::default()
            .category("Drinks")
            .name("Tea")
            .description("with mint")
            .special("15")
            .build()
            .unwrap();
        add_item(&db, tea).await.unwrap();

        let menu = load_menu(&db).await.unwrap();
        assert_eq!(menu.categories, vec!["All", "Drinks", "Grill"]);

        let drinks = menu.items_of("Drinks").unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].description.as_deref(), Some("with mint"));
        assert_eq!(drinks[0].price, Price::Special("15".to_string()));

        let grill = menu.items_of("Grill").unwrap();
        assert_eq!(
            grill[0].price,
            Price::Tiered {
                small: Some("90".to_string()),
                medium: None,
                large: Some("150".to_string()),
            }
        );

        let all: Vec<&str> = menu
            .items_of("All")
            .unwrap()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(all, vec!["Tea", "Kebab"]);
    }

    #[tokio::test]
    async fn test_empty_category_has_entry() {
        let db = memory_db().await;
        add_category(&db, "Desserts").await.unwrap();

        let menu = load_menu(&db).await.unwrap();
        assert_eq!(menu.items_of("Desserts").map(<[MenuItem]>::len), Some(0));
    }

    #[tokio::test]
    async fn test_duplicate_category_is_rejected() {
        let db = memory_db().await;
        add_category(&db, "Drinks").await.unwrap();
        assert!(add_category(&db, "Drinks").await.is_err());
    }
}
