use std::future::Future;
use std::path::PathBuf;

use anyhow::Context;
use sqlx::SqlitePool;

use crate::data::MenuData;
use crate::db;

/// Supplies the menu once, when the view starts.
pub trait MenuProvider {
    fn fetch_menu_data(&self) -> impl Future<Output = anyhow::Result<MenuData>> + Send;
}

/// A menu fixed in memory.
pub struct StaticProvider {
    data: MenuData,
}

impl StaticProvider {
    pub fn new(data: MenuData) -> Self {
        Self { data }
    }
}

impl MenuProvider for StaticProvider {
    async fn fetch_menu_data(&self) -> anyhow::Result<MenuData> {
        Ok(self.data.clone())
    }
}

/// Reads the menu from a JSON document on disk.
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MenuProvider for JsonFileProvider {
    async fn fetch_menu_data(&self) -> anyhow::Result<MenuData> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("fail to read menu file {}", self.path.display()))?;
        let data: MenuData = serde_json::from_slice(&raw)
            .with_context(|| format!("fail to parse menu file {}", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            categories = data.categories.len(),
            "menu loaded"
        );
        Ok(data)
    }
}

pub struct SqliteProvider {
    db_pool: SqlitePool,
}

impl SqliteProvider {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let db_pool = SqlitePool::connect(addr)
            .await
            .with_context(|| format!("fail to open database {addr}"))?;
        Ok(Self { db_pool })
    }

    pub fn from_pool(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }
}

impl MenuProvider for SqliteProvider {
    async fn fetch_menu_data(&self) -> anyhow::Result<MenuData> {
        db::load_menu(&self.db_pool).await
    }
}

/// Where the menu comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    Json(PathBuf),
    Sqlite(String),
}

impl MenuSource {
    pub const DEFAULT_JSON: &'static str = "data/menu.json";

    /// `DATABASE_URL` wins over `MENU_DATA`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("MENU_DATA").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, menu_data: Option<String>) -> Self {
        match database_url.filter(|url| !url.is_empty()) {
            Some(url) => Self::Sqlite(url),
            None => Self::Json(
                menu_data
                    .filter(|path| !path.is_empty())
                    .unwrap_or_else(|| Self::DEFAULT_JSON.to_string())
                    .into(),
            ),
        }
    }
}

impl MenuProvider for MenuSource {
    async fn fetch_menu_data(&self) -> anyhow::Result<MenuData> {
        match self {
            Self::Json(path) => JsonFileProvider::new(path.clone()).fetch_menu_data().await,
            Self::Sqlite(url) => SqliteProvider::connect(url).await?.fetch_menu_data().await,
        }
    }
}
