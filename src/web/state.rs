use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{error, info};

use crate::{
    config::AppConfig,
    osint::{
        self, OsintNode,
        presenter::{SidebarCategory, sidebar_categories},
    },
    web::escape_script_json,
};

/// The category tree plus everything derived from it, computed once at startup.
pub struct OsintCatalog {
    tree: OsintNode,
    tree_json: String,
    categories: Vec<SidebarCategory>,
}

impl OsintCatalog {
    pub fn new(tree: OsintNode) -> Self {
        let tree_json = match serde_json::to_string(&tree) {
            Ok(json) => escape_script_json(&json),
            Err(err) => {
                error!(?err, "failed to serialize OSINT tree");
                "{}".to_string()
            }
        };
        let categories = sidebar_categories(&tree);

        Self {
            tree,
            tree_json,
            categories,
        }
    }

    pub fn tree(&self) -> &OsintNode {
        &self.tree
    }

    /// Serialized tree, safe to embed inside a `<script>` element.
    pub fn tree_json(&self) -> &str {
        &self.tree_json
    }

    pub fn categories(&self) -> &[SidebarCategory] {
        &self.categories
    }
}

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    catalog: Arc<OsintCatalog>,
    cookie_key: Key,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let instance_dir = config.instance_dir();
        fs::create_dir_all(&instance_dir).with_context(|| {
            format!(
                "failed to create instance directory {}",
                instance_dir.display()
            )
        })?;

        let database_path = config.database_path();
        let connect_options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database {}", database_path.display()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;

        info!(path = %database_path.display(), "database ready");

        let tree = osint::load_osint_data(&config.data_file_path());

        Ok(Self::from_parts(pool, tree, config.cookie_key()))
    }

    pub fn from_parts(pool: SqlitePool, tree: OsintNode, cookie_key: Key) -> Self {
        Self {
            pool,
            catalog: Arc::new(OsintCatalog::new(tree)),
            cookie_key,
        }
    }

    pub fn pool_ref(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn catalog(&self) -> &OsintCatalog {
        &self.catalog
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
