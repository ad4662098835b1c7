//! Property storage: one trait, a PostgreSQL-backed durable implementation
//! and an in-process volatile one. Exactly one is chosen at startup.

mod memory;
mod postgres;
mod schema;

pub use memory::VolatileStore;
pub use postgres::DurableStore;
pub use schema::{ensure_database_exists, ensure_schema};

use crate::config::Settings;
use crate::error::StoreError;
use crate::model::{Property, PropertyInput};
use crate::query::{QueryOutcome, QuerySpec};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Durable,
    Volatile,
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreMode::Durable => f.write_str("durable"),
            StoreMode::Volatile => f.write_str("volatile"),
        }
    }
}

/// Operations every backend provides with identical semantics. Missing ids
/// are reported as `None` / `false`, never as an error.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    fn mode(&self) -> StoreMode;

    async fn create(&self, input: PropertyInput) -> Result<Property, StoreError>;

    /// Filter, sort and paginate; `total` counts all matches before paging.
    async fn query(&self, spec: &QuerySpec) -> Result<QueryOutcome, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Property>, StoreError>;

    async fn update_by_id(
        &self,
        id: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Select the backend from settings. With a database URL this connects and
/// bootstraps the schema; any failure is returned, never downgraded to the
/// volatile store.
pub async fn open(settings: &Settings) -> Result<Arc<dyn PropertyStore>, StoreError> {
    match &settings.database_url {
        Some(url) => {
            ensure_database_exists(url, settings.connect_timeout).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.connect_timeout)
                .connect(url)
                .await
                .map_err(StoreError::Unavailable)?;
            ensure_schema(&pool).await?;
            Ok(Arc::new(DurableStore::new(pool)))
        }
        None => Ok(Arc::new(VolatileStore::new())),
    }
}
