//! PostgreSQL-backed store.

use super::{PropertyStore, StoreMode};
use crate::error::StoreError;
use crate::model::{Property, PropertyInput};
use crate::query::{QueryOutcome, QuerySpec};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(FromRow)]
struct PropertyRow {
    id: Uuid,
    price: f64,
    location: String,
    rental_yield: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(r: PropertyRow) -> Self {
        Property {
            id: r.id.to_string(),
            price: r.price,
            location: r.location,
            rental_yield: r.rental_yield,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub struct DurableStore {
    pool: PgPool,
}

impl DurableStore {
    pub fn new(pool: PgPool) -> Self {
        DurableStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ids are UUIDs; anything else cannot name a stored row.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn bind_all<'q>(
    q: &'q QueryBuf,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, PropertyRow, sqlx::postgres::PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, PropertyRow>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

#[async_trait]
impl PropertyStore for DurableStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Durable
    }

    async fn create(&self, input: PropertyInput) -> Result<Property, StoreError> {
        let q = sql::insert(&input);
        let row = bind_all(&q).fetch_one(&self.pool).await?;
        Ok(row.into())
    }

    async fn query(&self, spec: &QuerySpec) -> Result<QueryOutcome, StoreError> {
        let count_q = sql::count(spec);
        let page_q = sql::select_page(spec);

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let mut count = sqlx::query_scalar::<_, i64>(&count_q.sql);
        for p in &count_q.params {
            count = count.bind(p.clone());
        }
        let total = count.fetch_one(&mut *tx).await?;

        let rows = bind_all(&page_q).fetch_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(QueryOutcome {
            items: rows.into_iter().map(Property::from).collect(),
            total: total.max(0) as u64,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let q = sql::select_by_id(id);
        let row = bind_all(&q).fetch_optional(&self.pool).await?;
        Ok(row.map(Property::from))
    }

    async fn update_by_id(
        &self,
        id: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let q = sql::update_by_id(id, &input);
        let row = bind_all(&q).fetch_optional(&self.pool).await?;
        Ok(row.map(Property::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let q = sql::delete_by_id(id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row: Option<PgRow> = query.fetch_optional(&self.pool).await?;
        Ok(row.is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Unavailable)?;
        Ok(())
    }
}
