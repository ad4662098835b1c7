//! In-process store. Records live only as long as the process.

use super::{PropertyStore, StoreMode};
use crate::error::StoreError;
use crate::model::{Property, PropertyInput};
use crate::query::{QueryOutcome, QuerySpec};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Newest-first list guarded by a single lock. Writers hold the write lock
/// for their whole read-modify-write.
#[derive(Default)]
pub struct VolatileStore {
    records: RwLock<VecDeque<Property>>,
}

impl VolatileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Microsecond timestamp strictly after the newest record's `created_at`.
fn next_created_at(newest: Option<&Property>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match newest {
        Some(p) if now <= p.created_at => p.created_at + Duration::microseconds(1),
        _ => now,
    }
}

#[async_trait]
impl PropertyStore for VolatileStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Volatile
    }

    async fn create(&self, input: PropertyInput) -> Result<Property, StoreError> {
        let mut records = self.records.write().await;
        let created_at = next_created_at(records.front());
        let property = Property {
            id: uuid::Uuid::new_v4().to_string(),
            price: input.price,
            location: input.location,
            rental_yield: input.rental_yield,
            created_at,
            updated_at: created_at,
        };
        records.push_front(property.clone());
        Ok(property)
    }

    async fn query(&self, spec: &QuerySpec) -> Result<QueryOutcome, StoreError> {
        let snapshot: Vec<Property> = self.records.read().await.iter().cloned().collect();
        Ok(spec.execute(snapshot))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.id == id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        input: PropertyInput,
    ) -> Result<Option<Property>, StoreError> {
        let mut records = self.records.write().await;
        let Some(property) = records.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let now = Utc::now().trunc_subsecs(6).max(property.created_at);
        property.apply(input, now);
        Ok(Some(property.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.iter().position(|p| p.id == id) {
            Some(i) => {
                records.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
