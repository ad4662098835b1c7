//! Property CRUD on top of whichever store is active.

use super::PropertyValidator;
use crate::error::AppError;
use crate::model::Property;
use crate::query::QuerySpec;
use crate::response::Page;
use crate::store::PropertyStore;
use serde_json::Value;
use std::collections::HashMap;

pub struct PropertyService;

impl PropertyService {
    /// List with filters, sort and paging built leniently from query params.
    pub async fn list(
        store: &dyn PropertyStore,
        params: &HashMap<String, String>,
    ) -> Result<Page<Property>, AppError> {
        let spec = QuerySpec::from_params(params);
        let outcome = store.query(&spec).await?;
        Ok(Page {
            items: outcome.items,
            total: outcome.total,
            page: spec.page,
            page_size: spec.page_size,
        })
    }

    pub async fn create(store: &dyn PropertyStore, body: &HashMap<String, Value>) -> Result<Property, AppError> {
        let input = PropertyValidator::validate(body)?;
        let property = store.create(input).await?;
        tracing::info!(id = %property.id, "property created");
        Ok(property)
    }

    pub async fn read(store: &dyn PropertyStore, id: &str) -> Result<Property, AppError> {
        store
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Full replacement: the body must carry all three fields.
    pub async fn update(
        store: &dyn PropertyStore,
        id: &str,
        body: &HashMap<String, Value>,
    ) -> Result<Property, AppError> {
        let input = PropertyValidator::validate(body)?;
        store
            .update_by_id(id, input)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn delete(store: &dyn PropertyStore, id: &str) -> Result<(), AppError> {
        if store.delete_by_id(id).await? {
            tracing::info!(id = %id, "property deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(id.to_string()))
        }
    }
}
