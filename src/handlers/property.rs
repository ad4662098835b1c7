//! Property CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::response::Deleted;
use crate::service::PropertyService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<HashMap<String, Value>, AppError> {
    let Json(value) = body?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::Validation("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = PropertyService::list(state.store.as_ref(), &params).await?;
    Ok((StatusCode::OK, Json(page)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let property = PropertyService::create(state.store.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = PropertyService::read(state.store.as_ref(), &id).await?;
    Ok((StatusCode::OK, Json(property)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let property = PropertyService::update(state.store.as_ref(), &id, &body).await?;
    Ok((StatusCode::OK, Json(property)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    PropertyService::delete(state.store.as_ref(), &id).await?;
    Ok((StatusCode::OK, Json(Deleted::ok())))
}
