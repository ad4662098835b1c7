//! Property CRUD routes under `/api/properties`.

use crate::handlers::property::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn property_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/properties", get(list).post(create))
        .route(
            "/api/properties/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
