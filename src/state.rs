//! Shared application state for all routes.

use crate::store::PropertyStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// The backend selected at startup; fixed for the life of the process.
    pub store: Arc<dyn PropertyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        AppState { store }
    }
}
