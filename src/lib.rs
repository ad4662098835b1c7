//! Property listing service: CRUD over a durable (PostgreSQL) or volatile
//! (in-process) store, with filtering, sorting and pagination on read.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Property, PropertyInput};
pub use query::{QueryOutcome, QuerySpec};
pub use routes::build_router;
pub use service::PropertyService;
pub use state::AppState;
pub use store::{DurableStore, PropertyStore, StoreMode, VolatileStore};
