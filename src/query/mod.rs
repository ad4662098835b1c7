//! Filter, sort and pagination shared by every store.

mod engine;
mod spec;
pub use engine::QueryOutcome;
pub use spec::*;
