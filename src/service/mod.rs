//! PropertyService: validation and store orchestration for handlers.

mod property;
mod validation;
pub use property::PropertyService;
pub use validation::PropertyValidator;
