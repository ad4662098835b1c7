//! Request body validation for property writes.

use crate::error::AppError;
use crate::model::PropertyInput;
use serde_json::Value;
use std::collections::HashMap;

pub struct PropertyValidator;

impl PropertyValidator {
    /// Validate a write body. All three fields must be present; numbers may be
    /// sent as JSON numbers or numeric strings. Other keys are ignored.
    pub fn validate(body: &HashMap<String, Value>) -> Result<PropertyInput, AppError> {
        let price = number_field(body, "price")?;
        let location = string_field(body, "location")?;
        let rental_yield = number_field(body, "rentalYield")?;
        Ok(PropertyInput {
            price,
            location,
            rental_yield,
        })
    }
}

fn required<'a>(body: &'a HashMap<String, Value>, col: &str) -> Result<&'a Value, AppError> {
    match body.get(col) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", col))),
        Some(v) => Ok(v),
    }
}

fn number_field(body: &HashMap<String, Value>, col: &str) -> Result<f64, AppError> {
    let n = match required(body, col)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(AppError::Validation(format!("{} must be a number", col))),
    }
}

fn string_field(body: &HashMap<String, Value>, col: &str) -> Result<String, AppError> {
    let s = required(body, col)?
        .as_str()
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))?
        .trim();
    if s.is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    Ok(s.to_string())
}
