//! The property record and its validated write payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored property. Serialized with camelCase keys for the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub price: f64,
    pub location: String,
    pub rental_yield: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three client-writable fields, after validation. Used for both create
/// and full-replacement update.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyInput {
    pub price: f64,
    pub location: String,
    pub rental_yield: f64,
}

impl Property {
    /// Replace the writable fields, keeping `id` and `created_at`.
    pub fn apply(&mut self, input: PropertyInput, now: DateTime<Utc>) {
        self.price = input.price;
        self.location = input.location;
        self.rental_yield = input.rental_yield;
        self.updated_at = now;
    }
}
