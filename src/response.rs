//! Response bodies.

use serde::Serialize;

/// One page of a list query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub ok: bool,
}

impl Deleted {
    pub fn ok() -> Self {
        Deleted { ok: true }
    }
}
