//! Builds parameterized statements for the `properties` table. Identifiers
//! are constants; every client value goes through a bind parameter.

use super::params::PgBindValue;
use crate::model::PropertyInput;
use crate::query::{QuerySpec, SortKey};

pub const TABLE: &str = "properties";

const COLUMNS: &str = "id, price, location, rental_yield, created_at, updated_at";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> u32 {
        self.params.push(v);
        self.params.len() as u32
    }
}

pub fn insert(input: &PropertyInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let price = q.push_param(PgBindValue::F64(input.price));
    let location = q.push_param(PgBindValue::Text(input.location.clone()));
    let rental_yield = q.push_param(PgBindValue::F64(input.rental_yield));
    q.sql = format!(
        "INSERT INTO {} (price, location, rental_yield) VALUES (${}, ${}, ${}) RETURNING {}",
        TABLE, price, location, rental_yield, COLUMNS
    );
    q
}

pub fn select_by_id(id: uuid::Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", COLUMNS, TABLE, n);
    q
}

/// Full replacement of the writable columns; `created_at` is untouched.
pub fn update_by_id(id: uuid::Uuid, input: &PropertyInput) -> QueryBuf {
    let mut q = QueryBuf::new();
    let price = q.push_param(PgBindValue::F64(input.price));
    let location = q.push_param(PgBindValue::Text(input.location.clone()));
    let rental_yield = q.push_param(PgBindValue::F64(input.rental_yield));
    let id = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!(
        "UPDATE {} SET price = ${}, location = ${}, rental_yield = ${}, updated_at = NOW() WHERE id = ${} RETURNING {}",
        TABLE, price, location, rental_yield, id, COLUMNS
    );
    q
}

pub fn delete_by_id(id: uuid::Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::Uuid(id));
    q.sql = format!("DELETE FROM {} WHERE id = ${} RETURNING id", TABLE, n);
    q
}

/// `SELECT COUNT(*)` over the filtered set, ignoring sort and paging.
pub fn count(spec: &QuerySpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, spec);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", TABLE, where_clause);
    q
}

/// One page of the filtered, sorted set.
pub fn select_page(spec: &QuerySpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = where_clause(&mut q, spec);
    let limit = q.push_param(PgBindValue::I64(spec.limit() as i64));
    let offset = q.push_param(PgBindValue::I64(
        i64::try_from(spec.offset()).unwrap_or(i64::MAX),
    ));
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT ${} OFFSET ${}",
        COLUMNS,
        TABLE,
        where_clause,
        order_by(spec),
        limit,
        offset
    );
    q
}

fn where_clause(q: &mut QueryBuf, spec: &QuerySpec) -> String {
    let mut parts = Vec::new();
    if let Some(text) = &spec.text_filter {
        let n = q.push_param(PgBindValue::Text(text.clone()));
        parts.push(format!("strpos(lower(location), lower(${})) > 0", n));
    }
    for (col, range) in [("price", &spec.price_range), ("rental_yield", &spec.yield_range)] {
        if let Some(min) = range.min {
            let n = q.push_param(PgBindValue::F64(min));
            parts.push(format!("{} >= ${}", col, n));
        }
        if let Some(max) = range.max {
            let n = q.push_param(PgBindValue::F64(max));
            parts.push(format!("{} <= ${}", col, n));
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// Mirrors `QuerySpec::compare`: key, then `created_at`, in the requested
/// direction, then `id` ascending. Text compares bytewise under `COLLATE "C"`.
fn order_by(spec: &QuerySpec) -> String {
    let dir = spec.sort_order.sql();
    let mut keys = match spec.sort_key {
        SortKey::Location => vec![
            format!("lower(location) COLLATE \"C\" {}", dir),
            format!("location COLLATE \"C\" {}", dir),
        ],
        SortKey::CreatedAt => Vec::new(),
        key => vec![format!("{} {}", key.column(), dir)],
    };
    keys.push(format!("created_at {}", dir));
    keys.push("id ASC".to_string());
    keys.join(", ")
}
