//! Normalized list query built leniently from request parameters.

use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    Price,
    Location,
    RentalYield,
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Accepts the API field name (`rentalYield`) as well as the column name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price" => Some(SortKey::Price),
            "location" => Some(SortKey::Location),
            "rentalYield" | "rental_yield" => Some(SortKey::RentalYield),
            "createdAt" | "created_at" => Some(SortKey::CreatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Location => "location",
            SortKey::RentalYield => "rental_yield",
            SortKey::CreatedAt => "created_at",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Inclusive numeric bounds; either side may be open.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    pub fn contains(&self, v: f64) -> bool {
        self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuerySpec {
    pub text_filter: Option<String>,
    pub price_range: Range,
    pub yield_range: Range,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        QuerySpec {
            text_filter: None,
            price_range: Range::default(),
            yield_range: Range::default(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    /// Build from raw query parameters. Never fails: unparseable values fall
    /// back to their defaults and out-of-range paging values are clamped.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |k: &str| params.get(k).map(|s| s.trim()).filter(|s| !s.is_empty());
        QuerySpec {
            text_filter: get("q").map(str::to_string),
            price_range: Range {
                min: get("minPrice").and_then(parse_number),
                max: get("maxPrice").and_then(parse_number),
            },
            yield_range: Range {
                min: get("minYield").and_then(parse_number),
                max: get("maxYield").and_then(parse_number),
            },
            sort_key: get("sortBy").and_then(SortKey::parse).unwrap_or_default(),
            sort_order: get("order").and_then(SortOrder::parse).unwrap_or_default(),
            page: get("page")
                .and_then(|s| s.parse::<i64>().ok())
                .map(|n| n.clamp(1, u32::MAX as i64) as u32)
                .unwrap_or(1),
            page_size: get("pageSize")
                .and_then(|s| s.parse::<i64>().ok())
                .map(|n| n.clamp(1, MAX_PAGE_SIZE as i64) as u32)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Page size clamped to [1, MAX_PAGE_SIZE], for specs built by hand.
    pub fn limit(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of filtered records skipped before the current page.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * self.limit() as u64
    }
}

/// Per-character lowercase, the way PostgreSQL's `lower()` folds text.
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_empty() {
        let spec = QuerySpec::from_params(&HashMap::new());
        assert_eq!(spec, QuerySpec::default());
        assert_eq!(spec.sort_key, SortKey::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Desc);
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 20);
    }

    #[test]
    fn parses_all_parameters() {
        let spec = QuerySpec::from_params(&params(&[
            ("q", " paris "),
            ("minPrice", "100"),
            ("maxPrice", "2000.5"),
            ("minYield", "3"),
            ("maxYield", "7"),
            ("sortBy", "rentalYield"),
            ("order", "ASC"),
            ("page", "3"),
            ("pageSize", "15"),
        ]));
        assert_eq!(spec.text_filter.as_deref(), Some("paris"));
        assert_eq!(spec.price_range, Range { min: Some(100.0), max: Some(2000.5) });
        assert_eq!(spec.yield_range, Range { min: Some(3.0), max: Some(7.0) });
        assert_eq!(spec.sort_key, SortKey::RentalYield);
        assert_eq!(spec.sort_order, SortOrder::Asc);
        assert_eq!(spec.page, 3);
        assert_eq!(spec.page_size, 15);
        assert_eq!(spec.offset(), 30);
    }

    #[test]
    fn lenient_parsing_falls_back() {
        let spec = QuerySpec::from_params(&params(&[
            ("q", "   "),
            ("minPrice", "cheap"),
            ("maxPrice", "NaN"),
            ("sortBy", "id"),
            ("order", "sideways"),
            ("page", "two"),
            ("pageSize", "1.5"),
        ]));
        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn paging_is_clamped() {
        let spec = QuerySpec::from_params(&params(&[("page", "-4"), ("pageSize", "1000")]));
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, MAX_PAGE_SIZE);
        let spec = QuerySpec::from_params(&params(&[("page", "0"), ("pageSize", "0")]));
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 1);
    }

    #[test]
    fn range_is_inclusive() {
        let r = Range { min: Some(10.0), max: Some(20.0) };
        assert!(r.contains(10.0));
        assert!(r.contains(20.0));
        assert!(!r.contains(20.01));
        assert!(Range::default().contains(f64::MAX));
    }

    #[test]
    fn hand_built_paging_is_clamped() {
        let spec = QuerySpec {
            page: 0,
            page_size: 0,
            ..QuerySpec::default()
        };
        assert_eq!(spec.limit(), 1);
        assert_eq!(spec.offset(), 0);
        let spec = QuerySpec {
            page: 3,
            page_size: 500,
            ..QuerySpec::default()
        };
        assert_eq!(spec.limit(), MAX_PAGE_SIZE);
        assert_eq!(spec.offset(), 200);
    }

    #[test]
    fn case_folding_is_per_character() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("Paris"), "paris");
    }
}
