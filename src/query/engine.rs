//! In-process execution of a [`QuerySpec`]: filter, sort, count, paginate.
//! The SQL builder compiles the same spec for PostgreSQL; both must agree.

use super::spec::{fold_case, QuerySpec, SortKey, SortOrder};
use crate::model::Property;
use std::cmp::Ordering;

/// Items of one page plus the filtered count before pagination.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOutcome {
    pub items: Vec<Property>,
    pub total: u64,
}

impl QuerySpec {
    pub fn matches(&self, p: &Property) -> bool {
        if let Some(q) = &self.text_filter {
            if !fold_case(&p.location).contains(&fold_case(q)) {
                return false;
            }
        }
        self.price_range.contains(p.price) && self.yield_range.contains(p.rental_yield)
    }

    /// Total order over records: sort key, then `created_at`, both in the
    /// requested direction, then `id` ascending.
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let primary = match self.sort_key {
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::RentalYield => a.rental_yield.total_cmp(&b.rental_yield),
            SortKey::Location => fold_case(&a.location)
                .cmp(&fold_case(&b.location))
                .then_with(|| a.location.cmp(&b.location)),
            SortKey::CreatedAt => Ordering::Equal,
        }
        .then_with(|| a.created_at.cmp(&b.created_at));
        let directed = match self.sort_order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        directed.then_with(|| a.id.cmp(&b.id))
    }

    pub fn execute(&self, records: impl IntoIterator<Item = Property>) -> QueryOutcome {
        let mut matched: Vec<Property> = records.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(self.limit() as usize)
            .collect();
        QueryOutcome { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::spec::Range;
    use chrono::{Duration, TimeZone, Utc};

    fn prop(id: &str, price: f64, location: &str, rental_yield: f64, minute: i64) -> Property {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
        Property {
            id: id.into(),
            price,
            location: location.into(),
            rental_yield,
            created_at: t,
            updated_at: t,
        }
    }

    fn sample() -> Vec<Property> {
        vec![
            prop("c", 1500.0, "Paris", 3.0, 2),
            prop("b", 500.0, "Lyon", 6.0, 1),
            prop("a", 1000.0, "Paris", 4.5, 0),
        ]
    }

    fn prices(o: &QueryOutcome) -> Vec<f64> {
        o.items.iter().map(|p| p.price).collect()
    }

    #[test]
    fn text_filter_and_price_sort() {
        let spec = QuerySpec {
            text_filter: Some("paris".into()),
            sort_key: SortKey::Price,
            sort_order: SortOrder::Asc,
            ..QuerySpec::default()
        };
        let out = spec.execute(sample());
        assert_eq!(prices(&out), vec![1000.0, 1500.0]);
        assert_eq!(out.total, 2);
    }

    #[test]
    fn default_order_is_newest_first() {
        let out = QuerySpec::default().execute(sample());
        let ids: Vec<&str> = out.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn ranges_are_conjunctive() {
        let spec = QuerySpec {
            price_range: Range { min: Some(600.0), max: Some(1500.0) },
            yield_range: Range { min: Some(4.0), max: None },
            ..QuerySpec::default()
        };
        let out = spec.execute(sample());
        assert_eq!(prices(&out), vec![1000.0]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let spec = QuerySpec {
            price_range: Range { min: Some(2000.0), max: Some(100.0) },
            ..QuerySpec::default()
        };
        let out = spec.execute(sample());
        assert!(out.items.is_empty());
        assert_eq!(out.total, 0);
    }

    #[test]
    fn location_sort_ignores_case() {
        let records = vec![
            prop("1", 1.0, "paris", 1.0, 0),
            prop("2", 1.0, "Lyon", 1.0, 1),
            prop("3", 1.0, "amiens", 1.0, 2),
        ];
        let spec = QuerySpec {
            sort_key: SortKey::Location,
            sort_order: SortOrder::Asc,
            ..QuerySpec::default()
        };
        let locations: Vec<String> = spec.execute(records).items.into_iter().map(|p| p.location).collect();
        assert_eq!(locations, vec!["amiens", "Lyon", "paris"]);
    }

    #[test]
    fn ties_break_on_created_at_then_id() {
        let records = vec![
            prop("y", 100.0, "A", 1.0, 0),
            prop("x", 100.0, "A", 1.0, 0),
            prop("z", 100.0, "A", 1.0, 5),
        ];
        let spec = QuerySpec {
            sort_key: SortKey::Price,
            sort_order: SortOrder::Desc,
            ..QuerySpec::default()
        };
        let ids: Vec<String> = spec.execute(records).items.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn zero_paging_is_clamped_not_panicking() {
        let spec = QuerySpec {
            sort_key: SortKey::Price,
            sort_order: SortOrder::Asc,
            page: 0,
            page_size: 0,
            ..QuerySpec::default()
        };
        let out = spec.execute(sample());
        assert_eq!(prices(&out), vec![500.0]);
        assert_eq!(out.total, 3);
    }

    #[test]
    fn final_sigma_matches_per_character_folding() {
        let records = vec![prop("1", 1.0, "ΟΔΟΣ", 1.0, 0)];
        let spec = QuerySpec {
            text_filter: Some("οδοσ".into()),
            ..QuerySpec::default()
        };
        assert_eq!(spec.execute(records).total, 1);
    }

    #[test]
    fn pagination_keeps_total() {
        let records: Vec<Property> = (0..45).map(|i| prop(&format!("{:02}", i), i as f64, "X", 1.0, i)).collect();
        for page in 1..=4 {
            let spec = QuerySpec {
                sort_key: SortKey::Price,
                sort_order: SortOrder::Asc,
                page,
                page_size: 20,
                ..QuerySpec::default()
            };
            let out = spec.execute(records.clone());
            assert_eq!(out.total, 45);
            assert!(out.items.len() <= 20);
            let expected = match page {
                1 | 2 => 20,
                3 => 5,
                _ => 0,
            };
            assert_eq!(out.items.len(), expected);
            assert!(out.items.windows(2).all(|w| w[0].price <= w[1].price));
        }
    }
}
