//! Pure derived views over the accumulated collection.
//!
//! The pipeline order is fixed: category filter, then search filter, then
//! sort. Both filters are pure predicates, so the resulting *set* is the
//! same whichever ran first; the fixed order just makes the computation
//! reproducible. Nothing here mutates its input - filters and sort never
//! leak back into the accumulated feed.

use std::collections::BTreeSet;

use nexus_catalog_core::{FilterState, Product, SortOrder};
use rust_decimal::Decimal;

/// Compute the filtered, sorted product sequence for the given filter state.
///
/// Deterministic and order-stable: the same (collection, filter) inputs
/// always produce the same output, and equal-priced products keep their
/// prior relative order under either sort (`sort_by` is a stable sort).
/// A price that fails to parse sorts as the lowest possible value: first
/// ascending, last descending.
#[must_use]
pub fn derive_view(products: &[Product], filter: &FilterState) -> Vec<Product> {
    let needle = filter.search.to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| filter.category.matches(&p.category))
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match filter.sort {
        SortOrder::Unsorted => {}
        SortOrder::PriceAscending => {
            result.sort_by(|a, b| sort_price(a).cmp(&sort_price(b)));
        }
        SortOrder::PriceDescending => {
            result.sort_by(|a, b| sort_price(b).cmp(&sort_price(a)));
        }
    }

    result
}

/// Distinct non-empty category values present in the full collection.
///
/// Computed from the accumulated collection, not the filtered view, so the
/// UI can always offer every known category. Sorted for a deterministic
/// order.
#[must_use]
pub fn known_categories(products: &[Product]) -> Vec<String> {
    let distinct: BTreeSet<&str> = products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    distinct.into_iter().map(str::to_owned).collect()
}

fn sort_price(product: &Product) -> Decimal {
    product.price_decimal().unwrap_or(Decimal::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_catalog_core::{CategoryFilter, Seller};

    fn product(id: &str, name: &str, price: &str, category: &str) -> Product {
        Product {
            id: id.to_owned(),
            name: name.to_owned(),
            description: String::new(),
            price: price.to_owned(),
            category: category.to_owned(),
            image: String::new(),
            seller: Seller::unknown(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", "Signal Jacket", "120.00", "clothing"),
            product("2", "Mesh Router", "89.99", "electronics"),
            product("3", "Grid Lamp", "45.50", "home"),
            product("4", "Pulse Monitor", "89.99", "electronics"),
            product("5", "Cargo Vest", "75.00", "clothing"),
        ]
    }

    fn ids(view: &[Product]) -> Vec<&str> {
        view.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn neutral_filter_preserves_arrival_order() {
        let products = sample();
        let view = derive_view(&products, &FilterState::default());
        assert_eq!(ids(&view), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let products = sample();
        let filter = FilterState {
            category: CategoryFilter::Only("electronics".to_owned()),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_view(&products, &filter)), ["2", "4"]);
    }

    #[test]
    fn unmatched_category_yields_empty_view_not_error() {
        let products = sample();
        let filter = FilterState {
            category: CategoryFilter::Only("appliances".to_owned()),
            ..FilterState::default()
        };
        assert!(derive_view(&products, &filter).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products = sample();
        let filter = FilterState {
            search: "MON".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_view(&products, &filter)), ["4"]);
    }

    #[test]
    fn sort_ascending_by_parsed_price() {
        let products = sample();
        let filter = FilterState {
            sort: SortOrder::PriceAscending,
            ..FilterState::default()
        };
        assert_eq!(ids(&derive_view(&products, &filter)), ["3", "5", "2", "4", "1"]);
    }

    #[test]
    fn equal_prices_keep_prior_relative_order() {
        let products = sample();
        let ascending = FilterState {
            sort: SortOrder::PriceAscending,
            ..FilterState::default()
        };
        let descending = FilterState {
            sort: SortOrder::PriceDescending,
            ..FilterState::default()
        };

        // "2" and "4" share a price; arrival order must survive both sorts,
        // and repeated recomputation must not shuffle them.
        for _ in 0..3 {
            let up = derive_view(&products, &ascending);
            let down = derive_view(&products, &descending);
            assert_eq!(ids(&up), ["3", "5", "2", "4", "1"]);
            assert_eq!(ids(&down), ["1", "2", "4", "5", "3"]);
        }
    }

    #[test]
    fn unparseable_price_sorts_lowest() {
        let mut products = sample();
        products.push(product("6", "Mystery Box", "priceless", "home"));

        let ascending = FilterState {
            sort: SortOrder::PriceAscending,
            ..FilterState::default()
        };
        let view = derive_view(&products, &ascending);
        assert_eq!(view.first().map(|p| p.id.as_str()), Some("6"));

        let descending = FilterState {
            sort: SortOrder::PriceDescending,
            ..FilterState::default()
        };
        let view = derive_view(&products, &descending);
        assert_eq!(view.last().map(|p| p.id.as_str()), Some("6"));
    }

    #[test]
    fn filter_predicates_commute_on_the_result_set() {
        let products = sample();

        let category_only = FilterState {
            category: CategoryFilter::Only("clothing".to_owned()),
            ..FilterState::default()
        };
        let both = FilterState {
            category: CategoryFilter::Only("clothing".to_owned()),
            search: "vest".to_owned(),
            ..FilterState::default()
        };

        // category then search
        let narrowed = derive_view(&derive_view(&products, &category_only), &FilterState {
            search: "vest".to_owned(),
            ..FilterState::default()
        });
        // search then category
        let reversed = derive_view(
            &derive_view(&products, &FilterState {
                search: "vest".to_owned(),
                ..FilterState::default()
            }),
            &category_only,
        );
        let combined = derive_view(&products, &both);

        assert_eq!(ids(&narrowed), ids(&reversed));
        assert_eq!(ids(&narrowed), ids(&combined));
    }

    #[test]
    fn derive_view_does_not_mutate_its_input() {
        let products = sample();
        let before = products.clone();
        let filter = FilterState {
            sort: SortOrder::PriceDescending,
            ..FilterState::default()
        };
        let _ = derive_view(&products, &filter);
        assert_eq!(products, before);
    }

    #[test]
    fn known_categories_come_from_the_full_collection() {
        let products = sample();
        assert_eq!(
            known_categories(&products),
            ["clothing", "electronics", "home"]
        );
        // Deduplicated, order-independent of arrival.
        let mut reversed = products;
        reversed.reverse();
        assert_eq!(
            known_categories(&reversed),
            ["clothing", "electronics", "home"]
        );
    }

    #[test]
    fn empty_categories_are_excluded() {
        let products = vec![product("1", "Thing", "1", "")];
        assert!(known_categories(&products).is_empty());
    }
}
