//! Category filtering and price sorting for the shop view.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::product::{Category, Product};

/// Which categories the shop view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// A name no catalog category carries. Matches nothing.
    Unlisted(String),
}

impl CategoryFilter {
    /// Reads a toolbar label. `"all"` and category names are case-insensitive;
    /// anything else becomes [`CategoryFilter::Unlisted`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match label.parse() {
            Ok(category) => Self::Only(category),
            Err(_) => Self::Unlisted(label.to_string()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
            Self::Unlisted(_) => false,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => write!(f, "{category}"),
            Self::Unlisted(name) => f.write_str(name),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// Ordering applied after filtering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    #[serde(rename = "featured")]
    #[strum(serialize = "featured")]
    Featured,
    #[serde(rename = "low-high")]
    #[strum(serialize = "low-high")]
    PriceLowHigh,
    #[serde(rename = "high-low")]
    #[strum(serialize = "high-low")]
    PriceHighLow,
}

/// The shop toolbar state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    pub sort: SortMode,
}

impl FilterSelection {
    pub fn new(category: CategoryFilter, sort: SortMode) -> Self {
        Self { category, sort }
    }
}

/// Derives the displayed product sequence for `selection`.
///
/// Filtering keeps catalog order. Price sorts are stable, so equally priced
/// products keep their relative order; `0.0` and `-0.0` count as equal. The
/// input slice is never reordered.
pub fn derive_view<'a>(catalog: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    let mut view: Vec<&Product> = catalog
        .iter()
        .filter(|product| selection.category.matches(product))
        .collect();

    match selection.sort {
        SortMode::Featured => {}
        SortMode::PriceLowHigh => view.sort_by(|a, b| compare_price(a, b)),
        SortMode::PriceHighLow => view.sort_by(|a, b| compare_price(b, a)),
    }

    view
}

// Catalog validation rejects NaN, so partial_cmp only sees comparable values.
fn compare_price(a: &Product, b: &Product) -> Ordering {
    a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64, category: Category) -> Product {
        Product::new(id, id, price, category, "", "", 4.0)
    }

    fn ids(view: &[&Product]) -> Vec<String> {
        view.iter().map(|p| p.id.clone()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            product("A", 100.0, Category::Office),
            product("B", 50.0, Category::Office),
            product("C", 200.0, Category::Bedroom),
        ]
    }

    #[test]
    fn test_all_featured_returns_catalog_order() {
        let catalog = sample();
        let view = derive_view(&catalog, &FilterSelection::default());
        assert_eq!(ids(&view), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_office_ascending() {
        let catalog = sample();
        let selection =
            FilterSelection::new(CategoryFilter::Only(Category::Office), SortMode::PriceLowHigh);
        assert_eq!(ids(&derive_view(&catalog, &selection)), vec!["B", "A"]);
    }

    #[test]
    fn test_descending_reverses_ascending_without_ties() {
        let catalog = sample();
        let asc = derive_view(
            &catalog,
            &FilterSelection::new(CategoryFilter::All, SortMode::PriceLowHigh),
        );
        let mut desc = derive_view(
            &catalog,
            &FilterSelection::new(CategoryFilter::All, SortMode::PriceHighLow),
        );
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let catalog = vec![
            product("x", 10.0, Category::Dining),
            product("y", 5.0, Category::Dining),
            product("z", 10.0, Category::Dining),
            product("w", 5.0, Category::Dining),
        ];
        let asc = derive_view(
            &catalog,
            &FilterSelection::new(CategoryFilter::All, SortMode::PriceLowHigh),
        );
        assert_eq!(ids(&asc), vec!["y", "w", "x", "z"]);
        let desc = derive_view(
            &catalog,
            &FilterSelection::new(CategoryFilter::All, SortMode::PriceHighLow),
        );
        assert_eq!(ids(&desc), vec!["x", "z", "y", "w"]);
    }

    #[test]
    fn test_category_without_products_is_empty() {
        let catalog = sample();
        let selection =
            FilterSelection::new(CategoryFilter::Only(Category::Lighting), SortMode::Featured);
        assert!(derive_view(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_signed_zero_prices_tie() {
        let catalog = vec![
            product("x", 0.0, Category::Dining),
            product("y", -0.0, Category::Dining),
        ];
        for sort in [SortMode::PriceLowHigh, SortMode::PriceHighLow] {
            let view = derive_view(&catalog, &FilterSelection::new(CategoryFilter::All, sort));
            assert_eq!(ids(&view), vec!["x", "y"], "{sort}");
        }
    }

    #[test]
    fn test_unlisted_category_is_empty() {
        let catalog = sample();
        let selection = FilterSelection::new(CategoryFilter::from_label("Garage"), SortMode::Featured);
        assert!(derive_view(&catalog, &selection).is_empty());
        assert_eq!(selection.category.to_string(), "Garage");
    }

    #[test]
    fn test_catalog_is_untouched_and_output_deterministic() {
        let catalog = sample();
        let before = catalog.clone();
        let selection = FilterSelection::new(CategoryFilter::All, SortMode::PriceHighLow);
        let first = ids(&derive_view(&catalog, &selection));
        let second = ids(&derive_view(&catalog, &selection));
        assert_eq!(first, second);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_parse_selection_labels() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "office".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Office)
        );
        assert_eq!(
            "garage".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Unlisted("garage".to_string())
        );
        assert_eq!("low-high".parse::<SortMode>().unwrap(), SortMode::PriceLowHigh);
        assert_eq!(SortMode::PriceHighLow.to_string(), "high-low");
    }
}
