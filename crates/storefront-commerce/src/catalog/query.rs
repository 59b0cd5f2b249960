//! Listing queries: filters and sort order for category pages.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// Sort by effective price, low to high.
    PriceLow,
    /// Sort by effective price, high to low.
    PriceHigh,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::NameAsc => "Name: A to Z",
            SortOption::NameDesc => "Name: Z to A",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Compare two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => b.featured.cmp(&a.featured),
            SortOption::PriceLow => a.effective_price().cmp(&b.effective_price()),
            SortOption::PriceHigh => b.effective_price().cmp(&a.effective_price()),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown sort option: {}", s))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price buckets offered on category pages.
///
/// Bounds are in major units of the product's currency and compared
/// against the effective price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    Under100,
    From100To500,
    From500To1000,
    Over1000,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Under100 => "under-100",
            PriceRange::From100To500 => "100-500",
            PriceRange::From500To1000 => "500-1000",
            PriceRange::Over1000 => "over-1000",
        }
    }

    /// Check whether `price` falls in this bucket.
    ///
    /// The middle buckets are inclusive at both ends, so 500 matches both.
    pub fn contains(&self, price: Money) -> bool {
        let major = price.currency.minor_per_major();
        let cents = price.amount_cents;
        match self {
            PriceRange::Under100 => cents < 100 * major,
            PriceRange::From100To500 => cents >= 100 * major && cents <= 500 * major,
            PriceRange::From500To1000 => cents >= 500 * major && cents <= 1000 * major,
            PriceRange::Over1000 => cents > 1000 * major,
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under-100" => Ok(PriceRange::Under100),
            "100-500" => Ok(PriceRange::From100To500),
            "500-1000" => Ok(PriceRange::From500To1000),
            "over-1000" => Ok(PriceRange::Over1000),
            _ => Err(format!("unknown price range: {}", s)),
        }
    }
}

/// Stock filter offered on category pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in-stock",
            Availability::OutOfStock => "out-of-stock",
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Availability::InStock => product.in_stock,
            Availability::OutOfStock => !product.in_stock,
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-stock" => Ok(Availability::InStock),
            "out-of-stock" => Ok(Availability::OutOfStock),
            _ => Err(format!("unknown availability: {}", s)),
        }
    }
}

/// A product listing query.
///
/// Selected price ranges are ORed together, as are availability options;
/// the groups are then ANDed with the category and text filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Exact category name.
    pub category: Option<String>,
    /// Free-text search.
    pub text: Option<String>,
    pub price_ranges: Vec<PriceRange>,
    pub availability: Vec<Availability>,
    pub sort: SortOption,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the text query. Blank queries are ignored.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.text = Some(q);
        }
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        if !self.price_ranges.contains(&range) {
            self.price_ranges.push(range);
        }
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        if !self.availability.contains(&availability) {
            self.availability.push(availability);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if !product.matches_text(&text.to_lowercase()) {
                return false;
            }
        }
        let price = product.effective_price();
        let price_ok =
            self.price_ranges.is_empty() || self.price_ranges.iter().any(|r| r.contains(price));
        let stock_ok =
            self.availability.is_empty() || self.availability.iter().any(|a| a.matches(product));
        price_ok && stock_ok
    }

    /// Filter and sort `products`. The sort is stable.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn product(id: &str, name: &str, cents: i64, featured: bool, in_stock: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Money::new(cents, Currency::USD),
            discount_price: None,
            images: Vec::new(),
            category: "Electronics".to_string(),
            tags: Vec::new(),
            in_stock,
            stock_count: None,
            rating: cents as f64 / 100_000.0,
            reviews: Vec::new(),
            featured,
        }
    }

    #[test]
    fn test_price_range_bounds() {
        let usd = |c| Money::new(c, Currency::USD);
        assert!(PriceRange::Under100.contains(usd(9_999)));
        assert!(!PriceRange::Under100.contains(usd(10_000)));
        assert!(PriceRange::From100To500.contains(usd(50_000)));
        assert!(PriceRange::From500To1000.contains(usd(50_000)));
        assert!(!PriceRange::Over1000.contains(usd(100_000)));
        assert!(PriceRange::Over1000.contains(usd(100_001)));
    }

    #[test]
    fn test_price_ranges_are_ored() {
        let cheap = product("1", "Pen", 500, false, true);
        let mid = product("2", "Chair", 30_000, false, true);
        let pricey = product("3", "Laptop", 120_000, false, true);
        let query = ProductQuery::new()
            .with_price_range(PriceRange::Under100)
            .with_price_range(PriceRange::Over1000);

        let ids: Vec<_> = query
            .apply([&cheap, &mid, &pricey])
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_availability_filter() {
        let a = product("1", "A", 100, false, true);
        let b = product("2", "B", 100, false, false);
        let query = ProductQuery::new().with_availability(Availability::OutOfStock);
        let result = query.apply([&a, &b]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "2");
    }

    #[test]
    fn test_sort_options() {
        let a = product("1", "banana", 300, false, true);
        let b = product("2", "Apple", 100, true, true);
        let c = product("3", "cherry", 200, false, true);
        let all = [&a, &b, &c];
        let ids = |q: ProductQuery| -> Vec<String> {
            q.apply(all).iter().map(|p| p.id.to_string()).collect()
        };

        assert_eq!(ids(ProductQuery::new()), vec!["2", "1", "3"]);
        assert_eq!(ids(ProductQuery::new().with_sort(SortOption::PriceLow)), vec!["2", "3", "1"]);
        assert_eq!(ids(ProductQuery::new().with_sort(SortOption::PriceHigh)), vec!["1", "3", "2"]);
        assert_eq!(ids(ProductQuery::new().with_sort(SortOption::NameAsc)), vec!["2", "1", "3"]);
        assert_eq!(ids(ProductQuery::new().with_sort(SortOption::NameDesc)), vec!["3", "1", "2"]);
        assert_eq!(ids(ProductQuery::new().with_sort(SortOption::Rating)), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let query = ProductQuery::new().with_text("   ");
        assert!(query.text.is_none());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("price-high".parse::<SortOption>().unwrap(), SortOption::PriceHigh);
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!("500-1000".parse::<PriceRange>().unwrap(), PriceRange::From500To1000);
        assert_eq!("in-stock".parse::<Availability>().unwrap(), Availability::InStock);
    }
}
