//! Product catalog module.
//!
//! The catalog is the read-only source of products for the storefront:
//! lookups by id and category, free-text search, and filtered listings.
//! The cart never calls back into it; callers turn a [`Product`] into a
//! [`ProductRef`](crate::cart::ProductRef) and pass that to the cart.

mod category;
mod product;
mod query;

pub use category::{Category, Subcategory};
pub use product::{Product, ProductRecord, Review};
pub use query::{Availability, PriceRange, ProductQuery, SortOption};

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    currency: String,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<ProductRecord>,
}

/// An in-memory product catalog, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: Currency,
    categories: Vec<Category>,
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from already-validated parts.
    ///
    /// Fails if two products share an id.
    pub fn new(
        currency: Currency,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), pos).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
        }
        Ok(Self {
            currency,
            categories,
            products,
            index,
        })
    }

    /// Parse and validate a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let currency = Currency::from_code(&file.currency)
            .ok_or_else(|| CommerceError::UnknownCurrency(file.currency.clone()))?;
        let products = file
            .products
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Self::new(currency, file.categories, products)?;
        info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            currency = %currency,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a JSON catalog from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ValidationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// The demo catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Look up a product by id, failing if absent.
    pub fn require_product(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.product(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products whose category name equals `category` exactly.
    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn featured_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Case-insensitive search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_text(&needle))
            .collect()
    }

    /// Find a category by name, ignoring case.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name_matches(name))
    }

    pub fn featured_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.featured).collect()
    }

    /// Run a listing query over the whole catalog.
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.currency(), Currency::USD);
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.categories().len(), 6);

        let laptop = catalog.product(&ProductId::new("1")).unwrap();
        assert_eq!(laptop.price.amount_cents, 129_999);
        assert_eq!(laptop.effective_price().amount_cents, 119_999);
        assert_eq!(laptop.stock_count, Some(45));
        assert_eq!(laptop.reviews.len(), 2);
    }

    #[test]
    fn test_lookup_helpers() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.products_in_category("Electronics").len(), 3);
        assert!(catalog.products_in_category("electronics").is_empty());
        assert_eq!(catalog.featured_products().len(), 4);
        assert!(catalog.product(&ProductId::new("missing")).is_none());
        assert!(matches!(
            catalog.require_product(&ProductId::new("missing")),
            Err(CommerceError::ProductNotFound(_))
        ));
        assert_eq!(catalog.category_by_name("fmcg").unwrap().subcategories.len(), 4);
        assert_eq!(catalog.featured_categories().len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<_> = catalog
            .search("PROFESSIONAL")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "6"]);
        assert_eq!(catalog.search("noise-cancelling").len(), 1);
        assert!(catalog.search("toaster").is_empty());
    }

    #[test]
    fn test_query_uses_effective_price() {
        let catalog = Catalog::builtin().unwrap();
        let query = ProductQuery::new()
            .with_category("Electronics")
            .with_price_range(PriceRange::From100To500)
            .with_sort(SortOption::PriceLow);
        let ids: Vec<_> = catalog.query(&query).into_iter().map(|p| p.id.as_str()).collect();
        // Headphones are 249.99 discounted to 199.99.
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "currency": "USD",
            "products": [
                {"id": "1", "name": "A", "price": 1.0, "category": "X"},
                {"id": "1", "name": "B", "price": 2.0, "category": "X"}
            ]
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::DuplicateProduct(id)) if id == "1"
        ));
    }

    #[test]
    fn test_rejects_unknown_currency() {
        let json = r#"{"currency": "XYZ", "products": []}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_rejects_bad_review_date() {
        let json = r#"{
            "currency": "USD",
            "products": [{
                "id": "1", "name": "A", "price": 1.0, "category": "X",
                "reviews": [{"id": "r1", "userId": "u1", "userName": "Ann",
                             "rating": 5, "comment": "ok", "date": "15/08/2023"}]
            }]
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
