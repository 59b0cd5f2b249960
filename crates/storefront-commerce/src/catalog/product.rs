//! Product and review types.

use crate::cart::{effective_price, ProductRef};
use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Base price.
    pub price: Money,
    /// Sale price. Only honoured when strictly below `price`.
    pub discount_price: Option<Money>,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Name of the category this product belongs to.
    pub category: String,
    /// Tags for search.
    pub tags: Vec<String>,
    /// Availability flag.
    pub in_stock: bool,
    /// Units on hand. `None` means unconstrained.
    pub stock_count: Option<u32>,
    /// Average rating out of 5.
    pub rating: f64,
    /// Customer reviews.
    pub reviews: Vec<Review>,
    /// Shown in featured listings.
    pub featured: bool,
}

impl Product {
    /// Price a customer actually pays per unit.
    pub fn effective_price(&self) -> Money {
        effective_price(self.price, self.discount_price)
    }

    /// Check if this product is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.effective_price() != self.price
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_on_sale() || self.price.amount_cents <= 0 {
            return None;
        }
        let savings = self.price.amount_cents - self.effective_price().amount_cents;
        Some((savings as f64 / self.price.amount_cents as f64) * 100.0)
    }

    /// Check if the product can be added to a cart at all.
    pub fn is_purchasable(&self) -> bool {
        self.in_stock && self.stock_count != Some(0)
    }

    /// Units that may still be added given `in_cart` already in the cart.
    ///
    /// Returns `None` when stock is unconstrained.
    pub fn remaining_stock(&self, in_cart: i64) -> Option<i64> {
        if !self.in_stock {
            return Some(0);
        }
        self.stock_count
            .map(|stock| (i64::from(stock) - in_cart.max(0)).max(0))
    }

    /// URL of the primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Case-insensitive substring match over name, description and tags.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Build the reference a cart line holds for this product.
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            discount_price: self.discount_price,
            stock_count: self.stock_count,
            in_stock: self.in_stock,
            image: self.images.first().cloned(),
        }
    }
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: f64,
    pub comment: String,
    pub date: NaiveDate,
}

/// A product as written in a catalog file.
///
/// Prices are decimal amounts in the catalog's currency; they are converted
/// to minor units once, on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_count: Option<i64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
}

fn default_true() -> bool {
    true
}

impl ProductRecord {
    /// Validate the record and convert it into a [`Product`].
    pub fn into_product(self, currency: Currency) -> Result<Product, CommerceError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::ValidationError(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }
        if let Some(discount) = self.discount_price {
            if !discount.is_finite() || discount < 0.0 {
                return Err(CommerceError::ValidationError(format!(
                    "product {} has invalid discount price {}",
                    self.id, discount
                )));
            }
        }
        let stock_count = match self.stock_count {
            Some(n) => Some(u32::try_from(n).map_err(|_| {
                CommerceError::ValidationError(format!(
                    "product {} has invalid stock count {}",
                    self.id, n
                ))
            })?),
            None => None,
        };

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_decimal(self.price, currency),
            discount_price: self
                .discount_price
                .map(|d| Money::from_decimal(d, currency)),
            images: self.images,
            category: self.category,
            tags: self.tags,
            in_stock: self.in_stock,
            stock_count,
            rating: self.rating,
            reviews: self.reviews,
            featured: self.featured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: f64, discount: Option<f64>) -> ProductRecord {
        ProductRecord {
            id: ProductId::new("p1"),
            name: "Office Chair".to_string(),
            description: "Ergonomic chair with lumbar support".to_string(),
            price,
            discount_price: discount,
            images: vec!["chair.jpg".to_string()],
            category: "Furniture".to_string(),
            tags: vec!["Ergonomic".to_string()],
            in_stock: true,
            stock_count: Some(3),
            rating: 4.5,
            reviews: Vec::new(),
            featured: false,
        }
    }

    #[test]
    fn test_effective_price_prefers_lower_discount() {
        let product = record(100.0, Some(80.0)).into_product(Currency::USD).unwrap();
        assert_eq!(product.effective_price().amount_cents, 8000);
        assert!(product.is_on_sale());
        let pct = product.discount_percentage().unwrap();
        assert!((pct - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_effective_price_ignores_non_lower_discount() {
        let product = record(100.0, Some(120.0)).into_product(Currency::USD).unwrap();
        assert_eq!(product.effective_price().amount_cents, 10000);
        assert!(!product.is_on_sale());
        assert!(product.discount_percentage().is_none());

        let same = record(100.0, Some(100.0)).into_product(Currency::USD).unwrap();
        assert_eq!(same.effective_price(), same.price);
    }

    #[test]
    fn test_record_rejects_negative_price() {
        assert!(matches!(
            record(-1.0, None).into_product(Currency::USD),
            Err(CommerceError::ValidationError(_))
        ));
        assert!(record(10.0, Some(-2.0)).into_product(Currency::USD).is_err());
    }

    #[test]
    fn test_record_rejects_negative_stock() {
        let mut r = record(10.0, None);
        r.stock_count = Some(-4);
        assert!(r.into_product(Currency::USD).is_err());
    }

    #[test]
    fn test_remaining_stock() {
        let mut product = record(10.0, None).into_product(Currency::USD).unwrap();
        assert_eq!(product.remaining_stock(0), Some(3));
        assert_eq!(product.remaining_stock(2), Some(1));
        assert_eq!(product.remaining_stock(5), Some(0));

        product.stock_count = None;
        assert_eq!(product.remaining_stock(100), None);

        product.in_stock = false;
        assert_eq!(product.remaining_stock(0), Some(0));
        assert!(!product.is_purchasable());
    }

    #[test]
    fn test_matches_text_covers_tags() {
        let product = record(10.0, None).into_product(Currency::USD).unwrap();
        assert!(product.matches_text("ergonomic"));
        assert!(product.matches_text("lumbar"));
        assert!(!product.matches_text("laptop"));
    }

    #[test]
    fn test_to_ref_carries_pricing() {
        let product = record(100.0, Some(80.0)).into_product(Currency::USD).unwrap();
        let r = product.to_ref();
        assert_eq!(r.id, product.id);
        assert_eq!(r.effective_price().amount_cents, 8000);
        assert_eq!(r.image.as_deref(), Some("chair.jpg"));
    }
}
