//! Cart lines and the product data they carry.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Unit price after applying a discount that is strictly lower than `price`.
pub(crate) fn effective_price(price: Money, discount_price: Option<Money>) -> Money {
    match discount_price {
        Some(discount) if discount.amount_cents < price.amount_cents => discount,
        _ => price,
    }
}

/// The catalog data a cart line needs about its product.
///
/// The cart trusts these values as given. Stock fields are informational
/// only; the cart never enforces them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    pub id: ProductId,
    /// Display name.
    pub name: String,
    pub price: Money,
    pub discount_price: Option<Money>,
    /// `None` means unconstrained.
    pub stock_count: Option<u32>,
    pub in_stock: bool,
    /// Primary image URL for display.
    pub image: Option<String>,
}

impl ProductRef {
    /// Create a reference with only the fields the cart prices by.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            discount_price: None,
            stock_count: None,
            in_stock: true,
            image: None,
        }
    }

    /// Set the discount price.
    pub fn with_discount(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Price the customer pays per unit.
    pub fn effective_price(&self) -> Money {
        effective_price(self.price, self.discount_price)
    }

    /// Whether every price on the reference is in `currency`.
    pub fn is_priced_in(&self, currency: Currency) -> bool {
        self.price.currency == currency
            && self.discount_price.map_or(true, |d| d.currency == currency)
    }
}

/// One product's aggregated quantity within a cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
    pub product: ProductRef,
    /// Always at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// Effective unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.effective_price().saturating_mul(self.quantity)
    }

    /// Whether the line is priced below the product's base price.
    pub fn is_discounted(&self) -> bool {
        self.product.effective_price() != self.product.price
    }
}
