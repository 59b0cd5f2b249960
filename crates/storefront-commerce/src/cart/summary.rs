//! Order summary shown on the cart page.
//!
//! This is display logic layered on a [`CartState`]; it never feeds back
//! into the cart.

use crate::cart::CartState;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping and tax rules for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_shipping: Money,
    /// Tax rate in basis points, applied to the subtotal.
    pub tax_rate_bps: u32,
}

impl PricingRules {
    /// $500.00 free-shipping threshold, $25.00 flat shipping, 8% tax.
    pub fn standard(currency: Currency) -> Self {
        let major = currency.minor_per_major();
        Self {
            free_shipping_threshold: Money::new(500 * major, currency),
            flat_shipping: Money::new(25 * major, currency),
            tax_rate_bps: 800,
        }
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::standard(Currency::default())
    }
}

/// Per-line pricing breakdown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub name: String,
    /// Effective unit price.
    pub unit_price: Money,
    /// Base price, when the line is discounted.
    pub original_price: Option<Money>,
    pub quantity: i64,
    pub total: Money,
}

/// Totals for the cart page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub grand_total: Money,
    /// How much more to spend for free shipping; zero once qualified.
    pub free_shipping_remaining: Money,
    pub lines: Vec<LinePricing>,
}

impl OrderSummary {
    /// Price a cart under `rules`.
    pub fn compute(cart: &CartState, rules: &PricingRules) -> Self {
        let currency = cart.currency();
        let subtotal = cart.total_price();

        let qualifies = subtotal.amount_cents >= rules.free_shipping_threshold.amount_cents;
        let shipping = if cart.is_empty() || qualifies {
            Money::zero(currency)
        } else {
            Money::new(rules.flat_shipping.amount_cents, currency)
        };
        let tax = subtotal.basis_points(rules.tax_rate_bps);
        let grand_total = subtotal.saturating_add(&shipping).saturating_add(&tax);
        let remaining = (rules.free_shipping_threshold.amount_cents - subtotal.amount_cents).max(0);

        let lines = cart
            .lines()
            .iter()
            .map(|line| LinePricing {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                unit_price: line.product.effective_price(),
                original_price: line.is_discounted().then_some(line.product.price),
                quantity: line.quantity,
                total: line.line_total(),
            })
            .collect();

        Self {
            item_count: cart.total_item_count(),
            subtotal,
            shipping,
            tax,
            grand_total,
            free_shipping_remaining: Money::new(remaining, currency),
            lines,
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.free_shipping_remaining.is_zero()
    }
}
