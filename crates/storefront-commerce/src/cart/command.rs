//! Commands accepted by the cart.

use crate::cart::ProductRef;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// The only ways to change a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartCommand {
    /// Merge `quantity` units into the product's line, appending a new line
    /// if there is none. Non-positive quantities are ignored.
    Add { product: ProductRef, quantity: i64 },
    /// Drop the product's line if present.
    Remove { product_id: ProductId },
    /// Set the product's quantity, clamped to at least 1.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart.
    Clear,
}

impl CartCommand {
    pub fn add(product: ProductRef, quantity: i64) -> Self {
        CartCommand::Add { product, quantity }
    }

    pub fn remove(product_id: impl Into<ProductId>) -> Self {
        CartCommand::Remove {
            product_id: product_id.into(),
        }
    }

    pub fn update_quantity(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        CartCommand::UpdateQuantity {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add { .. } => "add",
            CartCommand::Remove { .. } => "remove",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::Clear => "clear",
        }
    }

    /// Product the command targets, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartCommand::Add { product, .. } => Some(&product.id),
            CartCommand::Remove { product_id } => Some(product_id),
            CartCommand::UpdateQuantity { product_id, .. } => Some(product_id),
            CartCommand::Clear => None,
        }
    }
}
