//! Storefront domain types and logic.
//!
//! - **Catalog**: products, categories, search and listing queries
//! - **Cart**: the session cart store, its commands and order summary
//! - **Location**: one-time delivery location capture
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let laptop = catalog.product(&ProductId::new("1")).unwrap();
//!
//! let mut cart = CartStore::new(catalog.currency());
//! cart.add(laptop.to_ref(), 2);
//!
//! assert_eq!(cart.state().total_item_count(), 2);
//! assert_eq!(cart.state().total_price().display(), "$2399.98");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod location;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Availability, Catalog, Category, PriceRange, Product, ProductQuery, Review, SortOption,
        Subcategory,
    };

    // Cart
    pub use crate::cart::{
        CartCommand, CartLine, CartState, CartStore, LinePricing, OrderSummary, PricingRules,
        ProductRef,
    };

    // Location
    pub use crate::location::{Coordinates, Location, LocationCapture};
}
