//! The session's cart store.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cart::{CartCommand, CartState, ProductRef};
use crate::ids::ProductId;
use crate::money::Currency;

/// Callback invoked with every newly published cart snapshot.
pub type CartListener = Box<dyn Fn(&Arc<CartState>)>;

/// Owns the authoritative cart for one session.
///
/// The store is the only writer: every change goes through [`dispatch`]
/// (or one of the command shorthands), which computes a fresh
/// [`CartState`] and swaps it in whole. Readers hold `Arc` snapshots, so a
/// snapshot taken before a command is never affected by it.
///
/// Listeners are called synchronously, in registration order, after each
/// dispatch.
///
/// [`dispatch`]: CartStore::dispatch
pub struct CartStore {
    state: Arc<CartState>,
    listeners: Vec<CartListener>,
}

impl CartStore {
    /// Start a session with an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            state: Arc::new(CartState::new(currency)),
            listeners: Vec::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// A shared handle to the current state.
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.state)
    }

    /// Register a listener for future states.
    pub fn subscribe(&mut self, listener: impl Fn(&Arc<CartState>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a command and publish the resulting state.
    pub fn dispatch(&mut self, command: CartCommand) -> Arc<CartState> {
        if let CartCommand::Add { product, quantity } = &command {
            if *quantity < 1 {
                warn!(product_id = %product.id, quantity, "ignoring add with non-positive quantity");
            } else if !product.is_priced_in(self.state.currency()) {
                warn!(
                    product_id = %product.id,
                    product_currency = %product.price.currency,
                    cart_currency = %self.state.currency(),
                    "ignoring add priced in another currency"
                );
            }
        }

        let next = Arc::new(self.state.apply(&command));
        debug!(
            command = command.name(),
            product_id = command.product_id().map(ProductId::as_str).unwrap_or("-"),
            lines = next.lines().len(),
            items = next.total_item_count(),
            total = %next.total_price(),
            "cart updated"
        );

        self.state = Arc::clone(&next);
        for listener in &self.listeners {
            listener(&next);
        }
        next
    }

    /// Add `quantity` units of `product`.
    pub fn add(&mut self, product: ProductRef, quantity: i64) -> Arc<CartState> {
        self.dispatch(CartCommand::add(product, quantity))
    }

    /// Remove the product's line.
    pub fn remove(&mut self, product_id: &ProductId) -> Arc<CartState> {
        self.dispatch(CartCommand::remove(product_id.clone()))
    }

    /// Set the product's quantity, clamped to at least 1.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Arc<CartState> {
        self.dispatch(CartCommand::update_quantity(product_id.clone(), quantity))
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Arc<CartState> {
        self.dispatch(CartCommand::Clear)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product(id: &str, cents: i64) -> ProductRef {
        ProductRef::new(id, id.to_uppercase(), Money::new(cents, Currency::USD))
    }

    #[test]
    fn test_old_snapshot_is_untouched() {
        let mut store = CartStore::default();
        store.add(product("a", 500), 1);
        let before = store.snapshot();

        store.add(product("a", 500), 4);
        store.add(product("b", 100), 1);

        assert_eq!(before.total_item_count(), 1);
        assert_eq!(before.lines().len(), 1);
        assert_eq!(store.state().total_item_count(), 6);
    }

    #[test]
    fn test_listeners_see_each_state_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::default();
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.total_item_count()));

        store.add(product("a", 100), 2);
        store.update_quantity(&ProductId::new("a"), 5);
        store.remove(&ProductId::new("missing"));
        store.clear();

        assert_eq!(*seen.borrow(), vec![2, 5, 5, 0]);
    }

    #[test]
    fn test_dispatch_returns_published_state() {
        let mut store = CartStore::default();
        let returned = store.add(product("a", 100), 1);
        assert!(Arc::ptr_eq(&returned, &store.snapshot()));
    }

    #[test]
    fn test_shorthands_match_reducer() {
        let mut store = CartStore::new(Currency::USD);
        store.add(product("a", 100), 1);
        store.add(product("b", 300), 2);
        store.update_quantity(&ProductId::new("a"), 0);
        store.remove(&ProductId::new("b"));

        let expected = CartState::replay(
            Currency::USD,
            &[
                CartCommand::add(product("a", 100), 1),
                CartCommand::add(product("b", 300), 2),
                CartCommand::update_quantity("a", 0),
                CartCommand::remove("b"),
            ],
        );
        assert_eq!(store.state(), &expected);
    }

    #[test]
    fn test_foreign_currency_add_publishes_unchanged_state() {
        let mut store = CartStore::new(Currency::USD);
        store.add(product("a", 500), 1);
        let before = store.snapshot();

        let eur = ProductRef::new("e", "E", Money::new(1_000, Currency::EUR));
        let after = store.add(eur, 1);

        assert_eq!(*after, *before);
        assert_eq!(after.total_price(), Money::new(500, Currency::USD));
    }
}
