//! Cart state and its transition function.

use crate::cart::{CartCommand, CartLine};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// A snapshot of the cart.
///
/// Lines keep the order in which their product was first added. The item
/// count and total price are recomputed from all lines whenever a new state
/// is built, never adjusted incrementally.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartState {
    currency: Currency,
    lines: Vec<CartLine>,
    total_item_count: i64,
    total_price: Money,
}

impl CartState {
    /// An empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
            total_item_count: 0,
            total_price: Money::zero(currency),
        }
    }

    fn from_lines(currency: Currency, lines: Vec<CartLine>) -> Self {
        let total_item_count = lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity));
        let total_price = lines.iter().fold(Money::zero(currency), |acc, line| {
            acc.saturating_add(&line.line_total())
        });
        Self {
            currency,
            lines,
            total_item_count,
            total_price,
        }
    }

    /// Apply one command, returning the next state.
    ///
    /// Total over every input: commands that target a missing product, adds
    /// with a non-positive quantity, and adds of a product priced in another
    /// currency all return an unchanged copy.
    pub fn apply(&self, command: &CartCommand) -> CartState {
        match command {
            CartCommand::Add { product, quantity } => {
                if *quantity < 1 || !product.is_priced_in(self.currency) {
                    return self.clone();
                }
                let mut lines = self.lines.clone();
                match lines.iter_mut().find(|l| l.product.id == product.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(*quantity),
                    None => lines.push(CartLine {
                        product: product.clone(),
                        quantity: *quantity,
                    }),
                }
                Self::from_lines(self.currency, lines)
            }
            CartCommand::Remove { product_id } => {
                if self.line(product_id).is_none() {
                    return self.clone();
                }
                let lines = self
                    .lines
                    .iter()
                    .filter(|l| &l.product.id != product_id)
                    .cloned()
                    .collect();
                Self::from_lines(self.currency, lines)
            }
            CartCommand::UpdateQuantity {
                product_id,
                quantity,
            } => {
                if self.line(product_id).is_none() {
                    return self.clone();
                }
                let mut lines = self.lines.clone();
                for line in lines.iter_mut().filter(|l| &l.product.id == product_id) {
                    line.quantity = (*quantity).max(1);
                }
                Self::from_lines(self.currency, lines)
            }
            CartCommand::Clear => Self::new(self.currency),
        }
    }

    /// Fold `commands` over an empty cart, in order.
    pub fn replay<'a>(
        currency: Currency,
        commands: impl IntoIterator<Item = &'a CartCommand>,
    ) -> CartState {
        commands
            .into_iter()
            .fold(Self::new(currency), |state, cmd| state.apply(cmd))
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line quantities.
    pub fn total_item_count(&self) -> i64 {
        self.total_item_count
    }

    /// Sum of effective price times quantity, exact in minor units.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `product_id`, if any.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Quantity of `product_id` in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.line(product_id).map(|l| l.quantity).unwrap_or(0)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductRef;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn product(id: &str, cents: i64) -> ProductRef {
        ProductRef::new(id, format!("Product {}", id), usd(cents))
    }

    fn order(state: &CartState) -> Vec<&str> {
        state.lines().iter().map(|l| l.product.id.as_str()).collect()
    }

    #[test]
    fn test_empty_cart() {
        let state = CartState::new(Currency::USD);
        assert!(state.is_empty());
        assert_eq!(state.total_item_count(), 0);
        assert_eq!(state.total_price(), usd(0));
    }

    #[test]
    fn test_add_appends_new_line() {
        let state = CartState::default()
            .apply(&CartCommand::add(product("a", 1000), 2))
            .apply(&CartCommand::add(product("b", 250), 1));
        assert_eq!(order(&state), vec!["a", "b"]);
        assert_eq!(state.total_item_count(), 3);
        assert_eq!(state.total_price(), usd(2250));
    }

    #[test]
    fn test_duplicate_add_merges_in_place() {
        let state = CartState::default()
            .apply(&CartCommand::add(product("p", 100), 2))
            .apply(&CartCommand::add(product("q", 100), 1))
            .apply(&CartCommand::add(product("p", 100), 3));
        assert_eq!(order(&state), vec!["p", "q"]);
        assert_eq!(state.quantity_of(&ProductId::new("p")), 5);
        assert_eq!(state.total_item_count(), 6);
    }

    #[test]
    fn test_non_positive_add_is_ignored() {
        let before = CartState::default().apply(&CartCommand::add(product("a", 100), 1));
        assert_eq!(before.apply(&CartCommand::add(product("a", 100), 0)), before);
        assert_eq!(before.apply(&CartCommand::add(product("b", 100), -3)), before);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let state = CartState::default().apply(&CartCommand::add(product("p", 100), 4));
        let zero = state.apply(&CartCommand::update_quantity("p", 0));
        let negative = state.apply(&CartCommand::update_quantity("p", -5));
        assert_eq!(zero.quantity_of(&ProductId::new("p")), 1);
        assert_eq!(negative.quantity_of(&ProductId::new("p")), 1);
        assert_eq!(negative.total_price(), usd(100));

        let seven = state.apply(&CartCommand::update_quantity("p", 7));
        assert_eq!(seven.total_item_count(), 7);
    }

    #[test]
    fn test_missing_targets_are_noops() {
        let state = CartState::default().apply(&CartCommand::add(product("a", 100), 1));
        assert_eq!(state.apply(&CartCommand::remove("zzz")), state);
        assert_eq!(state.apply(&CartCommand::update_quantity("zzz", 9)), state);
    }

    #[test]
    fn test_remove_twice_matches_remove_once() {
        let state = CartState::default()
            .apply(&CartCommand::add(product("a", 100), 1))
            .apply(&CartCommand::add(product("b", 100), 1));
        let once = state.apply(&CartCommand::remove("a"));
        let twice = once.apply(&CartCommand::remove("a"));
        assert_eq!(once, twice);
        assert_eq!(order(&once), vec!["b"]);
    }

    #[test]
    fn test_readd_goes_to_end() {
        let commands = [
            CartCommand::add(product("A", 100), 1),
            CartCommand::add(product("B", 100), 1),
            CartCommand::remove("A"),
            CartCommand::add(product("A", 100), 1),
        ];
        let state = CartState::replay(Currency::USD, &commands);
        assert_eq!(order(&state), vec!["B", "A"]);
        assert_eq!(state.quantity_of(&ProductId::new("A")), 1);
    }

    #[test]
    fn test_discount_pricing() {
        let p = product("p", 10_000).with_discount(usd(8_000));
        let state = CartState::default().apply(&CartCommand::add(p, 3));
        assert_eq!(state.total_price(), usd(24_000));
        assert_eq!(state.total_item_count(), 3);
        assert!(state.lines()[0].is_discounted());
    }

    #[test]
    fn test_discount_not_lower_is_ignored() {
        let p = product("p", 10_000).with_discount(usd(12_000));
        let state = CartState::default().apply(&CartCommand::add(p, 2));
        assert_eq!(state.total_price(), usd(20_000));
    }

    #[test]
    fn test_clear_keeps_currency() {
        let eur = ProductRef::new("a", "A", Money::new(100, Currency::EUR));
        let state = CartState::new(Currency::EUR)
            .apply(&CartCommand::add(eur, 3))
            .apply(&CartCommand::Clear);
        assert!(state.is_empty());
        assert_eq!(state.total_item_count(), 0);
        assert_eq!(state.total_price(), Money::zero(Currency::EUR));
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let state = CartState::default()
            .apply(&CartCommand::add(product("a", 100), i64::MAX))
            .apply(&CartCommand::add(product("a", 100), 10));
        assert_eq!(state.total_item_count(), i64::MAX);
        assert_eq!(state.total_price().amount_cents, i64::MAX);
    }

    #[test]
    fn test_add_in_other_currency_is_ignored() {
        let eur = ProductRef::new("e", "E", Money::new(1_000, Currency::EUR));
        let jpy = ProductRef::new("j", "J", Money::new(1_000, Currency::JPY));
        let state = CartState::default()
            .apply(&CartCommand::add(product("a", 500), 1))
            .apply(&CartCommand::add(eur, 1))
            .apply(&CartCommand::add(jpy, 1));
        assert_eq!(order(&state), vec!["a"]);
        assert_eq!(state.total_item_count(), 1);
        assert_eq!(state.total_price(), usd(500));
    }

    #[test]
    fn test_discount_in_other_currency_is_ignored() {
        let mixed = product("m", 1_000).with_discount(Money::new(500, Currency::GBP));
        let state = CartState::default().apply(&CartCommand::add(mixed, 2));
        assert!(state.is_empty());
        assert_eq!(state.total_price(), usd(0));
    }
}
