//! Property tests: cart invariants hold under arbitrary command sequences.

use proptest::prelude::*;
use storefront_commerce::prelude::*;

fn pool() -> Vec<ProductRef> {
    let usd = |c| Money::new(c, Currency::USD);
    vec![
        ProductRef::new("laptop", "Laptop", usd(129_999)).with_discount(usd(119_999)),
        ProductRef::new("chair", "Chair", usd(34_999)),
        ProductRef::new("pen", "Pen", usd(199)).with_discount(usd(250)),
        ProductRef::new("free", "Sticker", usd(0)),
    ]
}

fn command() -> impl Strategy<Value = CartCommand> {
    let products = pool();
    let n = products.len();
    let add_products = products.clone();
    prop_oneof![
        4 => (0..n, -3_i64..12).prop_map(move |(i, q)| CartCommand::add(add_products[i].clone(), q)),
        2 => (0..n).prop_map(move |i| CartCommand::remove(pool()[i].id.clone())),
        2 => (0..n, -10_i64..10).prop_map(move |(i, q)| CartCommand::update_quantity(pool()[i].id.clone(), q)),
        1 => Just(CartCommand::Clear),
    ]
}

/// Naive reference model: (id, unit cents, quantity) in insertion order.
fn model_apply(model: &mut Vec<(ProductId, i64, i64)>, cmd: &CartCommand) {
    match cmd {
        CartCommand::Add { product, quantity } if *quantity >= 1 => {
            match model.iter_mut().find(|(id, _, _)| id == &product.id) {
                Some(entry) => entry.2 += quantity,
                None => model.push((
                    product.id.clone(),
                    product.effective_price().amount_cents,
                    *quantity,
                )),
            }
        }
        CartCommand::Add { .. } => {}
        CartCommand::Remove { product_id } => model.retain(|(id, _, _)| id != product_id),
        CartCommand::UpdateQuantity { product_id, quantity } => {
            for entry in model.iter_mut().filter(|(id, _, _)| id == product_id) {
                entry.2 = (*quantity).max(1);
            }
        }
        CartCommand::Clear => model.clear(),
    }
}

fn check_invariants(state: &CartState) -> Result<(), TestCaseError> {
    let count: i64 = state.lines().iter().map(|l| l.quantity).sum();
    prop_assert_eq!(state.total_item_count(), count);

    let price: i64 = state
        .lines()
        .iter()
        .map(|l| l.product.effective_price().amount_cents * l.quantity)
        .sum();
    prop_assert_eq!(state.total_price().amount_cents, price);

    prop_assert!(state.lines().iter().all(|l| l.quantity >= 1));

    let mut ids: Vec<_> = state.lines().iter().map(|l| l.product.id.clone()).collect();
    ids.sort();
    ids.dedup();
    prop_assert_eq!(ids.len(), state.lines().len());
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_command(commands in prop::collection::vec(command(), 0..60)) {
        let mut store = CartStore::new(Currency::USD);
        let mut model = Vec::new();
        for cmd in commands {
            model_apply(&mut model, &cmd);
            let state = store.dispatch(cmd);
            check_invariants(&state)?;

            let observed: Vec<_> = state
                .lines()
                .iter()
                .map(|l| (l.product.id.clone(), l.product.effective_price().amount_cents, l.quantity))
                .collect();
            prop_assert_eq!(&observed, &model);
        }
    }

    #[test]
    fn remove_is_idempotent(commands in prop::collection::vec(command(), 0..30), target in 0..4_usize) {
        let state = CartState::replay(Currency::USD, &commands);
        let id = pool()[target].id.clone();
        let once = state.apply(&CartCommand::remove(id.clone()));
        let twice = once.apply(&CartCommand::remove(id));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn clear_always_resets(commands in prop::collection::vec(command(), 0..30)) {
        let state = CartState::replay(Currency::USD, &commands).apply(&CartCommand::Clear);
        prop_assert_eq!(state, CartState::new(Currency::USD));
    }

    #[test]
    fn update_never_removes(commands in prop::collection::vec(command(), 1..30), quantity in -100_i64..100) {
        let state = CartState::replay(Currency::USD, &commands);
        for line in state.lines() {
            let next = state.apply(&CartCommand::update_quantity(line.product.id.clone(), quantity));
            prop_assert_eq!(next.lines().len(), state.lines().len());
            prop_assert_eq!(next.quantity_of(&line.product.id), quantity.max(1));
        }
    }
}
