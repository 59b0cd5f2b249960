//! Cart session command.
//!
//! Replays a list of operations on a fresh cart and prints the order
//! summary. Like the product page, this refuses to add more than the
//! catalog has in stock before anything reaches the cart.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _, Result};
use serde::Serialize;
use storefront_commerce::cart::{CartState, CartStore, OrderSummary};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::ProductId;

use super::CartArgs;
use crate::context::Context;

/// One cart operation as written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    Add { id: ProductId, quantity: i64 },
    Remove { id: ProductId },
    Update { id: ProductId, quantity: i64 },
    Clear,
}

impl FromStr for CartOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "clear" {
            return Ok(CartOp::Clear);
        }
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected <verb>:<product>, got '{}'", s))?;
        match verb {
            "add" => {
                // `add:3=2` adds two; `add:3` adds one
                let (id, quantity) = match rest.rsplit_once('=') {
                    Some((id, qty)) => (id, parse_quantity(qty, s)?),
                    None => (rest, 1),
                };
                Ok(CartOp::Add {
                    id: product_id(id, s)?,
                    quantity,
                })
            }
            "remove" => Ok(CartOp::Remove {
                id: product_id(rest, s)?,
            }),
            "update" => {
                let (id, qty) = rest
                    .rsplit_once('=')
                    .ok_or_else(|| anyhow!("expected update:<product>=<qty>, got '{}'", s))?;
                Ok(CartOp::Update {
                    id: product_id(id, s)?,
                    quantity: parse_quantity(qty, s)?,
                })
            }
            _ => bail!("unknown cart operation '{}'", verb),
        }
    }
}

fn product_id(id: &str, op: &str) -> Result<ProductId> {
    if id.is_empty() {
        bail!("missing product id in '{}'", op);
    }
    Ok(ProductId::new(id))
}

fn parse_quantity(qty: &str, op: &str) -> Result<i64> {
    qty.parse()
        .with_context(|| format!("invalid quantity '{}' in '{}'", qty, op))
}

#[derive(Serialize)]
struct CartReport<'a> {
    cart: &'a CartState,
    summary: OrderSummary,
    skipped: Vec<String>,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let ops = args
        .ops
        .iter()
        .map(|s| s.parse::<CartOp>())
        .collect::<Result<Vec<_>>>()?;

    let catalog = ctx.catalog()?;
    let rules = ctx.pricing(&catalog)?;
    let mut store = CartStore::new(catalog.currency());

    if args.trace && !ctx.output.is_json() {
        let output = ctx.output.clone();
        store.subscribe(move |state| {
            output.debug(&format!(
                "{} line(s), {} item(s), {}",
                state.lines().len(),
                state.total_item_count(),
                state.total_price()
            ));
        });
    }

    let mut skipped = Vec::new();
    for op in ops {
        if let Some(note) = apply(&mut store, &catalog, op)? {
            ctx.output.warn(&note);
            skipped.push(note);
        }
    }

    let state = store.snapshot();
    let summary = OrderSummary::compute(&state, &rules);

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            cart: &state,
            summary,
            skipped,
        });
        return Ok(());
    }

    print_summary(&summary, ctx);
    Ok(())
}

/// Apply one operation, returning a note when it was refused or capped.
fn apply(store: &mut CartStore, catalog: &Catalog, op: CartOp) -> Result<Option<String>> {
    match op {
        CartOp::Add { id, quantity } => {
            let product = catalog.require_product(&id)?;
            if quantity < 1 {
                store.add(product.to_ref(), quantity);
                return Ok(None);
            }
            let in_cart = store.state().quantity_of(&id);
            match product.remaining_stock(in_cart) {
                Some(0) => Ok(Some(format!("{} is out of stock, not added", product.name))),
                Some(left) if quantity > left => {
                    store.add(product.to_ref(), left);
                    Ok(Some(format!(
                        "only {} more {} in stock, added {} of {}",
                        left, product.name, left, quantity
                    )))
                }
                _ => {
                    store.add(product.to_ref(), quantity);
                    Ok(None)
                }
            }
        }
        CartOp::Remove { id } => {
            store.remove(&id);
            Ok(None)
        }
        CartOp::Update { id, quantity } => {
            let product = catalog.require_product(&id)?;
            match product.stock_count.map(i64::from) {
                Some(stock) if quantity > stock => {
                    store.update_quantity(&id, stock);
                    Ok(Some(format!(
                        "only {} {} in stock, quantity set to {}",
                        stock, product.name, stock
                    )))
                }
                _ => {
                    store.update_quantity(&id, quantity);
                    Ok(None)
                }
            }
        }
        CartOp::Clear => {
            store.clear();
            Ok(None)
        }
    }
}

fn print_summary(summary: &OrderSummary, ctx: &Context) {
    ctx.output.header("Cart");

    if summary.lines.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [6, 32, 10, 5, 12];
    ctx.output.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for line in &summary.lines {
        let price = match line.original_price {
            Some(original) => format!("{} (was {})", line.unit_price, original),
            None => line.unit_price.to_string(),
        };
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &price,
                &line.quantity.to_string(),
                &line.total.to_string(),
            ],
            &widths,
        );
    }

    ctx.output.header("Order summary");
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.to_string());
    let shipping = if summary.shipping.is_zero() {
        "Free".to_string()
    } else {
        summary.shipping.to_string()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.to_string());
    ctx.output.kv("Total", &summary.grand_total.to_string());
    if !summary.has_free_shipping() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            summary.free_shipping_remaining
        ));
    }
}
