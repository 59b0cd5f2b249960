//! Terminal output for the CLI.
//!
//! Human-readable lines go to stdout (warnings and errors to stderr). In
//! `--json` mode only [`Output::json`] and errors print anything.

use console::style;
use serde::Serialize;
use storefront_commerce::catalog::Product;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn human(&self) -> bool {
        !self.json
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("ℹ").blue(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors print in both modes; JSON mode emits `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if self.human() {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to render JSON: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Left-aligned columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            println!("  {}", pad_columns(cols, widths));
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn pad_columns(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths)
        .map(|(col, &width)| format!("{:width$}", col))
        .collect::<Vec<_>>()
        .join("  ")
}

fn stock_text(product: &Product) -> String {
    match (product.in_stock, product.stock_count) {
        (false, _) | (true, Some(0)) => "out of stock".to_string(),
        (true, Some(n)) if n <= 5 => format!("only {} left", n),
        (true, _) => "in stock".to_string(),
    }
}

/// Stock badge for listings, coloured by urgency.
pub fn stock_badge(product: &Product) -> String {
    let text = stock_text(product);
    if !product.is_purchasable() {
        style(text).red().to_string()
    } else if matches!(product.stock_count, Some(n) if n <= 5) {
        style(text).yellow().to_string()
    } else {
        style(text).green().to_string()
    }
}

/// Effective price, with the struck base price when discounted.
pub fn price_label(product: &Product) -> String {
    if product.is_on_sale() {
        format!(
            "{} {}",
            product.effective_price(),
            style(product.price.to_string()).dim().strikethrough()
        )
    } else {
        product.price.to_string()
    }
}
