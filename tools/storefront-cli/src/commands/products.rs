//! Catalog browsing commands.

use anyhow::Result;
use storefront_commerce::catalog::{Catalog, Product, ProductQuery};
use storefront_commerce::ProductId;

use super::{CategoriesArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{price_label, stock_badge};

/// Run the products command.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&catalog, &args);
    let mut products = catalog.query(&query);
    if args.featured {
        products.retain(|p| p.featured);
    }

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    let title = match &query.category {
        Some(category) => format!("{} ({})", category, query.sort.display_name()),
        None => format!("All products ({})", query.sort.display_name()),
    };
    ctx.output.header(&title);

    if products.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "RATING", "STOCK"], &[6, 32, 20, 6, 12]);
    for product in &products {
        let rating = format!("{:.1}", product.rating);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &price_label(product),
                &rating,
                &stock_badge(product),
            ],
            &[6, 32, 20, 6, 12],
        );
    }
    ctx.output.info(&format!("{} product(s)", products.len()));

    Ok(())
}

/// Category names are matched case-insensitively against the category
/// list; the product filter compares names exactly, so the listed name is
/// used when there is one.
fn build_query(catalog: &Catalog, args: &ProductsArgs) -> ProductQuery {
    let mut query = ProductQuery::new().with_sort(args.sort);
    if let Some(category) = &args.category {
        let name = catalog
            .category_by_name(category)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| category.clone());
        query = query.with_category(name);
    }
    if let Some(text) = &args.search {
        query = query.with_text(text.clone());
    }
    for range in &args.prices {
        query = query.with_price_range(*range);
    }
    for availability in &args.availability {
        query = query.with_availability(*availability);
    }
    query
}

/// Run the product command.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.require_product(&ProductId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, ctx);
    Ok(())
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &price_label(product));
    if let Some(pct) = product.discount_percentage() {
        ctx.output.kv("You save", &format!("{:.0}%", pct));
    }
    ctx.output.kv("Availability", &stock_badge(product));
    ctx.output.kv(
        "Rating",
        &format!("{:.1} ({} review(s))", product.rating, product.reviews.len()),
    );
    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }
    if let Some(image) = product.primary_image() {
        ctx.output.debug(&format!("image: {}", image));
    }

    ctx.output.info("");
    ctx.output.info(&product.description);

    if !product.reviews.is_empty() {
        ctx.output.header("Reviews");
        for review in &product.reviews {
            ctx.output.list_item(&format!(
                "{} ({}) {:.1}/5: {}",
                review.user_name, review.date, review.rating, review.comment
            ));
        }
    }
}

/// Run the categories command.
pub async fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let categories = if args.featured {
        catalog.featured_categories()
    } else {
        catalog.categories().iter().collect()
    };

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        let count = catalog.products_in_category(&category.name).len();
        let status = if category.is_browsable() {
            format!("{} product(s)", count)
        } else {
            "coming soon".to_string()
        };
        ctx.output.list_item(&format!("{} ({})", category.name, status));
        if ctx.output.is_verbose() && !category.description.is_empty() {
            ctx.output.debug(&category.description);
        }
        for sub in &category.subcategories {
            ctx.output.debug(&format!("  {}", sub.name));
        }
    }

    Ok(())
}
