//! Delivery location commands.

use anyhow::{Context as _, Result};
use storefront_commerce::location::{Location, LocationCapture};

use super::{LocationArgs, LocationCommand};
use crate::context::Context;

/// Run the location command.
pub async fn run(args: LocationArgs, ctx: &Context) -> Result<()> {
    let mut capture = LocationCapture::load(ctx.location_store()?)
        .context("Failed to read saved location")?;

    match args.command {
        LocationCommand::Show => {
            if ctx.output.is_json() {
                ctx.output.json(&capture.location());
                return Ok(());
            }
            match capture.location() {
                Some(location) => print_location(location, ctx),
                None => {
                    ctx.output.info("No delivery location set.");
                    ctx.output
                        .info("Run `storefront location set --address .. --city .. --state ..`");
                }
            }
        }
        LocationCommand::Set {
            address,
            city,
            state,
            landmark,
            lat,
            lng,
        } => {
            let mut location = Location::new(address, city, state);
            if let Some(landmark) = landmark {
                location = location.with_landmark(landmark);
            }
            if let (Some(lat), Some(lng)) = (lat, lng) {
                location = location.with_coordinates(lat, lng);
            }
            capture.set_location(location)?;

            if ctx.output.is_json() {
                ctx.output.json(&capture.location());
                return Ok(());
            }
            ctx.output.success("Delivery location saved");
            if let Some(location) = capture.location() {
                print_location(location, ctx);
            }
            ctx.output
                .debug(&format!("saved to {}", capture.store().path().display()));
        }
    }

    Ok(())
}

fn print_location(location: &Location, ctx: &Context) {
    ctx.output.kv("Deliver to", &location.one_line());
    if let Some(coords) = location.coordinates {
        ctx.output.kv("Coordinates", &format!("{:.5}, {:.5}", coords.lat, coords.lng));
    }
}
