//! Change the quantity of a cart item.

use anyhow::{Context as _, Result};
use vitrine_core::{CartItemId, Quantity};

use super::{finish, MutationReport, UpdateArgs};
use crate::context::Context;

/// Run the update command.
pub async fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let item = CartItemId::parse(&args.item)
        .with_context(|| format!("Invalid cart item id: {:?}", args.item))?;
    let quantity = Quantity::new(args.quantity).context("Quantity must be at least 1")?;
    let api = ctx.api()?;

    let spinner = ctx.output.spinner(&format!("Updating item {}", item.as_str()));
    let result = api.update_quantity(&item, quantity).await;
    spinner.finish_and_clear();

    let outcome = result.with_context(|| ctx.config.messages.connection_failed.clone())?;
    ctx.logger("cli.update")
        .debug_builder("update_quantity answered")
        .field("item", item.as_str())
        .field("quantity", quantity.to_string())
        .field_bool("applied", outcome.is_applied())
        .emit();

    let fallback = if outcome.is_applied() {
        format!("Quantity set to {}", quantity)
    } else {
        ctx.config.messages.update_failed.clone()
    };
    finish(MutationReport::new("update", item.as_str(), &outcome, &fallback), ctx)
}
