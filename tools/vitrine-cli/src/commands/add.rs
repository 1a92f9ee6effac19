//! Add a product to the cart.

use anyhow::{Context as _, Result};
use vitrine_core::{ProductId, Quantity};

use super::{finish, AddArgs, MutationReport};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let product = ProductId::parse(&args.product)
        .with_context(|| format!("Invalid product id: {:?}", args.product))?;
    let quantity = Quantity::new(args.quantity).unwrap_or(Quantity::ONE);
    let api = ctx.api()?;
    let logger = ctx.logger("cli.add");

    let spinner = ctx.output.spinner(&ctx.config.messages.adding_label);
    let result = api.add_item(&product, quantity).await;
    spinner.finish_and_clear();

    let outcome = result.with_context(|| ctx.config.messages.connection_failed.clone())?;
    logger
        .debug_builder("add_item answered")
        .field("product", product.as_str())
        .field("quantity", quantity.to_string())
        .field_bool("applied", outcome.is_applied())
        .emit();

    let fallback = if outcome.is_applied() {
        &ctx.config.messages.add_succeeded
    } else {
        &ctx.config.messages.add_failed
    };
    finish(MutationReport::new("add", product.as_str(), &outcome, fallback), ctx)
}
