//! Remove a cart item.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use vitrine_core::CartItemId;

use super::{finish, MutationReport, RemoveArgs};
use crate::context::Context;

/// Run the remove command.
pub async fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let item = CartItemId::parse(&args.item)
        .with_context(|| format!("Invalid cart item id: {:?}", args.item))?;
    let api = ctx.api()?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(&ctx.config.messages.remove_confirm)
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Removal cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner(&format!("Removing item {}", item.as_str()));
    let result = api.remove_item(&item).await;
    spinner.finish_and_clear();

    let outcome = result.with_context(|| ctx.config.messages.connection_failed.clone())?;
    ctx.logger("cli.remove")
        .debug_builder("remove_item answered")
        .field("item", item.as_str())
        .field_bool("applied", outcome.is_applied())
        .emit();

    let fallback = if outcome.is_applied() {
        &ctx.config.messages.remove_succeeded
    } else {
        &ctx.config.messages.remove_failed
    };
    finish(MutationReport::new("remove", item.as_str(), &outcome, fallback), ctx)
}
