//! Show the cart count.

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::context::Context;

#[derive(Serialize)]
struct CountReport {
    count: u64,
    timestamp: String,
}

/// Run the count command.
pub async fn run(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;

    let spinner = ctx.output.spinner("Fetching cart count");
    let result = api.count().await;
    spinner.finish_and_clear();

    let count = result.with_context(|| ctx.config.messages.connection_failed.clone())?;
    ctx.output.debug(&format!(
        "Badge would be {}",
        if count > 0 { "shown" } else { "hidden" }
    ));

    if ctx.output.is_json() {
        ctx.output.json(&CountReport {
            count,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    } else {
        println!("{}", count);
    }

    Ok(())
}
