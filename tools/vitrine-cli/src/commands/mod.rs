//! CLI command implementations.

pub mod add;
pub mod config;
pub mod count;
pub mod remove;
pub mod update;

use clap::{Args, Subcommand};
use serde::Serialize;
use vitrine_data::MutationOutcome;

use crate::context::Context;
use crate::output::outcome_badge;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product identifier.
    pub product: String,

    /// Quantity to add.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u64,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Cart item identifier.
    pub item: String,

    /// New quantity (at least 1).
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub quantity: u64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Cart item identifier.
    pub item: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a vitrine.toml with default values.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Result of one cart mutation, as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct MutationReport {
    pub action: &'static str,
    pub target: String,
    pub applied: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    pub timestamp: String,
}

impl MutationReport {
    /// Build a report. `fallback` stands in for a missing server message.
    pub fn new(action: &'static str, target: &str, outcome: &MutationOutcome, fallback: &str) -> Self {
        Self {
            action,
            target: target.to_string(),
            applied: outcome.is_applied(),
            message: outcome.message_or(fallback).to_string(),
            total: outcome.total().map(|t| t.display()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Print a mutation report and turn a rejection into an error.
pub fn finish(report: MutationReport, ctx: &Context) -> anyhow::Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else if report.applied {
        ctx.output.success(&report.message);
        ctx.output.kv("status", &outcome_badge(true));
        if let Some(ref total) = report.total {
            ctx.output.kv("total", total);
        }
    }

    if !report.applied {
        anyhow::bail!("{}", report.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{Currency, Money};

    #[test]
    fn test_report_uses_server_message() {
        let outcome = MutationOutcome::Applied {
            message: Some("Produto adicionado".to_string()),
            total: Some(Money::new(12990, Currency::BRL)),
        };
        let report = MutationReport::new("add", "42", &outcome, "fallback");
        assert!(report.applied);
        assert_eq!(report.message, "Produto adicionado");
        assert_eq!(report.total.as_deref(), Some("R$ 129.90"));
    }

    #[test]
    fn test_report_falls_back_on_missing_message() {
        let outcome = MutationOutcome::Rejected { message: None };
        let report = MutationReport::new("remove", "7", &outcome, "Erro ao remover item");
        assert!(!report.applied);
        assert_eq!(report.message, "Erro ao remover item");
        assert_eq!(report.total, None);
    }

    #[test]
    fn test_report_json_omits_missing_total() {
        let outcome = MutationOutcome::Applied {
            message: None,
            total: None,
        };
        let report = MutationReport::new("update", "7", &outcome, "ok");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["action"], "update");
        assert!(value.get("total").is_none());
        assert!(value["timestamp"].as_str().is_some());
    }
}
