//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use vitrine_core::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }
    println!();
    println!("{}", ctx.config.to_toml_string()?);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = write_default_config(&ctx.cwd, force)?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output.info("Set endpoints.base_url to your storefront, or pass --server");
    Ok(())
}

/// Write the default configuration as `vitrine.toml` under `dir`.
fn write_default_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let config_path = dir.join("vitrine.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, StorefrontConfig::default().to_toml_string()?)?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("vitrine-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = scratch_dir("init");
        let path = write_default_config(&dir, false).unwrap();

        let loaded = StorefrontConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, StorefrontConfig::default());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = scratch_dir("force");
        fs::write(dir.join("vitrine.toml"), "currency = \"BRL\"\n").unwrap();

        assert!(write_default_config(&dir, false).is_err());
        assert!(write_default_config(&dir, true).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }
}
