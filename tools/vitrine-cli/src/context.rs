//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use vitrine_core::StorefrontConfig;
use vitrine_data::{CartApi, ReqwestTransport};
use vitrine_observability::{ConsoleSink, LogFormat, LogLevel, StructuredLogger};

use crate::output::Output;

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["vitrine.toml", ".vitrine.toml", "vitrine.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cookie header value for authenticated carts.
    pub session: Option<String>,
}

impl Context {
    /// Load context from config file and command-line overrides.
    pub fn load(
        config_path: Option<&str>,
        server: Option<&str>,
        session: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let config = StorefrontConfig::load(path)
                    .with_context(|| format!("Failed to load config: {}", path))?;
                (config, Some(PathBuf::from(path)))
            }
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        if let Some(server) = server {
            config.endpoints.base_url = Some(server.to_string());
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            session,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Cart API client for the configured server.
    pub fn api(&self) -> Result<CartApi<ReqwestTransport>> {
        let Some(base_url) = self.config.endpoints.base_url.as_deref() else {
            bail!("No storefront URL. Pass --server or set endpoints.base_url in vitrine.toml");
        };
        self.output.debug(&format!("Server: {}", base_url));

        let api = CartApi::from_config(ReqwestTransport::new(), &self.config);
        Ok(match &self.session {
            Some(cookie) => api.with_default_header("Cookie", cookie.clone()),
            None => api,
        })
    }

    /// Logger for request diagnostics. Verbose mode lowers the threshold.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        let level = if self.output.is_verbose() {
            LogLevel::Debug
        } else {
            self.config.logging.level
        };
        StructuredLogger::new(std::rc::Rc::new(ConsoleSink))
            .with_component(component)
            .with_min_level(level)
            .with_format(if self.output.is_json() {
                LogFormat::Json
            } else {
                LogFormat::Human
            })
            .for_interaction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: StorefrontConfig, session: Option<&str>) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("."),
            session: session.map(str::to_string),
        }
    }

    #[test]
    fn test_api_requires_server() {
        let ctx = context(StorefrontConfig::default(), None);
        assert!(ctx.api().is_err());
    }

    #[test]
    fn test_api_with_server() {
        let mut config = StorefrontConfig::default();
        config.endpoints.base_url = Some("http://localhost:5000".to_string());
        let ctx = context(config, Some("session=abc"));
        assert!(ctx.api().is_ok());
    }

    #[test]
    fn test_server_flag_overrides_config() {
        let ctx = Context::load(
            None,
            Some("http://127.0.0.1:8000"),
            None,
            Output::new(false, true),
        )
        .unwrap();
        assert_eq!(
            ctx.config.endpoints.base_url.as_deref(),
            Some("http://127.0.0.1:8000")
        );
    }
}
