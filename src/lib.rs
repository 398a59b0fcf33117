pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::cli::calculate::CalculateArgs;
use crate::cli::ui::AmountFormat;
use crate::core::Calculator;
use crate::core::config::AppConfig;
use crate::providers::{HttpProvider, LocalProvider};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Environment variable naming the remote backend when neither the command
/// line nor the config file does.
pub const API_URL_ENV: &str = "FINCALC_API_URL";

/// Where calculations run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Local,
    /// A remote backend, optionally with an explicit base URL.
    Remote(Option<String>),
}

pub enum AppCommand {
    Calculate {
        args: CalculateArgs,
        backend: Backend,
    },
    Scenarios {
        backend: Backend,
    },
    Serve {
        host: Option<String>,
        port: Option<u16>,
    },
    Setup,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    if let AppCommand::Setup = command {
        return match config_path {
            Some(path) => cli::setup::setup_at_path(path),
            None => cli::setup::setup(),
        };
    }

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let format = AmountFormat {
        symbol: config.currency_symbol(),
        decimal_places: config.decimal_places,
    };

    match command {
        AppCommand::Calculate { args, backend } => {
            let calculator = build_calculator(&backend, &config)?;
            cli::calculate::run(&args, calculator.as_ref(), &format).await
        }
        AppCommand::Scenarios { backend } => {
            let calculator = build_calculator(&backend, &config)?;
            cli::scenarios::run(&config.scenarios, calculator.as_ref(), &format).await
        }
        AppCommand::Serve { host, port } => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            server::run(&server_config, config.decimal_places).await
        }
        AppCommand::Setup => unreachable!("Setup is handled before loading config"),
    }
}

fn build_calculator(backend: &Backend, config: &AppConfig) -> Result<Box<dyn Calculator>> {
    match backend {
        Backend::Local => Ok(Box::new(LocalProvider)),
        Backend::Remote(url) => {
            let base_url = resolve_remote_url(url.as_deref(), config)?;
            info!("Using remote backend at {}", base_url);
            Ok(Box::new(HttpProvider::new(&base_url)?))
        }
    }
}

/// Command line URL first, then the config file, then [`API_URL_ENV`].
fn resolve_remote_url(explicit: Option<&str>, config: &AppConfig) -> Result<String> {
    if let Some(url) = explicit {
        return Ok(url.to_string());
    }
    if let Some(remote) = &config.remote {
        return Ok(remote.base_url.clone());
    }
    std::env::var(API_URL_ENV).with_context(|| {
        format!("No remote backend configured: pass a URL, set remote.base_url or {API_URL_ENV}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RemoteConfig;

    #[test]
    fn test_explicit_remote_url_wins() {
        let config = AppConfig {
            remote: Some(RemoteConfig {
                base_url: "http://configured".to_string(),
            }),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_remote_url(Some("http://flag"), &config).unwrap(),
            "http://flag"
        );
        assert_eq!(
            resolve_remote_url(None, &config).unwrap(),
            "http://configured"
        );
    }
}
