use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text, validator::Validation};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use weather_core::{
    AUTO_TIMEZONE, Config, ForecastProvider, provider_from_config, timestamp::resolve_timezone,
};
use weather_server::{AppState, create_router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Hourly weather forecast server")]
pub struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the web server.
    Serve {
        /// Address to bind, e.g. "0.0.0.0:8080".
        #[arg(long)]
        listen: Option<String>,

        /// Forecast endpoint to query instead of the configured one.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Interactively write the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut cfg = load_config(self.config.as_deref())?;

        match self.command {
            Command::Serve { listen, base_url } => {
                if listen.is_some() {
                    cfg.listen = listen;
                }
                if base_url.is_some() {
                    cfg.base_url = base_url;
                }
                serve(cfg).await
            }
            Command::Configure => {
                configure(&mut cfg)?;
                match self.config.as_deref() {
                    Some(path) => cfg.save_to(path)?,
                    None => cfg.save()?,
                }
                println!("Configuration saved.");
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn serve(cfg: Config) -> anyhow::Result<()> {
    let provider: Arc<dyn ForecastProvider> = Arc::from(provider_from_config(&cfg));
    let state = AppState::new(
        provider,
        cfg.default_timezone(),
        Duration::from_secs(cfg.request_timeout_secs()),
    );

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(cfg.listen())
        .await
        .with_context(|| format!("Failed to bind {}", cfg.listen()))?;

    info!(
        addr = %listener.local_addr()?,
        upstream = %cfg.base_url(),
        default_timezone = %cfg.default_timezone(),
        "Server is running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn configure(cfg: &mut Config) -> anyhow::Result<()> {
    let base_url = Text::new("Forecast API base URL:")
        .with_default(cfg.base_url())
        .prompt()?;

    let listen = Text::new("Listen address:")
        .with_default(cfg.listen())
        .with_validator(|input: &str| {
            Ok(match input.parse::<SocketAddr>() {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(format!("Not a socket address: {e}").into()),
            })
        })
        .prompt()?;

    let default_timezone = Text::new("Default timezone (IANA name or \"auto\"):")
        .with_default(cfg.default_timezone())
        .with_validator(|input: &str| {
            Ok(
                if input == AUTO_TIMEZONE || resolve_timezone(input).is_ok() {
                    Validation::Valid
                } else {
                    Validation::Invalid(format!("Unknown timezone '{input}'").into())
                },
            )
        })
        .prompt()?;

    let request_timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(cfg.request_timeout_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    cfg.base_url = Some(base_url);
    cfg.listen = Some(listen);
    cfg.default_timezone = Some(default_timezone);
    cfg.request_timeout_secs = Some(request_timeout_secs);

    Ok(())
}
