use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use gamesync::auth::{AuthHolder, FileTokenStore, MemoryTokenStore, TokenPersistence};
use gamesync::config::Config;
use gamesync::events::{EventConfig, EventConnection, EventListener};
use gamesync::interactor::Environment;
use gamesync::logging::init_logging;
use gamesync::state::GlobalStore;
use gamesync::transport::{ApiClient, ReqwestTransport, TimeoutConfig};

/// Terminal client for a multiplayer game server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/gamesync/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server base URL, overrides `server.base_url`
    #[arg(long)]
    server: Option<String>,

    /// Event channel address, overrides `server.events_addr`
    #[arg(long)]
    events: Option<String>,

    /// Keep the credential in memory only
    #[arg(long, default_value_t = false)]
    ephemeral: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let log_path = config.log_path();
    init_logging(&config.logging, &log_path)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting gamesync");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run(config, cli.ephemeral));
    if let Err(err) = &result {
        tracing::error!(error = %err, "gamesync exited with error");
    }
    result
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(events) = &cli.events {
        config.server.events_addr = events.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(config: Config, ephemeral: bool) -> anyhow::Result<()> {
    let persistence: Arc<dyn TokenPersistence> = if ephemeral {
        Arc::new(MemoryTokenStore::new())
    } else {
        Arc::new(FileTokenStore::new(config.token_path()))
    };
    let auth = AuthHolder::new(persistence);
    if let Err(err) = auth.restore() {
        tracing::warn!(error = %err, "Could not restore saved credential");
    }

    let global = GlobalStore::new();

    let event_config = EventConfig::from(&config.server);
    let events = match EventConnection::connect(&config.server.events_addr, event_config).await {
        Ok((connection, read_half)) => {
            let listener = EventListener::new(read_half, global.clone());
            tokio::spawn(async move {
                if let Err(err) = listener.run().await {
                    tracing::warn!(error = %err, "Event listener stopped");
                }
            });
            connection
        }
        Err(err) => {
            tracing::warn!(error = %err, "Event channel unavailable, continuing offline");
            EventConnection::disconnected(event_config)
        }
    };

    let transport = ReqwestTransport::new(
        &config.server.base_url,
        TimeoutConfig::from(&config.server),
    )?;
    let env = Environment {
        global,
        api: ApiClient::new(Arc::new(transport)),
        auth,
        events,
    };

    gamesync::ui::run(env).await?;
    tracing::info!("gamesync stopped");
    Ok(())
}
