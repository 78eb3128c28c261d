//! Function server entry point

use anyhow::Result;
use clap::Parser;
use function_server::{FunctionServer, Greeter};
use functions::{BatchProcessor, FunctionRegistry};
use statefun_config::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides the configuration
    #[arg(long)]
    bind_address: Option<String>,

    /// Port, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Greeting sent by the demo greeter
    #[arg(long, default_value = "Hello")]
    greeting: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind_address) = args.bind_address {
        config.bind_address = bind_address;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting stateful function server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded: {:?}", config);

    let mut registry = FunctionRegistry::new();
    registry.register(Greeter::function_type(), Greeter::new(args.greeting));

    let server = FunctionServer::new(config, BatchProcessor::new(Arc::new(registry)));

    tokio::select! {
        result = server.start() => {
            if let Err(e) = result {
                error!("Function server error: {}", e);
                return Err(e);
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
