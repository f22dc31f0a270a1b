//! Translation store HTTP service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use translation_store::api::{cors_layer, create_router, AppState};
use translation_store::config::Config;
use translation_store::metrics;
use translation_store::store::{self, PageStore};
use translation_store::utils::shutdown_signal;

/// Per-page, per-locale translation store.
#[derive(Parser, Debug)]
#[command(name = "translation-store")]
#[command(about = "HTTP service storing per-page, per-locale string translations")]
#[command(version)]
struct Args {
    /// Enable verbose logging (overrides RUST_LOG).
    #[arg(short, long, global = true, env = "VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Connect to the configured store and ping it.
    PingStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(args.verbose))
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::PingStore) => cmd_ping_store().await,
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        None => cmd_serve(args.port).await,
    }
}

/// `--verbose`/`VERBOSE` wins over `RUST_LOG`, which falls back to `info`.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("translation_store=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Load and validate configuration, logging failures.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TRANSLATION STORE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Store Backend: {}", config.store_backend);
    println!(
        "  Database: {}",
        config.database_name().unwrap_or("(from connection string)")
    );
    println!("  Collection: {}", config.mongodb_collection);
    println!("  Port: {}", config.port);
    println!("  CORS Origin: {}", config.cors_origin);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Connect to the configured store and ping it.
async fn cmd_ping_store() -> anyhow::Result<()> {
    let config = load_config()?;

    info!("Connecting to {} store...", config.store_backend);
    let store = store::connect(&config).await?;
    store.ping().await?;
    info!("Store is reachable");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    let cors = config
        .cors_origins()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Store backend: {}", config.store_backend);

    let store = store::connect(&config).await.map_err(|e| {
        error!("Failed to connect to store: {}", e);
        e
    })?;

    let mut app_state = AppState::new(store);
    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => {
                metrics::init_metrics();
                app_state = app_state.with_metrics(handle);
            }
            Err(e) => warn!("Failed to install metrics recorder: {}", e),
        }
    }

    let router = create_router(app_state).layer(cors_layer(&cors));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
