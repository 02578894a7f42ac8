//! Legal AI backend entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use legal_ai_backend::config::Config;
use legal_ai_backend::metrics;
use legal_ai_backend::App;

/// Placeholder HTTP backend for the Legal AI chat front-end.
#[derive(Parser, Debug)]
#[command(name = "legal-ai-backend")]
#[command(about = "Placeholder HTTP backend for the Legal AI chat front-end")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration is loaded before logging so RUST_LOG/VERBOSE from .env apply
    let config = Config::load();

    // Initialize logging
    let verbose = args.verbose || config.as_ref().is_ok_and(|c| c.verbose);
    let filter = if verbose {
        EnvFilter::new("legal_ai_backend=debug,info")
    } else {
        config
            .as_ref()
            .ok()
            .and_then(|c| EnvFilter::try_new(&c.rust_log).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("LEGAL AI BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

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
    println!("  HTTP Address: {}", config.http_addr());
    println!("  Allowed Origins:");
    for origin in &config.cors_allowed_origins {
        println!("    - {}", origin);
    }
    println!("  Health Clock: {}", config.health_clock);
    match config.metrics_addr() {
        Some(addr) => println!("  Metrics: {}", addr),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until shutdown.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Allowed origins: {}", config.cors_allowed_origins.join(", "));
    info!("Health clock: {}", config.health_clock);

    metrics::init_metrics();
    match config.metrics_addr() {
        Some(addr) => metrics::install_exporter(addr)?,
        None => info!("METRICS_PORT not set, metrics will not be exported"),
    }

    let app = App::from_config(&config)?;
    let listener = TcpListener::bind(config.http_addr()).await?;
    app.serve(listener).await?;

    Ok(())
}
