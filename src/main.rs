//! Crashwatch - Crash Notification Backend Binary
//!
//! Standalone server for the dashcam crash-notification system: live MJPEG
//! feed, crash report ingest, and real-time WebSocket alerts.

use clap::Parser;
use crashwatch::{start_web_server, ServerConfig, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_WEB_PORT};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "crashwatch")]
#[command(about = "Crash notification backend with live MJPEG feed and WebSocket alerts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Delay between live-feed parts per viewer, in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    frame_interval: u64,

    /// Placeholder image candidates, probed in order (may be repeated)
    #[arg(long = "placeholder")]
    placeholder_paths: Vec<PathBuf>,

    /// Static files directory (optional)
    #[arg(long)]
    static_dir: Option<String>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;
    print_banner();

    let mut config = ServerConfig::new(&cli.host, cli.port)
        .with_cors(!cli.no_cors)
        .with_frame_interval_ms(cli.frame_interval)
        .with_static_path(cli.static_dir.clone());

    if !cli.placeholder_paths.is_empty() {
        config = config.with_placeholder_paths(cli.placeholder_paths.clone());
    }

    info!("Web server configuration:");
    info!("  - Bind address: {}", config.bind_address());
    info!("  - CORS enabled: {}", config.enable_cors);
    info!("  - Frame interval: {}ms", config.frame_interval_ms);
    if let Some(static_dir) = &config.static_path {
        info!("  - Static files: {}", static_dir);
    }

    start_web_server(config).await?;

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    // RUST_LOG wins when set; otherwise the CLI flags pick the level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli_log_level(cli).to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn cli_log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn print_banner() {
    println!("🚨 Crashwatch - Crash Notification Backend");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
}
