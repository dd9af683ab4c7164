//! Flatboard Server Binary
//!
//! Starts the HTTP server for Flatboard.

use std::sync::Arc;

use clap::Parser;
use flatboard::network::Server;
use flatboard::{Config, Service};
use tracing_subscriber::{fmt, EnvFilter};

/// Flatboard Server
#[derive(Parser, Debug)]
#[command(name = "flatboard-server")]
#[command(about = "Minimal HTTP message board backed by a flat record file")]
#[command(version)]
struct Args {
    /// Data directory (messages.txt and the scratch file live here)
    #[arg(short, long, default_value = "./flatboard_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Static index page
    #[arg(short, long, default_value = "static/index.html")]
    index: String,

    /// Name of the scratch resource
    #[arg(long, default_value = "test.txt")]
    scratch: String,

    /// URI answered with 403 (repeatable)
    #[arg(long = "protect", default_values = ["server.rs", "src/bin/server.rs"])]
    protected: Vec<String>,

    /// Number of worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Socket read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flatboard=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Flatboard Server v{}", flatboard::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .index_path(&args.index)
        .scratch_name(&args.scratch)
        .protected_paths(args.protected)
        .workers(args.workers)
        .read_timeout_ms(args.read_timeout_ms)
        .build();

    let service = match Service::open(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open service: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config, service) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
