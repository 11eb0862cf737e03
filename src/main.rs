use anyhow::Result;
use clap::Parser;
use logsieve::config::Config;
use logsieve::server::LogServer;
use std::path::PathBuf;
use tracing::{debug, error};

/// Stream one author's chat-log lines from a directory of plain and
/// gzip'd log files
#[derive(Parser)]
#[command(name = "logsieve")]
#[command(about = "Serve author-filtered chat-log lines over HTTP", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory containing the chat-log corpus (overrides config)
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    if let Err(e) = run(cli).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    if let Some(dir) = cli.logs_dir {
        config.logs_dir = dir;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    debug!("configuration: {:?}", config);

    LogServer::new(config).start().await
}
