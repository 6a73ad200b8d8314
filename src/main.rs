//! notesd CLI - standalone in-memory note server

use clap::Parser;
use notesd::{Config, Core};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notesd")]
#[command(author = "Notesd Team")]
#[command(version)]
#[command(about = "notesd - in-memory note-keeping HTTP service", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.notesd/config.toml")]
    config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = notesd::config::expand_path(&args.config);

    // Read the config before logging is up, so the file layer can be configured
    let file_config = if config_path.exists() {
        Some(Config::from_file(&config_path)?)
    } else {
        None
    };
    let log_dir = file_config.as_ref().and_then(Config::log_dir);
    let file_prefix = file_config
        .as_ref()
        .map(|c| c.logging.file_prefix.clone())
        .unwrap_or_else(|| "notesd.log".to_string());

    // Initialize logging
    notesd::logging::init(log_dir.as_deref(), &file_prefix, args.verbose)?;

    let result = run(args, config_path, file_config).await;
    notesd::logging::flush();
    result
}

async fn run(args: Args, config_path: PathBuf, file_config: Option<Config>) -> anyhow::Result<()> {
    // Handle --init flag
    if args.init {
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    let mut config = match file_config {
        Some(config) => config,
        None => {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    };

    // Environment overrides, then CLI overrides
    config.apply_env_overrides()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let core = Core::new(config);

    // Start API server (blocks until shutdown)
    core.start_api_server().await?;

    Ok(())
}
