//! Inside Tunisia server
//!
//! ```sh
//! # Default config (~/.config/inside-tunisia/config.toml)
//! inside-tunisia
//!
//! # Custom config and port
//! inside-tunisia --config /etc/inside-tunisia/config.toml --port 8080
//!
//! # Validate config without starting
//! inside-tunisia --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use inside_tunisia::config::{default_config_path, AppConfig, ConfigError, CONFIG_ENV_VAR};
use inside_tunisia::server::{init_tracing, ServerHandle, ServerOptions};

/// Tourism portal connecting tourists with approved local guides.
#[derive(Parser, Debug)]
#[command(name = "inside-tunisia", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,

    /// Skip creating the default admin account.
    #[arg(long)]
    no_admin: bool,
}

impl Cli {
    /// Command-line values win over the file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let loaded: Result<AppConfig, ConfigError> = AppConfig::load(&config_path);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    cli.apply_overrides(&mut config);

    // Uses the overridden level
    init_tracing(&config);
    match &loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
    }
    if let Some(level) = &cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    if cli.check {
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Uploads     : {}", config.uploads.dir.display());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
