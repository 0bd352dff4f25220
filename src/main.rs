//! Car rental service: headless REST API server
//!
//! ```sh
//! # Default config (~/.config/car-rental/config.toml)
//! car-rental-service
//!
//! # Custom config path and port
//! car-rental-service --config /etc/car-rental/config.toml --api-port 9090
//!
//! # Write a default config file, or validate one without starting
//! car-rental-service --init-config
//! car-rental-service --check
//!
//! # Throwaway instance without a database
//! car-rental-service --in-memory
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use car_rental::config::{config_path_from_env, AppConfig};
use car_rental::server::{init_tracing, ServerHandle, ServerOptions};
use car_rental::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "car-rental-service",
    version,
    about = "Car rental REST API: fleet, quotes, bookings, payments and reviews",
    long_about = "Car rental REST API server.\n\n\
                  Default config: ~/.config/car-rental/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML). Falls back to `CAR_RENTAL_CONFIG`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the REST API listen port
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Write a default configuration file to the config path and exit
    #[arg(long)]
    init_config: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user
    #[arg(long)]
    no_admin: bool,

    /// Keep all data in memory instead of the database
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config_path_from_env);

    if cli.init_config {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            AppConfig::default().save(&config_path)?;
            println!("Default config written to {}", config_path.display());
        }
        return Ok(());
    }

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };

    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            if cli.check {
                return Err(e.into());
            }
            error!("Using default configuration.");
        }
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
        in_memory: cli.in_memory,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
