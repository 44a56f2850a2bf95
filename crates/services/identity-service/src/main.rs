//! Identity Service - HTTP server for user and role management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use identity_service_lib::config::IdentityServiceConfig;
use identity_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "identity-service")]
#[command(about = "User and role management service")]
struct Cli {
    /// Load environment variables from this file instead of `.env`
    #[arg(long, global = true)]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load environment variables
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_filename(path)?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let mut config = IdentityServiceConfig::from_env();
    init_tracing(&config);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            tracing::info!(config = ?config, "starting identity service");
            identity_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            identity_service_lib::run_migrations(&config, migrate_action).await?;
        }
    }

    Ok(())
}

/// Pretty logs in development, JSON everywhere else.
fn init_tracing(config: &IdentityServiceConfig) {
    let default_directives = if config.service.is_dev() {
        "identity_service_lib=debug,tower_http=debug"
    } else {
        config.service.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(filter);
    if config.service.is_dev() {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    }
}
