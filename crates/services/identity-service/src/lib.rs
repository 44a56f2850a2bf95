//! Identity Service Library
//!
//! HTTP API for managing users and roles, backed by PostgreSQL.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod usecase;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::config::IdentityServiceConfig;
use crate::infra::Database;
use crate::repository::{RoleStore, UserStore};
use crate::routes::create_router;
use crate::state::AppState;

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &IdentityServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: IdentityServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    let db_conn = db.get_connection();

    // Create repositories
    let user_repo = Arc::new(UserStore::new(db_conn.clone()));
    let role_repo = Arc::new(RoleStore::new(db_conn));

    let addr: SocketAddr = config.service.bind_address().parse()?;
    let state = AppState::new(user_repo, role_repo, config).with_database(db);
    let app = create_router(state);

    info!("Identity service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
