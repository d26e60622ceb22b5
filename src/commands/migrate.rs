//! Migrate command - schema management for the evms database.

use crate::cli::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // `down` and `status` must not apply the schema they operate on
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending schema migrations");
            db.run_migrations().await.map_err(migration_error)?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last schema migration");
            db.rollback_migration().await.map_err(migration_error)?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await.map_err(migration_error)?;
            let pending = status.iter().filter(|entry| !entry.applied).count();
            for entry in &status {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("{:<48} {}", entry.name, state);
            }
            println!("{} migration(s), {} pending", status.len(), pending);
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and rebuilding the schema");
            db.fresh_migrations().await.map_err(migration_error)?;
            tracing::info!("Fresh schema ready");
        }
    }

    Ok(())
}

fn migration_error(e: sea_orm::DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}
