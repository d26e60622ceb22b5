//! Postgres connection handling and migration management.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// One row of `migrate status` output.
pub struct MigrationStatus {
    pub name: String,
    pub applied: bool,
}

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and bring the schema up to date. `serve` uses this; a
    /// server on a half-migrated schema would fail on its first query
    /// anyway, so a migration failure aborts startup.
    ///
    /// # Panics
    /// Panics when the connection or a migration fails.
    pub async fn connect(config: &Config) -> Self {
        tracing::info!("Connecting to Postgres");
        let connection = SeaDatabase::connect(&config.database_url)
            .await
            .expect("Failed to connect to database");

        tracing::info!("Applying pending schema migrations");
        if let Err(e) = Migrator::up(&connection, None).await {
            panic!("Schema migration failed: {}", e);
        }
        tracing::info!("Schema is up to date");

        Self { connection }
    }

    /// Connect without touching the schema. The `migrate` command uses
    /// this so `down` and `status` do not first apply what they inspect.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Clone of the underlying connection for wiring up the stores.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Roll back the most recent migration only.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration with its applied state, in definition order.
    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>, DbErr> {
        use sea_orm::EntityTrait;
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| MigrationStatus {
                name: m.name().to_string(),
                applied: applied.contains(m.name()),
            })
            .collect())
    }

    /// Drop all tables and rebuild the schema from scratch.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map(|_| ())
    }
}
