//! SQLite persistence for events, resources, participants and contributions.
//!
//! Every unit of work is one sqlx transaction. The pool holds a single
//! connection, so units of work run one after another and a resource read
//! inside a unit stays valid until that unit commits.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use backend_domain::errors::StoreError;
use backend_domain::ports::{StoreResult, UnitOfWork, UnitOfWorkFactory};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

const MIGRATION_V1: &str = r#"
CREATE TABLE IF NOT EXISTS event (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    event_date INTEGER NOT NULL,
    creator TEXT NOT NULL,
    location TEXT NOT NULL,
    type TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    CONSTRAINT uq_event_creator_name UNIQUE (creator, name)
);

CREATE INDEX IF NOT EXISTS idx_event_creator ON event(creator);

CREATE TABLE IF NOT EXISTS resource (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    suggested_quantity INTEGER NOT NULL DEFAULT 0,
    current_quantity INTEGER NOT NULL DEFAULT 0,
    event_id TEXT NOT NULL REFERENCES event(id) ON DELETE CASCADE,
    version INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_resource_event ON resource(event_id);

CREATE TABLE IF NOT EXISTS participant (
    id TEXT PRIMARY KEY NOT NULL,
    user_email TEXT NOT NULL,
    event_id TEXT NOT NULL REFERENCES event(id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'CONFIRMED',
    joined_at INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    CONSTRAINT uq_participant_user_event UNIQUE (user_email, event_id)
);

CREATE INDEX IF NOT EXISTS idx_participant_event ON participant(event_id);

CREATE TABLE IF NOT EXISTS contribution (
    id TEXT PRIMARY KEY NOT NULL,
    participant_id TEXT NOT NULL REFERENCES participant(id) ON DELETE CASCADE,
    resource_id TEXT NOT NULL REFERENCES resource(id) ON DELETE CASCADE,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    CONSTRAINT uq_contribution_participant_resource UNIQUE (participant_id, resource_id)
);

CREATE INDEX IF NOT EXISTS idx_contribution_resource ON contribution(resource_id);
"#;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening SQLite database at {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Failed to connect to SQLite: {}", e))?;

        Self::run_migrations(&pool).await?;
        info!("SQLite store initialized");

        Ok(Self { pool })
    }

    /// In-memory database for tests. The single connection is never
    /// recycled, since dropping it would discard the database.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Failed to create in-memory SQLite: {}", e))?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        debug!("Running SQLite migrations...");
        sqlx::raw_sql(MIGRATION_V1)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("Migration failed: {}", e))?;
        debug!("Migrations completed successfully");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UnitOfWorkFactory for SqliteStore {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(backend("begin transaction"))?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(backend("ping"))
    }
}

/// One open transaction. The store impls for each table live next to this
/// file and all run against `conn()`.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await.map_err(backend("commit"))
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await.map_err(backend("rollback"))
    }
}

pub(crate) fn backend(context: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |err| StoreError::Backend(anyhow::Error::new(err).context(context))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
