//! Connection pool and schema management.

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{AccessMode, StoreError, StoreResult, UnitOfWork};

/// Database connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connects to `database_url` and runs migrations.
    ///
    /// The database runs in WAL mode so readers never block the single
    /// writer.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        tracing::info!(max_connections, "Database ready");

        Ok(db)
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the
    /// pool holds exactly one connection that is never recycled.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Begins a read-write unit of work.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`), so a unit of
    /// work that reads before writing waits for other writers instead of
    /// failing when it upgrades its lock.
    pub async fn begin(&self) -> StoreResult<UnitOfWork> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(UnitOfWork::new(tx, AccessMode::ReadWrite))
    }

    /// Begins a read-only unit of work. Writes through it fail with
    /// [`StoreError::ReadOnly`] and it never commits.
    pub async fn begin_read_only(&self) -> StoreResult<UnitOfWork> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(tx, AccessMode::ReadOnly))
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Runs database migrations
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(())
    }
}

/// SQL schema definition
///
/// Dependent rows are removed explicitly by the repositories, so foreign
/// keys only guard against dangling references and never cascade.
const SCHEMA_SQL: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject TEXT NOT NULL UNIQUE,
    provider TEXT NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    profile_completed INTEGER NOT NULL DEFAULT 0,
    profile_description TEXT
);

-- Personal info (1:1, owned by the user)
CREATE TABLE IF NOT EXISTS user_personal_info (
    user_id INTEGER PRIMARY KEY NOT NULL REFERENCES users(id),
    full_name TEXT NOT NULL,
    avatar BLOB,
    member_since TEXT
);

-- Tags table
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    category TEXT
);

-- User tags (M:N relationship)
CREATE TABLE IF NOT EXISTS user_tags (
    user_id INTEGER NOT NULL REFERENCES users(id),
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (user_id, tag_id)
);

-- Directed subscription edges, one row per edge
CREATE TABLE IF NOT EXISTS user_subscriptions (
    subscriber_id INTEGER NOT NULL REFERENCES users(id),
    target_id INTEGER NOT NULL REFERENCES users(id),
    PRIMARY KEY (subscriber_id, target_id),
    CHECK (subscriber_id <> target_id)
);

CREATE INDEX IF NOT EXISTS idx_user_subscriptions_target
    ON user_subscriptions (target_id, subscriber_id);

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL REFERENCES users(id),
    title TEXT NOT NULL,
    description TEXT,
    creation_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_events_owner ON events (owner_id);
CREATE INDEX IF NOT EXISTS idx_events_active_end ON events (is_active, end_date);

-- Event members (M:N relationship)
CREATE TABLE IF NOT EXISTS event_members (
    event_id INTEGER NOT NULL REFERENCES events(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    PRIMARY KEY (event_id, user_id)
);

CREATE INDEX IF NOT EXISTS idx_event_members_user ON event_members (user_id);

-- Event tags (M:N relationship)
CREATE TABLE IF NOT EXISTS event_tags (
    event_id INTEGER NOT NULL REFERENCES events(id),
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (event_id, tag_id)
);
"#;
