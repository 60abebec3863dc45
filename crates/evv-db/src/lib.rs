//! # evv-db
//!
//! libSQL persistence for EVV schedules and their care tasks.
//!
//! [`EvvDb`] owns the database handle and runs the embedded migrations on
//! open. The lifecycle components never see it directly: they talk to the
//! [`gateway::ScheduleGateway`] and [`gateway::TaskGateway`] traits, which
//! [`repos::ScheduleRepo`] and [`repos::TaskRepo`] implement on top of a
//! shared `Arc<EvvDb>`.

pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod helpers;
mod migrations;
pub mod repos;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use evv_config::DatabaseConfig;
use libsql::Builder;

/// Central database handle for schedule and task state.
///
/// Holds one connection for the lifetime of the handle. An in-memory
/// database exists only on the connection that created it, so every query
/// goes through [`EvvDb::conn`].
pub struct EvvDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl EvvDb {
    /// Open a local database file (or `:memory:`).
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with_busy_timeout(path, Duration::from_millis(5_000)).await
    }

    async fn open_local_with_busy_timeout(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        // busy_timeout echoes the new value back as a row.
        conn.query(
            &format!("PRAGMA busy_timeout = {}", busy_timeout.as_millis()),
            (),
        )
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;

        let evv_db = Self { db, conn };
        evv_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(evv_db)
    }

    /// Open a remote libSQL (Turso) database over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let evv_db = Self { db, conn };
        evv_db.run_migrations().await?;
        tracing::debug!(url, "opened remote database");
        Ok(evv_db)
    }

    /// Open whichever database the configuration names.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_local`] / [`Self::open_remote`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            Self::open_local_with_busy_timeout(
                &config.path,
                Duration::from_millis(config.busy_timeout_ms),
            )
            .await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
