//! Shared application state — the database location, uploads directory
//! and runtime settings every handler needs.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Settings;
use crate::db::{self, DatabaseError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Shared by all request handlers. Wrapped in `Arc` at startup.
///
/// Connections are opened per operation — SQLite with WAL and a busy
/// timeout handles the short-lived writers this app produces.
pub struct CoreState {
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub settings: Settings,
}

impl CoreState {
    pub fn new(db_path: PathBuf, uploads_dir: PathBuf, settings: Settings) -> Self {
        Self {
            db_path,
            uploads_dir,
            settings,
        }
    }

    /// Open a database connection (migrations run on first open).
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        Ok(db::open_database(&self.db_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_and_migrates() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = CoreState::new(
            dir.path().join("test.db"),
            dir.path().join("uploads"),
            Settings {
                bind_addr: "127.0.0.1:0".into(),
                registration_key: Some("letmein".into()),
            },
        );

        let conn = state.open_db().unwrap();
        let tables = db::count_tables(&conn).unwrap();
        assert_eq!(tables, 8);

        // Second open sees the same file, not a fresh database.
        conn.execute(
            "INSERT INTO services (id, name, duration_minutes, price_cents) VALUES ('s1', 'Cut', 30, 2500)",
            [],
        )
        .unwrap();
        drop(conn);
        let again = state.open_db().unwrap();
        let count: i64 = again
            .query_row("SELECT COUNT(*) FROM services", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
