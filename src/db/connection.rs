use crate::error::{GreenhouseError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(2000);

/// SQLite-backed rule repository.
///
/// Every statement waits at most `busy_timeout` for a locked database
/// before failing with `RepositoryUnavailable`.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn, path.to_path_buf(), busy_timeout)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, PathBuf::from(":memory:"), DEFAULT_BUSY_TIMEOUT)
    }

    fn init(conn: Connection, path: PathBuf, busy_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        super::migrations::run(&db)?;

        Ok(db)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| poisoned())?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| poisoned())?;
        f(&mut conn)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn poisoned() -> GreenhouseError {
    GreenhouseError::RepositoryUnavailable("database connection lock poisoned".into())
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_database_runs_migrations() {
        let db = Database::open_in_memory().unwrap();
        let version: i32 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(version, 2);
        assert_eq!(db.path(), &PathBuf::from(":memory:"));
    }

    #[test]
    fn clones_share_one_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        db.with_conn(|conn| {
            conn.execute("CREATE TABLE scratch (x INTEGER)", [])?;
            Ok(())
        })
        .unwrap();
        let count: i64 = other
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE name = 'scratch'",
                    [],
                    |row| row.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn unopenable_path_is_repository_unavailable() {
        let result = Database::open(
            Path::new("/nonexistent-dir/greenhouse/greenhouse.db"),
            DEFAULT_BUSY_TIMEOUT,
        );
        assert!(matches!(
            result,
            Err(GreenhouseError::RepositoryUnavailable(_))
        ));
    }
}
