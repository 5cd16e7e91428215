//! Database handle.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

use super::migrations;
use crate::error::{Error, Result};

/// How long a statement waits on a locked database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Thread-safe database handle owning one SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create a database file and migrate it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let started = Instant::now();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Self::bootstrap(conn, Some(path.to_path_buf()))?;

        info!(
            path = %path.display(),
            schema_version = migrations::latest_version(),
            duration_ms = started.elapsed().as_millis() as u64,
            "database opened"
        );
        Ok(db)
    }

    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self::bootstrap(conn, None)?;
        debug!("in-memory database opened");
        Ok(db)
    }

    fn bootstrap(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file path, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&*conn)
    }

    /// Run `f` inside a transaction, committing only if it succeeds.
    pub fn with_transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Current schema version.
    pub fn schema_version(&self) -> Result<u32> {
        self.with_conn(migrations::current_version)
    }

    /// Cheap liveness check.
    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    /// Row counts per table.
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.with_conn(|conn| {
            let count = |table: &str| -> Result<u64> {
                let n: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                Ok(n as u64)
            };
            Ok(DatabaseStats {
                subjects: count("subjects")?,
                arguments: count("arguments")?,
                macroarguments: count("macroarguments")?,
                links: count("link_elements")?,
                argument_links: count("argument_links")?,
            })
        })
    }
}

/// Database access that refuses work once a deadline has passed.
///
/// The deadline is checked after the connection lock is acquired, and again
/// before a transaction commits. Work that misses it is never persisted.
pub struct BoundedDatabase<'a> {
    db: &'a Database,
    deadline: Instant,
}

impl Database {
    /// Bound every access made through the returned handle by `deadline`.
    pub fn until(&self, deadline: Instant) -> BoundedDatabase<'_> {
        BoundedDatabase { db: self, deadline }
    }
}

impl BoundedDatabase<'_> {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    fn check(&self) -> Result<()> {
        if Instant::now() >= self.deadline {
            return Err(Error::DeadlineExceeded);
        }
        Ok(())
    }

    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.db.with_conn(|conn| {
            self.check()?;
            f(conn)
        })
    }

    pub fn with_transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        self.db.with_transaction(|tx| {
            self.check()?;
            let value = f(tx)?;
            self.check()?;
            Ok(value)
        })
    }

    pub fn ping(&self) -> Result<()> {
        self.check()?;
        self.db.ping()
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        self.check()?;
        self.db.stats()
    }
}

/// Database statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub subjects: u64,
    pub arguments: u64,
    pub macroarguments: u64,
    pub links: u64,
    pub argument_links: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_is_migrated() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), migrations::latest_version());
        assert!(db.path().is_none());
        db.ping().unwrap();
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        let enabled: i64 = db
            .with_conn(|conn| Ok(conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_empty_stats() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.stats().unwrap(), DatabaseStats::default());
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<()> = db.with_transaction(|tx| {
            tx.execute("INSERT INTO subjects (name) VALUES ('Storia')", [])?;
            Err(crate::Error::Validation("abort".into()))
        });
        assert!(result.is_err());
        assert_eq!(db.stats().unwrap().subjects, 0);
    }

    #[test]
    fn test_bounded_refuses_expired_deadline() {
        let db = Database::open_in_memory().unwrap();
        let mut ran = false;
        let err = db
            .until(Instant::now())
            .with_conn(|_| {
                ran = true;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded));
        assert!(!ran);
    }

    #[test]
    fn test_bounded_transaction_rolls_back_past_deadline() {
        let db = Database::open_in_memory().unwrap();
        let bounded = db.until(Instant::now() + Duration::from_millis(20));
        let err = bounded
            .with_transaction(|tx| {
                tx.execute("INSERT INTO subjects (name) VALUES ('Storia')", [])?;
                std::thread::sleep(Duration::from_millis(50));
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, Error::DeadlineExceeded));
        assert_eq!(db.stats().unwrap().subjects, 0);
    }

    #[test]
    fn test_bounded_runs_before_deadline() {
        let db = Database::open_in_memory().unwrap();
        let bounded = db.until(Instant::now() + Duration::from_secs(5));
        bounded
            .with_transaction(|tx| {
                tx.execute("INSERT INTO subjects (name) VALUES ('Arte')", [])?;
                Ok(())
            })
            .unwrap();
        assert_eq!(bounded.stats().unwrap().subjects, 1);
        bounded.ping().unwrap();
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("maturalink.db");
        {
            let db = Database::open(&path).unwrap();
            db.with_conn(|conn| {
                conn.execute("INSERT INTO subjects (name) VALUES ('Arte')", [])?;
                Ok(())
            })
            .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.stats().unwrap().subjects, 1);
        assert_eq!(db.path(), Some(path.as_path()));
    }
}
