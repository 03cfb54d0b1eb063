pub mod queries;
pub mod schema;

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Open (or create) the SQLite profile store at the given path.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Open an in-memory SQLite store (for tests).
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::migrate(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.db");
        let conn = open(&path).unwrap();
        assert!(queries::list_profiles(&conn).unwrap().is_empty());
    }

    #[test]
    fn open_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.db");
        {
            let conn = open(&path).unwrap();
            queries::insert_profile(&conn, "dev", None, "A=1\n").unwrap();
        }
        let conn = open(&path).unwrap();
        assert_eq!(queries::list_profiles(&conn).unwrap().len(), 1);
    }
}
