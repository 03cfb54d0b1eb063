use rusqlite::Connection;

use crate::error::Result;

/// Create all tables if they don't already exist.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS profiles (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT    NOT NULL UNIQUE,
            label      TEXT    NOT NULL DEFAULT '',
            content    TEXT    NOT NULL,
            is_active  INTEGER NOT NULL DEFAULT 0,
            created_at TEXT    NOT NULL,
            updated_at TEXT    NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_name
            ON profiles(name);
        ",
    )?;
    Ok(())
}
