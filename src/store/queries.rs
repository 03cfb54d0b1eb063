use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::types::Profile;

/// The column list used in all SELECT queries returning `Profile`.
const PROFILE_COLUMNS: &str = "id, name, label, content, is_active, created_at, updated_at";

/// Current timestamp in the store's format (RFC 3339, seconds, UTC).
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Helper to map a row into `Profile`. Expects columns in `PROFILE_COLUMNS`
/// order.
fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<Profile> {
    let label_raw: String = row.get(2)?;
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        label: if label_raw.is_empty() {
            None
        } else {
            Some(label_raw)
        },
        content: row.get(3)?,
        is_active: row.get::<_, i64>(4)? != 0,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Map a UNIQUE-constraint violation on `name` to `ProfileExists`.
fn map_name_conflict(err: rusqlite::Error, name: &str) -> Error {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return Error::ProfileExists(name.to_string());
        }
    }
    Error::Database(err)
}

/// Insert a new profile. Returns the stored row.
pub fn insert_profile(
    conn: &Connection,
    name: &str,
    label: Option<&str>,
    content: &str,
) -> Result<Profile> {
    let ts = now();
    conn.execute(
        "INSERT INTO profiles (name, label, content, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, 0, ?4, ?4)",
        params![name, label.unwrap_or(""), content, ts],
    )
    .map_err(|e| map_name_conflict(e, name))?;

    let id = conn.last_insert_rowid();
    get_profile_by_id(conn, id)?.ok_or_else(|| Error::ProfileNotFound(name.to_string()))
}

/// Get a profile by name.
pub fn get_profile(conn: &Connection, name: &str) -> Result<Option<Profile>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE name = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![name])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_profile(row)?)),
        None => Ok(None),
    }
}

/// Get a profile by name, erroring when it doesn't exist.
pub fn require_profile(conn: &Connection, name: &str) -> Result<Profile> {
    get_profile(conn, name)?.ok_or_else(|| Error::ProfileNotFound(name.to_string()))
}

fn get_profile_by_id(conn: &Connection, id: i64) -> Result<Option<Profile>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_profile(row)?)),
        None => Ok(None),
    }
}

/// List all profiles, ordered by name.
pub fn list_profiles(conn: &Connection) -> Result<Vec<Profile>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_profile)?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Update a profile's name, label and/or content. `None` fields are left
/// untouched; `updated_at` is always bumped.
pub fn update_profile(
    conn: &Connection,
    id: i64,
    name: Option<&str>,
    label: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    let mut sql = "UPDATE profiles SET updated_at = ?1".to_string();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(now())];
    let mut idx = 2;

    if let Some(n) = name {
        sql.push_str(&format!(", name = ?{idx}"));
        param_values.push(Box::new(n.to_string()));
        idx += 1;
    }

    if let Some(l) = label {
        sql.push_str(&format!(", label = ?{idx}"));
        param_values.push(Box::new(l.to_string()));
        idx += 1;
    }

    if let Some(c) = content {
        sql.push_str(&format!(", content = ?{idx}"));
        param_values.push(Box::new(c.to_string()));
        idx += 1;
    }

    sql.push_str(&format!(" WHERE id = ?{idx}"));
    param_values.push(Box::new(id));

    let params_ref: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(|p| p.as_ref()).collect();
    let count = conn
        .execute(&sql, params_ref.as_slice())
        .map_err(|e| map_name_conflict(e, name.unwrap_or("")))?;

    if count == 0 {
        return Err(Error::ProfileNotFound(id.to_string()));
    }
    Ok(())
}

/// Delete a profile by id.
pub fn delete_profile(conn: &Connection, id: i64) -> Result<()> {
    let count = conn.execute("DELETE FROM profiles WHERE id = ?1", params![id])?;
    if count == 0 {
        return Err(Error::ProfileNotFound(id.to_string()));
    }
    Ok(())
}

/// Mark exactly one profile as active.
///
/// Runs as a single transaction: every other active flag is cleared and the
/// target's flag is set in one atomic step, so there is never a window with
/// two active profiles.
pub fn set_active(conn: &mut Connection, id: i64) -> Result<()> {
    let ts = now();
    let tx = conn.transaction()?;
    tx.execute("UPDATE profiles SET is_active = 0 WHERE is_active = 1", [])?;
    let count = tx.execute(
        "UPDATE profiles SET is_active = 1, updated_at = ?2 WHERE id = ?1",
        params![id, ts],
    )?;
    if count == 0 {
        return Err(Error::ProfileNotFound(id.to_string()));
    }
    tx.commit()?;
    Ok(())
}

/// The currently active profile, if any.
pub fn get_active(conn: &Connection) -> Result<Option<Profile>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE is_active = 1 LIMIT 1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_profile(row)?)),
        None => Ok(None),
    }
}
