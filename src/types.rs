use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named, persisted snapshot of .env content.
///
/// At most one profile in the store carries `is_active = true`; the flag
/// is flipped only through the store's `set_active` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Database row id.
    pub id: i64,
    /// Unique, case-sensitive profile name.
    pub name: String,
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Raw .env content, stored verbatim.
    pub content: String,
    /// Whether this profile is the currently applied configuration.
    pub is_active: bool,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// ISO-8601 timestamp of the last update.
    pub updated_at: String,
}

/// A timestamped backup file sitting next to the live .env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// File name (e.g. `.env.backup.20250111134509`).
    pub file_name: String,
    /// Full path to the backup file.
    pub path: PathBuf,
    /// The 14-digit `YYYYMMDDHHMMSS` stamp embedded in the name.
    pub timestamp: String,
}
