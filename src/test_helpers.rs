use std::path::Path;

use rusqlite::Connection;

use crate::envfile::EnvFileManager;
use crate::store;

/// In-memory store connection with the schema applied.
pub fn test_conn() -> Connection {
    store::open_memory().unwrap()
}

/// Manager for a `.env` file inside `dir`, with default settings.
pub fn manager_in(dir: &Path) -> EnvFileManager {
    EnvFileManager::new(dir.join(".env"), 10, true)
}
