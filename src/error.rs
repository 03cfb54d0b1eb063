/// All errors produced by envprof.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("a profile named '{0}' already exists")]
    ProfileExists(String),

    #[error("backup not found: {0}")]
    BackupNotFound(String),

    #[error("profile name must not be empty")]
    EmptyProfileName,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
