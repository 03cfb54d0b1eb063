use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file path (~/.config/envprof/config.toml).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME not set");
            PathBuf::from(home).join(".config")
        });
    config_dir.join("envprof").join("config.toml")
}

/// Top-level config structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the live .env file managed by envprof.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
    /// Maximum number of backup files retained next to the live file.
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,
    /// Whether a backup is taken before every overwrite.
    #[serde(default = "default_backups_enabled")]
    pub backups_enabled: bool,
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_max_backups() -> usize {
    10
}

fn default_backups_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            max_backups: default_max_backups(),
            backups_enabled: default_backups_enabled(),
        }
    }
}

/// Load the config file, returning defaults if it doesn't exist.
pub fn load() -> Config {
    let path = config_path();
    load_from(&path)
}

/// Load config from a specific path, returning defaults on missing/invalid files.
pub fn load_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("warning: failed to parse {}: {e}", path.display());
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
