use std::collections::BTreeMap;
use std::io::{self, IsTerminal};

use colored::Colorize;

use crate::types::{BackupEntry, Profile};

/// Check if stdout is a terminal (vs piped).
pub fn is_stdout_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Render a 14-digit backup stamp as "YYYY-MM-DD HH:MM:SS".
///
/// Falls back to the raw stamp if it doesn't parse.
pub fn human_timestamp(stamp: &str) -> String {
    match chrono::NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => stamp.to_string(),
    }
}

/// Format the profile list as human-readable text.
pub fn format_profile_list_text(profiles: &[Profile], long: bool) -> String {
    let mut out = String::new();

    for profile in profiles {
        let marker = if profile.is_active { "*" } else { " " };
        let name = if profile.is_active {
            profile.name.green().bold().to_string()
        } else {
            profile.name.to_string()
        };

        out.push_str(&format!("{marker} {name}"));
        if let Some(label) = &profile.label {
            out.push_str(&format!("  {}", format!("({label})").dimmed()));
        }
        if long {
            out.push_str(&format!(
                "  {}",
                format!("updated {}", profile.updated_at).dimmed()
            ));
        }
        out.push('\n');
    }

    out
}

/// Format the backup list as human-readable text, newest last.
pub fn format_backup_list_text(backups: &[BackupEntry]) -> String {
    let mut out = String::new();
    for backup in backups {
        out.push_str(&format!(
            "{}  {}\n",
            backup.timestamp,
            human_timestamp(&backup.timestamp).dimmed()
        ));
    }
    out
}

/// Format a parsed mapping as `KEY=value` lines (keys sorted).
pub fn format_parsed_text(env: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in env {
        out.push_str(&format!("{}={value}\n", key.bold()));
    }
    out
}
