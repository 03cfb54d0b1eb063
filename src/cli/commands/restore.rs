use colored::Colorize;

use crate::cli::{self, output};
use crate::envfile::EnvFileManager;
use crate::error::{Error, Result};

/// Run the `restore` command: write a backup's content back to the live
/// file. Defaults to the most recent backup.
pub fn run(manager: &EnvFileManager, timestamp: Option<&str>, force: bool) -> Result<()> {
    let stamp = match timestamp {
        Some(s) => s.to_string(),
        None => manager
            .latest_backup()?
            .map(|b| b.timestamp)
            .ok_or_else(|| Error::Other("no backups to restore".to_string()))?,
    };

    if !force {
        let prompt = format!(
            "Overwrite {} with backup from {}?",
            manager.path().display(),
            output::human_timestamp(&stamp)
        );
        if !cli::confirm(&prompt) {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    manager.restore(&stamp)?;

    println!(
        "{} {} {}",
        "Restored".green().bold(),
        manager.path().display(),
        format!("from backup {}", output::human_timestamp(&stamp)).dimmed()
    );
    Ok(())
}
