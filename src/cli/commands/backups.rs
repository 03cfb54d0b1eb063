use colored::Colorize;

use crate::cli::output;
use crate::envfile::EnvFileManager;
use crate::error::Result;

/// Run the `backups` command: list the live file's backup siblings.
pub fn run(manager: &EnvFileManager, output_format: &str) -> Result<()> {
    let backups = manager.list_backups()?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&backups)?);
        return Ok(());
    }

    if backups.is_empty() {
        println!(
            "{}",
            format!("No backups of {}.", manager.path().display()).dimmed()
        );
        return Ok(());
    }

    print!("{}", output::format_backup_list_text(&backups));
    Ok(())
}
