use colored::Colorize;

use crate::cli;
use crate::error::Result;
use crate::store::queries;

/// Run the `delete` command: remove a profile from the store.
///
/// The live .env file is never touched, even when the deleted profile was
/// the active one.
pub fn run(name: &str, force: bool) -> Result<()> {
    let conn = cli::open_store()?;
    let profile = queries::require_profile(&conn, name)?;

    if !force && !cli::confirm(&format!("Delete profile '{}'?", profile.name)) {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    queries::delete_profile(&conn, profile.id)?;

    if profile.is_active {
        println!(
            "{} '{}' {}",
            "Deleted".green().bold(),
            profile.name,
            "(it was the active profile; the live file is unchanged)".dimmed()
        );
    } else {
        println!("{} '{}'", "Deleted".green().bold(), profile.name);
    }
    Ok(())
}
