use colored::Colorize;
use rusqlite::Connection;

use crate::cli;
use crate::envfile::EnvFileManager;
use crate::error::Result;
use crate::store::queries;
use crate::types::Profile;

/// Run the `activate` command: make a profile's content the live .env file
/// and mark it as the active one.
pub fn run(manager: &EnvFileManager, name: &str, force: bool) -> Result<()> {
    let mut conn = cli::open_store()?;
    let profile = queries::require_profile(&conn, name)?;

    let live = manager.read()?;
    if !force && !live.is_empty() && live != profile.content {
        let prompt = format!(
            "Overwrite {} with profile '{}'?",
            manager.path().display(),
            profile.name
        );
        if !cli::confirm(&prompt) {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    let profile = activate_profile(&mut conn, manager, name)?;
    println!(
        "{} '{}' {} {}",
        "Activated".green().bold(),
        profile.name,
        "and applied to".green().bold(),
        manager.path().display()
    );
    Ok(())
}

/// The activation protocol: flip the active flag in the store (atomic, so
/// exactly one profile is active), then write the profile's content to the
/// live file.
///
/// When the write fails after the flag flip, the store names an active
/// profile whose content is not on disk. This divergence is deliberate and
/// not rolled back; `status` reports it.
pub fn activate_profile(
    conn: &mut Connection,
    manager: &EnvFileManager,
    name: &str,
) -> Result<Profile> {
    let profile = queries::require_profile(conn, name)?;
    queries::set_active(conn, profile.id)?;
    manager.write(&profile.content)?;
    queries::require_profile(conn, name)
}
