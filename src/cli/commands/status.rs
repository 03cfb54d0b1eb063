use colored::Colorize;

use crate::cli;
use crate::envfile::EnvFileManager;
use crate::error::Result;
use crate::store::queries;

/// Run the `status` command: compare the live .env file against the
/// nominally active profile.
///
/// This is the drift detector for the accepted activation divergence: an
/// active flag whose content never reached disk (or was edited since) shows
/// up here.
pub fn run(manager: &EnvFileManager) -> Result<()> {
    let conn = cli::open_store()?;

    let Some(active) = queries::get_active(&conn)? else {
        println!("{}", "No active profile.".dimmed());
        return Ok(());
    };

    let live = manager.read()?;
    if live == active.content {
        println!(
            "{} matches active profile '{}'",
            manager.path().display(),
            active.name.green().bold()
        );
    } else {
        println!(
            "{} {} active profile '{}'",
            manager.path().display(),
            "differs from".yellow().bold(),
            active.name
        );
        println!(
            "{}",
            format!("Re-apply it with `envprof activate {}`.", active.name).dimmed()
        );
    }
    Ok(())
}
