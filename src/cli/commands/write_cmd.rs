use std::path::Path;

use colored::Colorize;

use crate::cli;
use crate::envfile::EnvFileManager;
use crate::error::Result;

/// Run the `write` command: overwrite the live .env file with content from
/// a file or stdin, without creating a profile.
pub fn run(manager: &EnvFileManager, file: Option<&Path>) -> Result<()> {
    let content = cli::require_content(cli::read_content(file)?)?;

    manager.write(&content)?;

    println!(
        "{} {}",
        "Wrote".green().bold(),
        manager.path().display()
    );
    Ok(())
}
