use std::path::Path;

use colored::Colorize;

use crate::cli;
use crate::envfile::EnvFileManager;
use crate::error::Result;
use crate::store::queries;

/// Run the `create` command: store a new profile.
///
/// Content comes from the live .env file unless `--from-file` or `--stdin`
/// is given.
pub fn run(
    manager: &EnvFileManager,
    name: &str,
    label: Option<&str>,
    from_file: Option<&Path>,
    stdin: bool,
) -> Result<()> {
    cli::validate_name(name)?;

    let content = if let Some(path) = from_file {
        std::fs::read_to_string(path)?
    } else if stdin {
        cli::read_content(None)?
    } else {
        manager.read()?
    };
    let content = cli::require_content(content)?;

    let conn = cli::open_store()?;
    let profile = queries::insert_profile(&conn, name, label, &content)?;

    println!(
        "{} '{}' ({} variables)",
        "Created profile".green().bold(),
        profile.name,
        crate::parser::parse(&profile.content).len()
    );
    Ok(())
}
