use std::path::Path;

use colored::Colorize;

use crate::cli;
use crate::error::{Error, Result};
use crate::store::queries;

/// Run the `update` command: change a profile's name, label and/or content.
pub fn run(
    name: &str,
    rename: Option<&str>,
    label: Option<&str>,
    from_file: Option<&Path>,
    stdin: bool,
) -> Result<()> {
    let conn = cli::open_store()?;
    let profile = queries::require_profile(&conn, name)?;

    if let Some(new_name) = rename {
        cli::validate_name(new_name)?;
    }

    let content = if let Some(path) = from_file {
        Some(cli::require_content(std::fs::read_to_string(path)?)?)
    } else if stdin {
        Some(cli::require_content(cli::read_content(None)?)?)
    } else {
        None
    };

    if rename.is_none() && label.is_none() && content.is_none() {
        return Err(Error::Other(
            "nothing to update: pass --rename, --label, --from-file or --stdin".to_string(),
        ));
    }

    queries::update_profile(&conn, profile.id, rename, label, content.as_deref())?;

    println!(
        "{} '{}'",
        "Updated profile".green().bold(),
        rename.unwrap_or(name)
    );
    Ok(())
}
