use colored::Colorize;

use crate::cli::{self, output};
use crate::error::Result;
use crate::store::queries;

/// Run the `list` command: print all profiles, ordered by name.
pub fn run(long: bool, output_format: &str) -> Result<()> {
    let conn = cli::open_store()?;
    let profiles = queries::list_profiles(&conn)?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!(
            "{}",
            "No profiles. Create one with `envprof create`.".dimmed()
        );
        return Ok(());
    }

    print!("{}", output::format_profile_list_text(&profiles, long));
    Ok(())
}
