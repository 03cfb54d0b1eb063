use crate::cli::{self, output};
use crate::error::Result;
use crate::parser;
use crate::store::queries;

/// Run the `show` command: print a profile's content, raw or parsed.
pub fn run(name: &str, parsed: bool, output_format: &str) -> Result<()> {
    let conn = cli::open_store()?;
    let profile = queries::require_profile(&conn, name)?;

    if parsed {
        let env = parser::parse(&profile.content);
        if output_format == "json" {
            println!("{}", serde_json::to_string_pretty(&env)?);
        } else {
            print!("{}", output::format_parsed_text(&env));
        }
        return Ok(());
    }

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print!("{}", profile.content);
    }
    Ok(())
}
