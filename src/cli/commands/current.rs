use crate::cli::output;
use crate::envfile::EnvFileManager;
use crate::error::Result;
use crate::parser;

/// Run the `current` command: print the live .env file.
///
/// A missing live file prints as empty, matching the manager's read
/// semantics.
pub fn run(manager: &EnvFileManager, parsed: bool, output_format: &str) -> Result<()> {
    let content = manager.read()?;

    if parsed {
        let env = parser::parse(&content);
        if output_format == "json" {
            println!("{}", serde_json::to_string_pretty(&env)?);
        } else {
            print!("{}", output::format_parsed_text(&env));
        }
        return Ok(());
    }

    if output_format == "json" {
        println!("{}", serde_json::json!({ "content": content }));
    } else {
        print!("{content}");
    }
    Ok(())
}
