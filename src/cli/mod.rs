pub mod commands;
pub mod output;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::config;
use crate::envfile::EnvFileManager;
use crate::error::{Error, Result};
use crate::store;

#[derive(Parser)]
#[command(
    name = "envprof",
    version,
    about = "Store, switch between, and apply named .env profiles",
    help_template = "\
{about-with-newline}
{usage-heading} {usage}

Profiles:
  list       List profiles
  create     Create a profile from the live .env file or other content
  show       Show a profile
  update     Update a profile's name, label or content
  delete     Delete a profile
  activate   Apply a profile to the live .env file and mark it active

Live file:
  current    Print the live .env file
  write      Overwrite the live .env file directly
  status     Compare the live .env file against the active profile

Backups:
  backups    List backups of the live .env file
  restore    Restore a backup of the live .env file

Options:
{options}{after-help}"
)]
pub struct Cli {
    /// Path to the live .env file (overrides the config file)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List profiles
    List {
        /// Show timestamps
        #[arg(short, long)]
        long: bool,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Create a profile from the live .env file or other content
    Create {
        /// Profile name (unique, case-sensitive)
        name: String,
        /// Optional human-readable label
        #[arg(short, long)]
        label: Option<String>,
        /// Read content from a file instead of the live .env file
        #[arg(long, conflicts_with = "stdin")]
        from_file: Option<PathBuf>,
        /// Read content from stdin instead of the live .env file
        #[arg(long)]
        stdin: bool,
    },

    /// Show a profile
    Show {
        /// Profile name
        name: String,
        /// Show the parsed key/value mapping instead of raw content
        #[arg(short, long)]
        parsed: bool,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Update a profile's name, label or content
    Update {
        /// Profile name
        name: String,
        /// New profile name
        #[arg(long)]
        rename: Option<String>,
        /// New label
        #[arg(short, long)]
        label: Option<String>,
        /// Replace content with a file's content
        #[arg(long, conflicts_with = "stdin")]
        from_file: Option<PathBuf>,
        /// Replace content with stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Apply a profile to the live .env file and mark it active
    Activate {
        /// Profile name
        name: String,
        /// Overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Print the live .env file
    Current {
        /// Show the parsed key/value mapping instead of raw content
        #[arg(short, long)]
        parsed: bool,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Overwrite the live .env file directly
    Write {
        /// Path to read content from (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Compare the live .env file against the active profile
    Status,

    /// List backups of the live .env file
    Backups {
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        output: String,
    },

    /// Restore a backup of the live .env file
    Restore {
        /// 14-digit backup timestamp (latest backup if omitted)
        timestamp: Option<String>,
        /// Restore without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    // Disable ANSI colors when stdout is not a terminal (piped/redirected).
    if !output::is_stdout_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let manager = manager(cli.env_file.as_deref());

    match cli.command {
        Commands::List { long, output } => commands::list::run(long, &output),
        Commands::Create {
            name,
            label,
            from_file,
            stdin,
        } => commands::create::run(
            &manager,
            &name,
            label.as_deref(),
            from_file.as_deref(),
            stdin,
        ),
        Commands::Show {
            name,
            parsed,
            output,
        } => commands::show::run(&name, parsed, &output),
        Commands::Update {
            name,
            rename,
            label,
            from_file,
            stdin,
        } => commands::update::run(
            &name,
            rename.as_deref(),
            label.as_deref(),
            from_file.as_deref(),
            stdin,
        ),
        Commands::Delete { name, force } => commands::delete::run(&name, force),
        Commands::Activate { name, force } => commands::activate::run(&manager, &name, force),
        Commands::Current { parsed, output } => commands::current::run(&manager, parsed, &output),
        Commands::Write { file } => commands::write_cmd::run(&manager, file.as_deref()),
        Commands::Status => commands::status::run(&manager),
        Commands::Backups { output } => commands::backups::run(&manager, &output),
        Commands::Restore { timestamp, force } => {
            commands::restore::run(&manager, timestamp.as_deref(), force)
        }
    }
}

// ---------------------------------------------------------------------------
// Shared CLI helpers
// ---------------------------------------------------------------------------

/// Store directory path (~/.local/share/envprof/).
pub fn store_dir() -> PathBuf {
    let data_dir = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME not set");
            PathBuf::from(home).join(".local/share")
        });
    data_dir.join("envprof")
}

/// Profile database file path.
pub fn store_path() -> PathBuf {
    store_dir().join("profiles.db")
}

/// Open the profile store, creating it on first use.
pub fn open_store() -> Result<Connection> {
    std::fs::create_dir_all(store_dir())?;
    store::open(&store_path())
}

/// Build the live-file manager from config, with an optional path override
/// from the command line.
pub fn manager(env_file: Option<&std::path::Path>) -> EnvFileManager {
    let mut cfg = config::load();
    if let Some(path) = env_file {
        cfg.env_file = path.to_path_buf();
    }
    EnvFileManager::from_config(&cfg)
}

/// Validate a profile name: non-empty after trimming.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::EmptyProfileName);
    }
    Ok(())
}

/// Read content from a file, or from stdin when `file` is `None`.
pub fn read_content(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Reject empty content (presentation-layer rule; the core accepts any text).
pub fn require_content(content: String) -> Result<String> {
    if content.is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(content)
}

/// Prompt the user for yes/no confirmation on stderr.
pub fn confirm(prompt: &str) -> bool {
    use std::io::Write;
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush().ok();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).ok();
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn store_dir_uses_xdg() {
        let dir = store_dir();
        assert!(dir.ends_with("envprof"));
    }

    #[test]
    fn validate_name_rejects_empty() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("dev").is_ok());
    }

    #[test]
    fn require_content_rejects_empty() {
        assert!(require_content(String::new()).is_err());
        assert_eq!(require_content("A=1\n".to_string()).unwrap(), "A=1\n");
    }

    #[test]
    fn read_content_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.env");
        std::fs::write(&path, "A=1\n").unwrap();
        assert_eq!(read_content(Some(&path)).unwrap(), "A=1\n");
    }

    #[test]
    fn manager_override_wins_over_config() {
        let mgr = manager(Some(std::path::Path::new("/tmp/custom.env")));
        assert_eq!(mgr.path(), std::path::Path::new("/tmp/custom.env"));
    }
}
