pub mod cli;
pub mod config;
pub mod envfile;
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_helpers;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
