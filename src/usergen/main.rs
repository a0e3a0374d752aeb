//! # Usergen CLI
//!
//! The binary only invokes `cli::run()` and turns an error into exit status 1.
//! Parsing, configuration, logging setup, progress bars and prompts all live in
//! `src/usergen/cli/`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
