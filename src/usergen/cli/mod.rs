//! # CLI Behavior
//!
//! This is one UI client for usergen. It is the only place that knows about
//! terminal I/O, exit codes and output formatting.
//!
//! ## Commands
//!
//! - `usergen generate <count>`: provision the first `count` mock users.
//!   The count is validated before the mock data is fetched.
//! - `usergen purge [--yes]`: delete every non-administrator account after a
//!   `[y/n]` prompt on stdin.
//!
//! ## Context
//!
//! `--config DIR` points at the directory holding `config.json` (defaults to
//! the platform config dir). `--store DIR` forces a local file store,
//! overriding whatever the config says. `--source` overrides the mock data
//! location.
//!
//! Logs go to stderr through `tracing`; `RUST_LOG` wins over `--verbose`.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `progress`: terminal progress bar
//! - `render`: message output
//! - `setup`: argument parsing via clap

mod commands;
mod progress;
mod render;
pub mod setup;

pub use commands::run;
