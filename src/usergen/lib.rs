//! # Usergen Architecture
//!
//! Usergen fills a staging site with mock user accounts, and empties it again.
//! `generate <count>` takes the first `count` records of a JSON mock data file
//! and creates an account for each one not already registered; `purge` deletes
//! every account that is not an administrator.
//!
//! The binary is thin. Everything that decides *what* happens lives in this
//! library and never touches the terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, loads config, sets up logging          │
//! │  - Draws progress bars, asks for confirmation               │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Validates the raw count, resolves the record source      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - generate: duplicate-guarded batch provisioning           │
//! │  - purge: role walk + deletion loop                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Platform Layer (store/, roles.rs, source.rs)               │
//! │  - AccountStore: WpRestStore, FileStore, InMemoryStore      │
//! │  - RoleRegistry: ConfiguredRoles                            │
//! │  - RecordSource: http(s) URL or local file                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Capabilities Are Injected
//!
//! The account store, the role table, the progress display and the
//! confirmation prompt are all passed in. Nothing below the CLI reaches for a
//! global, so the same `generate`/`purge` code runs against a live site and
//! against `InMemoryStore` in tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: `generate` and `purge`
//! - [`store`]: Account store trait and backends
//! - [`roles`]: Role registry
//! - [`source`]: Mock data loading and validation
//! - [`model`]: `UserRecord`, `Account`, `AccountId`, `Role`
//! - [`progress`]: Progress reporting hook
//! - [`config`]: `config.json` handling
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod progress;
pub mod roles;
pub mod source;
pub mod store;

#[cfg(test)]
mod http_stub;
