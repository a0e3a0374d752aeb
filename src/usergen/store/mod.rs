//! # Storage Layer
//!
//! This module defines the account-store abstraction for usergen. The
//! [`AccountStore`] trait is the only way the command layer touches user
//! accounts, so the same provisioning and purge logic runs against a real
//! site, a local fixture file, or an in-memory store in tests.
//!
//! ## Implementations
//!
//! - [`rest::WpRestStore`]: a WordPress site, through `/wp-json/wp/v2/users`
//!   - HTTP basic auth with an application password
//!   - Password hashing and role assignment happen on the site
//!
//! - [`fs::FileStore`]: local fixture storage
//!   - All accounts in a single `accounts.json`
//!   - Passwords are accepted but never written to disk
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Can simulate create failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <store dir>/
//! └── accounts.json       # { "next_id": 4, "accounts": [ ... ] }
//! ```
//!
//! ## Matching rules
//!
//! Username and email lookups are case-insensitive in every backend, which is
//! how the platform's own collation behaves.

use crate::error::Result;
use crate::model::{Account, AccountId, NewAccount};

pub mod fs;
pub mod memory;
pub mod rest;

/// Abstract interface over the host platform's account store.
pub trait AccountStore {
    /// True when an account with this login name exists
    fn username_exists(&self, username: &str) -> Result<bool>;

    /// True when an account with this email exists
    fn email_exists(&self, email: &str) -> Result<bool>;

    /// Create an account holding the store's default role
    fn create_account(&mut self, account: &NewAccount) -> Result<AccountId>;

    /// Set first and last name on an existing account
    fn update_names(&mut self, id: AccountId, first_name: &str, last_name: &str) -> Result<()>;

    /// Every account holding `role`, with no page limit
    fn accounts_with_role(&self, role: &str) -> Result<Vec<Account>>;

    /// Delete an account, handing its content to `reassign` (or deleting it when `None`)
    fn delete_account(&mut self, id: AccountId, reassign: Option<AccountId>) -> Result<()>;
}

pub(crate) fn same_login(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
