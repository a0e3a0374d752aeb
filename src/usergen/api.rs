//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients.
//!
//! It normalizes raw user input (the count argument), resolves the record
//! source, and dispatches to `commands::generate` or `commands::purge`. It does
//! no printing and never decides exit codes; progress and confirmation are
//! capabilities the caller hands in.
//!
//! ## Generic Over the Platform
//!
//! `UsergenApi<S: AccountStore, R: RoleRegistry>`:
//! - Production: `UsergenApi<dyn AccountStore, ConfiguredRoles>`
//! - Testing: `UsergenApi<InMemoryStore, ConfiguredRoles>`
//!
//! ## Ordering Guarantee
//!
//! `generate` validates the count before the source is fetched, and checks the
//! count against the fetched records before the store is touched.

use crate::commands;
use crate::config::UsergenConfig;
use crate::error::Result;
use crate::progress::Progress;
use crate::roles::RoleRegistry;
use crate::source::RecordSource;
use crate::store::AccountStore;

pub struct UsergenApi<S: AccountStore + ?Sized, R: RoleRegistry> {
    roles: R,
    admin_role: String,
    password_length: usize,
    store: Box<S>,
}

impl<S: AccountStore + ?Sized, R: RoleRegistry> UsergenApi<S, R> {
    pub fn new(store: Box<S>, roles: R, config: &UsergenConfig) -> Self {
        Self {
            roles,
            admin_role: config.admin_role.clone(),
            password_length: config.password_length,
            store,
        }
    }

    /// Provision accounts for the first `raw_count` records of `source`.
    pub fn generate(
        &mut self,
        raw_count: &str,
        source: &RecordSource,
        progress: &mut dyn Progress,
    ) -> Result<commands::CmdResult> {
        let count = commands::generate::parse_count(raw_count)?;
        let records = source.load()?;
        commands::generate::run(
            self.store.as_mut(),
            &records,
            count,
            self.password_length,
            progress,
        )
    }

    /// Delete every non-administrator account.
    pub fn purge(
        &mut self,
        skip_confirm: bool,
        confirm: &mut dyn FnMut(&str) -> Result<bool>,
        progress: &mut dyn Progress,
    ) -> Result<commands::CmdResult> {
        commands::purge::run(
            self.store.as_mut(),
            &self.roles,
            &self.admin_role,
            skip_confirm,
            confirm,
            progress,
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use commands::{CmdMessage, CmdResult, GenerateReport, MessageLevel, PurgeReport};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UsergenError;
    use crate::progress::NoProgress;
    use crate::roles::ConfiguredRoles;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::io::Write;
    use std::path::PathBuf;

    const FIVE_USERS: &str = r#"[
        {"username":"u1","first_name":"A","last_name":"A","email":"u1@example.test"},
        {"username":"u2","first_name":"B","last_name":"B","email":"u2@example.test"},
        {"username":"u3","first_name":"C","last_name":"C","email":"u3@example.test"},
        {"username":"u4","first_name":"D","last_name":"D","email":"u4@example.test"},
        {"username":"u5","first_name":"E","last_name":"E","email":"u5@example.test"}
    ]"#;

    fn source_file(body: &str) -> (tempfile::NamedTempFile, RecordSource) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        let source = RecordSource::File(file.path().to_path_buf());
        (file, source)
    }

    fn api(store: InMemoryStore) -> UsergenApi<InMemoryStore, ConfiguredRoles> {
        UsergenApi::new(
            Box::new(store),
            ConfiguredRoles::default(),
            &UsergenConfig::default(),
        )
    }

    #[test]
    fn generate_dispatches_with_parsed_count() {
        let (_file, source) = source_file(FIVE_USERS);
        let mut api = api(InMemoryStore::new());

        let result = api.generate("3", &source, &mut NoProgress).unwrap();

        assert_eq!(result.generated.unwrap().created, 3);
        assert_eq!(api.store().len(), 3);
    }

    #[test]
    fn invalid_count_is_reported_before_fetching() {
        let missing = RecordSource::File(PathBuf::from("/no/such/MOCK_DATA.json"));
        let mut api = api(InMemoryStore::new());

        let err = api.generate("ten", &missing, &mut NoProgress).unwrap_err();
        assert!(matches!(err, UsergenError::InvalidArgument(_)));
    }

    #[test]
    fn fetch_errors_surface_cleanly() {
        let (_file, source) = source_file("{ not json");
        let mut api = api(InMemoryStore::new());

        let err = api.generate("1", &source, &mut NoProgress).unwrap_err();
        assert!(matches!(err, UsergenError::Fetch(_)));
        assert!(api.store().is_empty());
    }

    #[test]
    fn too_many_requested() {
        let (_file, source) = source_file(FIVE_USERS);
        let mut api = api(InMemoryStore::new());

        let err = api.generate("6", &source, &mut NoProgress).unwrap_err();
        assert!(matches!(err, UsergenError::InsufficientData { total: 5 }));
        assert!(api.store().is_empty());
    }

    #[test]
    fn purge_uses_configured_admin_role() {
        let store = StoreFixture::new()
            .with_admin("root")
            .with_accounts(2, "editor")
            .store;
        let mut api = api(store);

        let result = api
            .purge(true, &mut |_: &str| -> Result<bool> { Ok(true) }, &mut NoProgress)
            .unwrap();

        assert_eq!(result.purged.unwrap().deleted, 2);
        assert_eq!(api.store().len(), 1);
    }
}
