use super::{same_login, AccountStore};
use crate::error::{Result, UsergenError};
use crate::model::{Account, AccountId, NewAccount};
use chrono::Utc;
use std::collections::HashSet;

/// In-memory storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore {
    accounts: Vec<Account>,
    next_id: u64,
    default_role: String,
    reject_usernames: HashSet<String>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_default_role("subscriber")
    }

    pub fn with_default_role(role: impl Into<String>) -> Self {
        Self {
            accounts: Vec::new(),
            next_id: 1,
            default_role: role.into(),
            reject_usernames: HashSet::new(),
        }
    }

    /// Make `create_account` fail for this username, as a site-side constraint would.
    pub fn reject_username(&mut self, username: impl Into<String>) {
        self.reject_usernames.insert(username.into());
    }

    /// Insert an account directly, bypassing the duplicate checks.
    pub fn insert(&mut self, username: &str, email: &str, roles: &[&str]) -> AccountId {
        let id = AccountId(self.next_id);
        self.next_id += 1;
        self.accounts.push(Account {
            id,
            username: username.to_string(),
            email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            registered: Utc::now(),
        });
        id
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| same_login(&a.username, username))
    }
}

impl AccountStore for InMemoryStore {
    fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.find_by_username(username).is_some())
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.accounts.iter().any(|a| same_login(&a.email, email)))
    }

    fn create_account(&mut self, account: &NewAccount) -> Result<AccountId> {
        if self.reject_usernames.contains(&account.username) {
            return Err(UsergenError::Store(format!(
                "Cannot create user {}",
                account.username
            )));
        }
        if self.username_exists(&account.username)? {
            return Err(UsergenError::Store(format!(
                "Username {} already exists",
                account.username
            )));
        }
        let role = self.default_role.clone();
        Ok(self.insert(&account.username, &account.email, &[role.as_str()]))
    }

    fn update_names(&mut self, id: AccountId, first_name: &str, last_name: &str) -> Result<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(UsergenError::AccountNotFound(id))?;
        account.first_name = first_name.to_string();
        account.last_name = last_name.to_string();
        Ok(())
    }

    fn accounts_with_role(&self, role: &str) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.has_role(role))
            .cloned()
            .collect())
    }

    fn delete_account(&mut self, id: AccountId, _reassign: Option<AccountId>) -> Result<()> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            return Err(UsergenError::AccountNotFound(id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::UserRecord;

    /// `count` mock records named `user1`.. with matching `userN@example.test` emails.
    pub fn records(count: usize) -> Vec<UserRecord> {
        (1..=count)
            .map(|i| {
                UserRecord::new(
                    format!("user{}", i),
                    format!("First{}", i),
                    format!("Last{}", i),
                    format!("user{}@example.test", i),
                )
            })
            .collect()
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_admin(mut self, username: &str) -> Self {
            self.store.insert(
                username,
                &format!("{}@example.test", username),
                &["administrator"],
            );
            self
        }

        pub fn with_account(mut self, username: &str, email: &str, role: &str) -> Self {
            self.store.insert(username, email, &[role]);
            self
        }

        pub fn with_accounts(mut self, count: usize, role: &str) -> Self {
            for i in 0..count {
                let username = format!("{}{}", role, i + 1);
                let email = format!("{}@example.test", username);
                self.store.insert(&username, &email, &[role]);
            }
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: format!("{}@example.test", username),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn created_accounts_get_the_default_role() {
        let mut store = InMemoryStore::with_default_role("author");
        let id = store.create_account(&new_account("ada")).unwrap();

        let authors = store.accounts_with_role("author").unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].id, id);
    }

    #[test]
    fn lookups_ignore_case() {
        let store = StoreFixture::new()
            .with_account("Grace", "Grace@Example.test", "editor")
            .store;

        assert!(store.username_exists("grace").unwrap());
        assert!(store.email_exists("grace@example.TEST").unwrap());
        assert!(!store.email_exists("other@example.test").unwrap());
    }

    #[test]
    fn rejected_username_fails_creation() {
        let mut store = InMemoryStore::new();
        store.reject_username("bad");

        assert!(store.create_account(&new_account("bad")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_not_found() {
        let mut store = InMemoryStore::new();
        match store.delete_account(AccountId(42), None) {
            Err(UsergenError::AccountNotFound(id)) => assert_eq!(id, AccountId(42)),
            other => panic!("Expected AccountNotFound, got {:?}", other),
        }
    }

    #[test]
    fn update_names_sets_both_fields() {
        let mut store = InMemoryStore::new();
        let id = store.create_account(&new_account("linus")).unwrap();
        store.update_names(id, "Linus", "Torvalds").unwrap();

        let account = store.find_by_username("linus").unwrap();
        assert_eq!(account.first_name, "Linus");
        assert_eq!(account.last_name, "Torvalds");
    }
}
