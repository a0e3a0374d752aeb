use super::{same_login, AccountStore};
use crate::error::{Result, UsergenError};
use crate::model::{Account, AccountId, NewAccount};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const ACCOUNTS_FILENAME: &str = "accounts.json";

#[derive(Debug, Serialize, Deserialize)]
struct AccountsFile {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    accounts: Vec<Account>,
}

fn first_id() -> u64 {
    1
}

/// Account store kept in a single JSON file, for local fixtures.
pub struct FileStore {
    root: PathBuf,
    default_role: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            default_role: "subscriber".to_string(),
        }
    }

    pub fn with_default_role(mut self, role: &str) -> Self {
        self.default_role = role.to_string();
        self
    }

    /// Every stored account, in creation order.
    pub fn all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.load()?.accounts)
    }

    fn data_file(&self) -> PathBuf {
        self.root.join(ACCOUNTS_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(UsergenError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<AccountsFile> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(AccountsFile {
                next_id: first_id(),
                accounts: Vec::new(),
            });
        }
        let content = fs::read_to_string(data_file).map_err(UsergenError::Io)?;
        let mut data: AccountsFile =
            serde_json::from_str(&content).map_err(UsergenError::Serialization)?;

        // Hand-edited files may carry ids past next_id
        let max_id = data.accounts.iter().map(|a| a.id.0).max().unwrap_or(0);
        data.next_id = data.next_id.max(max_id + 1);
        Ok(data)
    }

    fn save(&self, data: &AccountsFile) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(data).map_err(UsergenError::Serialization)?;
        fs::write(self.data_file(), content).map_err(UsergenError::Io)?;
        Ok(())
    }
}

impl AccountStore for FileStore {
    fn username_exists(&self, username: &str) -> Result<bool> {
        let data = self.load()?;
        Ok(data
            .accounts
            .iter()
            .any(|a| same_login(&a.username, username)))
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        let data = self.load()?;
        Ok(data.accounts.iter().any(|a| same_login(&a.email, email)))
    }

    fn create_account(&mut self, account: &NewAccount) -> Result<AccountId> {
        if account.username.trim().is_empty() {
            return Err(UsergenError::Store(
                "Cannot create a user with an empty login name.".into(),
            ));
        }
        if account.email.trim().is_empty() {
            return Err(UsergenError::Store("Cannot create a user without an email.".into()));
        }

        let mut data = self.load()?;
        if data
            .accounts
            .iter()
            .any(|a| same_login(&a.username, &account.username))
        {
            return Err(UsergenError::Store(format!(
                "Sorry, that username already exists: {}",
                account.username
            )));
        }
        if data
            .accounts
            .iter()
            .any(|a| same_login(&a.email, &account.email))
        {
            return Err(UsergenError::Store(format!(
                "Sorry, that email address is already used: {}",
                account.email
            )));
        }

        let id = AccountId(data.next_id);
        data.next_id += 1;
        data.accounts.push(Account {
            id,
            username: account.username.clone(),
            email: account.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            roles: vec![self.default_role.clone()],
            registered: Utc::now(),
        });
        self.save(&data)?;
        debug!(%id, username = %account.username, "stored account");
        Ok(id)
    }

    fn update_names(&mut self, id: AccountId, first_name: &str, last_name: &str) -> Result<()> {
        let mut data = self.load()?;
        let account = data
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(UsergenError::AccountNotFound(id))?;
        account.first_name = first_name.to_string();
        account.last_name = last_name.to_string();
        self.save(&data)
    }

    fn accounts_with_role(&self, role: &str) -> Result<Vec<Account>> {
        let data = self.load()?;
        Ok(data
            .accounts
            .into_iter()
            .filter(|a| a.has_role(role))
            .collect())
    }

    fn delete_account(&mut self, id: AccountId, reassign: Option<AccountId>) -> Result<()> {
        let mut data = self.load()?;
        let before = data.accounts.len();
        data.accounts.retain(|a| a.id != id);
        if data.accounts.len() == before {
            return Err(UsergenError::AccountNotFound(id));
        }
        if let Some(target) = reassign {
            if !data.accounts.iter().any(|a| a.id == target) {
                return Err(UsergenError::AccountNotFound(target));
            }
        }
        self.save(&data)
    }
}
