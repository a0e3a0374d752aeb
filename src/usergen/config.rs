use crate::error::{Result, UsergenError};
use crate::model::Role;
use crate::roles::stock_roles;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Where accounts live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Local `accounts.json`; `path: null` means the user data dir
    File {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// A WordPress site reached over its REST API
    Rest {
        site_url: String,
        username: String,
        app_password: String,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File { path: None }
    }
}

/// Configuration for usergen, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsergenConfig {
    /// Mock data location (URL or path); unset means next to the binary
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub store: StoreConfig,

    /// Role given to accounts created by a file store
    #[serde(default = "default_default_role")]
    pub default_role: String,

    /// The one role purge never touches
    #[serde(default = "default_admin_role")]
    pub admin_role: String,

    #[serde(default = "stock_roles")]
    pub roles: Vec<Role>,

    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

fn default_default_role() -> String {
    "subscriber".to_string()
}

fn default_admin_role() -> String {
    "administrator".to_string()
}

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

impl Default for UsergenConfig {
    fn default() -> Self {
        Self {
            source: None,
            store: StoreConfig::default(),
            default_role: default_default_role(),
            admin_role: default_admin_role(),
            roles: stock_roles(),
            password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

impl UsergenConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(UsergenError::Io)?;
        let config: UsergenConfig =
            serde_json::from_str(&content).map_err(UsergenError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.password_length == 0 {
            return Err(UsergenError::Config(
                "password_length must be at least 1".to_string(),
            ));
        }
        if self.admin_role.trim().is_empty() {
            return Err(UsergenError::Config("admin_role cannot be empty".to_string()));
        }
        if let StoreConfig::Rest { site_url, .. } = &self.store {
            if !(site_url.starts_with("http://") || site_url.starts_with("https://")) {
                return Err(UsergenError::Config(format!(
                    "site_url must start with http:// or https://, got {:?}",
                    site_url
                )));
            }
        }
        Ok(())
    }
}
