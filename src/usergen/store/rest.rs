//! Account store backed by a WordPress site's REST API.
//!
//! Every call is a blocking request against `<site>/wp-json/wp/v2/users`,
//! authenticated with an application password over HTTP basic auth. The site
//! does the password hashing and assigns its configured default role, so
//! `WpRestStore` carries no role of its own.

use super::{same_login, AccountStore};
use crate::error::{Result, UsergenError};
use crate::model::{Account, AccountId, NewAccount};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("usergen/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RestUser {
    id: u64,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    registered_date: Option<DateTime<Utc>>,
}

impl From<RestUser> for Account {
    fn from(user: RestUser) -> Self {
        Account {
            id: AccountId(user.id),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles: user.roles,
            registered: user.registered_date.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct WpRestStore {
    agent: ureq::Agent,
    users_url: String,
    authorization: String,
}

impl WpRestStore {
    pub fn new(site_url: &str, username: &str, app_password: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            users_url: users_endpoint(site_url),
            authorization: basic_auth(username, app_password),
        }
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
    }

    fn read_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T> {
        serde_json::from_reader(response.into_reader()).map_err(UsergenError::Serialization)
    }

    /// Every user matching `filter`, following the pages until a short page or
    /// the last one announced in `X-WP-TotalPages`.
    fn list_all(&self, filter: (&str, &str)) -> Result<Vec<RestUser>> {
        let mut users = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .request("GET", &self.users_url)
                .query(filter.0, filter.1)
                .query("context", "edit")
                .query("per_page", &PER_PAGE.to_string())
                .query("page", &page.to_string())
                .call()
                .map_err(store_error_from_ureq)?;
            let total_pages = parse_total_pages(response.header("X-WP-TotalPages"));
            let batch: Vec<RestUser> = Self::read_json(response)?;
            let fetched = batch.len();
            users.extend(batch);

            let last_page = total_pages.map(|total| page >= total).unwrap_or(false);
            if fetched < PER_PAGE || last_page {
                return Ok(users);
            }
            page += 1;
        }
    }

    // `search` matches substrings, so exact hits can sit on any page
    fn search(&self, term: &str) -> Result<Vec<RestUser>> {
        self.list_all(("search", term))
    }
}

impl AccountStore for WpRestStore {
    fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self
            .search(username)?
            .iter()
            .any(|u| same_login(&u.username, username)))
    }

    fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self
            .search(email)?
            .iter()
            .any(|u| same_login(&u.email, email)))
    }

    fn create_account(&mut self, account: &NewAccount) -> Result<AccountId> {
        let response = self
            .request("POST", &self.users_url)
            .send_json(json!({
                "username": account.username,
                "email": account.email,
                "password": account.password,
            }))
            .map_err(store_error_from_ureq)?;
        let created: RestUser = Self::read_json(response)?;
        debug!(id = created.id, username = %account.username, "site created user");
        Ok(AccountId(created.id))
    }

    fn update_names(&mut self, id: AccountId, first_name: &str, last_name: &str) -> Result<()> {
        let url = format!("{}/{}", self.users_url, id.0);
        self.request("POST", &url)
            .send_json(json!({
                "first_name": first_name,
                "last_name": last_name,
            }))
            .map_err(store_error_from_ureq)?;
        Ok(())
    }

    fn accounts_with_role(&self, role: &str) -> Result<Vec<Account>> {
        let accounts: Vec<Account> = self
            .list_all(("roles", role))?
            .into_iter()
            .map(Account::from)
            .collect();
        debug!(role, count = accounts.len(), "listed users by role");
        Ok(accounts)
    }

    fn delete_account(&mut self, id: AccountId, reassign: Option<AccountId>) -> Result<()> {
        let url = format!("{}/{}", self.users_url, id.0);
        let reassign = reassign
            .map(|target| target.0.to_string())
            .unwrap_or_else(|| "false".to_string());
        self.request("DELETE", &url)
            .query("force", "true")
            .query("reassign", &reassign)
            .call()
            .map_err(store_error_from_ureq)?;
        Ok(())
    }
}

fn users_endpoint(site_url: &str) -> String {
    format!("{}/wp-json/wp/v2/users", site_url.trim().trim_end_matches('/'))
}

fn basic_auth(username: &str, app_password: &str) -> String {
    // Application passwords are displayed in groups of four; the site ignores the spaces
    let password: String = app_password.chars().filter(|c| !c.is_whitespace()).collect();
    let token = general_purpose::STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", token)
}

fn parse_total_pages(header: Option<&str>) -> Option<usize> {
    header.and_then(|value| value.trim().parse().ok())
}

fn describe_rest_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<RestError>(body) {
        Ok(err) if !err.message.is_empty() => {
            format!("HTTP {} ({}): {}", status, err.code, err.message)
        }
        _ => format!("HTTP {}", status),
    }
}

fn store_error_from_ureq(err: ureq::Error) -> UsergenError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            UsergenError::Store(describe_rest_error(status, &body))
        }
        ureq::Error::Transport(transport) => UsergenError::Store(transport.to_string()),
    }
}
