//! # Record Source Loader
//!
//! Mock users come from one JSON document: an array of objects carrying at
//! least `username`, `first_name`, `last_name` and `email` as strings.
//!
//! The document can live behind an `http(s)://` URL or on disk (`file://` URL
//! or plain path). By default it is `MOCK_DATA.json` sitting next to the
//! installed binary.
//!
//! Loading always runs a validating decode: an empty body, something that is
//! not a JSON array, or an element missing a required field is a
//! [`UsergenError::Fetch`], never a silently empty batch.

use crate::error::{Result, UsergenError};
use crate::model::UserRecord;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_FILENAME: &str = "MOCK_DATA.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Url(String),
    File(PathBuf),
}

impl RecordSource {
    /// Interpret a user-supplied location.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            RecordSource::Url(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            RecordSource::File(PathBuf::from(path))
        } else {
            RecordSource::File(PathBuf::from(location))
        }
    }

    /// `MOCK_DATA.json` in the directory holding the running executable.
    pub fn installed() -> Result<Self> {
        let exe = std::env::current_exe().map_err(UsergenError::Io)?;
        let dir = exe.parent().ok_or_else(|| {
            UsergenError::Fetch(format!("cannot locate install dir of {}", exe.display()))
        })?;
        Ok(RecordSource::File(dir.join(DEFAULT_FILENAME)))
    }

    /// Fetch and decode the records, in source order.
    pub fn load(&self) -> Result<Vec<UserRecord>> {
        let body = self.fetch()?;
        let records = decode_records(&body)?;
        debug!(source = %self, count = records.len(), "loaded mock records");
        Ok(records)
    }

    fn fetch(&self) -> Result<String> {
        match self {
            RecordSource::Url(url) => {
                let response = ureq::get(url).call().map_err(|e| match e {
                    ureq::Error::Status(status, _) => {
                        UsergenError::Fetch(format!("{} answered HTTP {}", url, status))
                    }
                    ureq::Error::Transport(transport) => {
                        UsergenError::Fetch(format!("{}: {}", url, transport))
                    }
                })?;
                response
                    .into_string()
                    .map_err(|e| UsergenError::Fetch(format!("{}: {}", url, e)))
            }
            RecordSource::File(path) => fs::read_to_string(path)
                .map_err(|e| UsergenError::Fetch(format!("{}: {}", path.display(), e))),
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Url(url) => write!(f, "{}", url),
            RecordSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decode a mock data document into typed records.
pub fn decode_records(body: &str) -> Result<Vec<UserRecord>> {
    if body.trim().is_empty() {
        return Err(UsergenError::Fetch("mock data is empty".to_string()));
    }

    let document: Value = serde_json::from_str(body)
        .map_err(|e| UsergenError::Fetch(format!("mock data is not valid JSON: {}", e)))?;
    let Value::Array(items) = document else {
        return Err(UsergenError::Fetch(
            "mock data must be a JSON array of users".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<UserRecord>(item)
                .map_err(|e| UsergenError::Fetch(format!("record {}: {}", i, e)))
        })
        .collect()
}
