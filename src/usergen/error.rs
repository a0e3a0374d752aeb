use crate::model::AccountId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsergenError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error(
        "You must specify an amount less than {total} or generate your custom json data."
    )]
    InsufficientData { total: usize },

    #[error("Could not load mock data: {0}")]
    Fetch(String),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UsergenError>;
