pub mod client;
pub mod config;
pub mod graphql;

pub use client::BitqueryClient;
pub use config::BitqueryConfig;

use explorer_core::ExplorerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<ClientError> for ExplorerError {
    fn from(err: ClientError) -> Self {
        ExplorerError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
