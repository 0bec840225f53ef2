use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Trade fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
