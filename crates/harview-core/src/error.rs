use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input is neither text nor a readable stream: {0}")]
    InvalidInputKind(String),

    #[error("Failed to read HAR input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse HAR input as JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Invalid HAR structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
