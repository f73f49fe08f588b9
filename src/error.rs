use thiserror::Error;

/// Main error type for TextGraph operations
#[derive(Error, Debug)]
pub enum TextGraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, TextGraphError>;
