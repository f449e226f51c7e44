// crates/wings-core/src/error.rs

use thiserror::Error;
use wings_parser::ParserError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Sheet parsing failed: {0}")]
    Parser(#[from] ParserError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Fetching {sheet} failed: {message}")]
    Fetch {
        sheet: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
