//! Error handling for the resume matcher client

use thiserror::Error;

/// Fallback message when the server fails without saying why
pub const GENERIC_ANALYSIS_ERROR: &str = "An error occurred during analysis.";

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    /// Transport failure: the request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request error: {0}")]
    Request(String),

    /// The endpoint answered with an error; the message is shown as-is
    #[error("{0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::Request(format!("{:#}", err))
    }
}

impl From<reqwest::Error> for ResumeMatcherError {
    fn from(err: reqwest::Error) -> Self {
        ResumeMatcherError::Network(err.to_string())
    }
}

impl From<arboard::Error> for ResumeMatcherError {
    fn from(err: arboard::Error) -> Self {
        ResumeMatcherError::Clipboard(err.to_string())
    }
}
