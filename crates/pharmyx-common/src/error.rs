use thiserror::Error;

/// Failures of the shared plumbing. Source-specific retrieval stages keep
/// their own outcome enums; this covers the concerns every crate shares.
#[derive(Debug, Error)]
pub enum PharmyxError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF extraction error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, PharmyxError>;
