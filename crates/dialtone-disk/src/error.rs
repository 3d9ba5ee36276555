use crate::smoke::SmokeStepKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("disk url must use https: {0}")]
    InsecureUrl(String),
    #[error("missing disk token: environment variable {0} is not set")]
    MissingToken(String),
    #[error("disk token in environment variable {0} is not valid unicode")]
    InvalidToken(String),
    #[error("resource already exists: {0}")]
    AlreadyExists(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("unexpected status {status} for {method} {path}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },
    #[error("smoke step {step} failed: expected {expected}, observed {observed}")]
    SmokeFailed {
        step: SmokeStepKind,
        expected: &'static str,
        observed: String,
    },
}

pub type Result<T> = std::result::Result<T, DiskError>;
