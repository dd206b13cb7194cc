use std::path::PathBuf;
use thiserror::Error;

/// The filename does not follow the `Artist - Title` convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("could not parse artist and title from filename")]
    NoIdentity,
}

/// Why a candidate release could not be turned into a classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("release {0} has no year")]
    MissingYear(u64),
    #[error("release {0} has no artist credit")]
    MissingArtist(u64),
    #[error("release {0} has no label credit")]
    MissingLabel(u64),
    #[error("release {0} has no format")]
    MissingFormat(u64),
}

/// The catalog answered, but nothing in the answer is usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("catalog returned no results")]
    NoResults,
    #[error("no acceptable release among {count} result(s)")]
    NoAcceptableCandidate { count: usize },
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("unsupported file type: {0:?}")]
    UnsupportedFormat(String),
    #[error("tag field missing: {0}")]
    MissingField(&'static str),
    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),
    #[error("MP4 tag error: {0}")]
    Mp4(#[from] lofty::error::LoftyError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API rate limit exceeded")]
    RateLimit,
    #[error("invalid catalog token")]
    InvalidToken,
    #[error("not found")]
    NotFound,
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("catalog API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog client not configured: {0}")]
    NotConfigured(&'static str),
}

impl CatalogError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Request(e) => e.is_timeout() || e.is_connect(),
            CatalogError::RateLimit | CatalogError::Timeout(_) => true,
            CatalogError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to move {from:?} to {to:?}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to check {path:?}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("source has no file name: {0:?}")]
    NoFileName(PathBuf),
}

#[derive(Debug, Error)]
pub enum SortError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

pub type Result<T, E = SortError> = std::result::Result<T, E>;
