use thiserror::Error;

/// Failures while fetching or parsing a language edition.
#[derive(Debug, Error)]
pub enum EditionError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed edition document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record {index} has invalid position {chapter}:{verse} (chapter and verse start at 1)")]
    InvalidRecord { index: usize, chapter: u32, verse: u32 },

    #[error("edition contains no verses")]
    EmptyEdition,
}
