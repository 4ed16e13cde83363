use reqwest::StatusCode;
use thiserror::Error;

/// Why a data source produced no sequence. Record-level problems never end up here.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url} returned a body that is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {found} where an array was expected")]
    NotASequence { url: String, found: &'static str },
}
