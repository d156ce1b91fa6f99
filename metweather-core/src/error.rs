use thiserror::Error;

/// Failure of a single upstream resource fetch.
///
/// A fetch failure only ever affects the field it was fetching; callers keep it
/// as an `Err` next to the sibling results.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {resource} failed: {source}")]
    Transport {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} request failed with status {status}: {body}")]
    Status {
        resource: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {resource} JSON: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} response contained no data")]
    EmptyResponse { resource: &'static str },
}

impl FetchError {
    pub fn resource(&self) -> &'static str {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Decode { resource, .. }
            | FetchError::EmptyResponse { resource } => resource,
        }
    }
}

/// Failure while deriving presentation data from already fetched records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("timestamp {0} cannot be represented as a calendar date")]
    Timestamp(i64),
}
