use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the token, catalog and rendering pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("token endpoint answered with status {status}")]
    UpstreamAuth { status: u16 },

    #[error("catalog endpoint answered with status {status}")]
    UpstreamFetch { status: u16 },

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("could not decode upstream response: {0}")]
    Decode(String),

    #[error("{entity} has no {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("could not render page: {0}")]
    Template(String),
}

impl CatalogError {
    /// Maps a failed send to a timeout or transport error.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::UpstreamTimeout
        } else {
            CatalogError::Transport(err.to_string())
        }
    }

    /// Maps a failed body read or JSON decode.
    ///
    /// A timeout can also fire while the body is still streaming in.
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::UpstreamTimeout
        } else {
            CatalogError::Decode(err.to_string())
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::UpstreamAuth { .. }
            | CatalogError::UpstreamFetch { .. }
            | CatalogError::Transport(_) => StatusCode::BAD_GATEWAY,
            CatalogError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            CatalogError::Decode(_)
            | CatalogError::MissingField { .. }
            | CatalogError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}
