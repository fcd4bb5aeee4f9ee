//! # Spotify Integration Module
//!
//! This module talks to the Spotify Web API on behalf of the page handlers. It
//! covers the two halves of the credentialed-client pattern:
//!
//! ```text
//! Page Handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client-credentials grant)
//!     ├── Artist Albums (GET /artists/{id}/albums)
//!     └── Track Details (GET /tracks/{id})
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every call is a single attempt. Non-success statuses, timeouts and bad
//! payloads are surfaced immediately as [`CatalogError`]; nothing is retried.
//! All requests share one [`Client`] built by [`http_client`], which carries
//! the configured request timeout.

pub mod albums;
pub mod auth;
pub mod tracks;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{error::CatalogError, warning};

/// Builds the HTTP client used for every upstream request.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Joins `segments` onto the API base URL, percent-encoding each of them.
pub(crate) fn endpoint(api_url: &str, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| CatalogError::Transport(format!("invalid API url {api_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| CatalogError::Transport(format!("API url {api_url} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Issues an authenticated GET and decodes the JSON body.
///
/// Anything other than `200 OK` is reported as [`CatalogError::UpstreamFetch`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    token: &str,
) -> Result<T, CatalogError> {
    let response = client
        .get(url.clone())
        .bearer_auth(token)
        .send()
        .await
        .map_err(CatalogError::from_send)?;

    let status = response.status();
    if status != StatusCode::OK {
        warning!("GET {} answered with {}", url.path(), status);
        return Err(CatalogError::UpstreamFetch {
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(CatalogError::from_body)
}
