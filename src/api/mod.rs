//! # API Module
//!
//! HTTP handlers for the page server, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, static landing page
//! - [`album_list`] - `GET /album/jul`, albums of the configured artist
//! - [`track`] - `GET /track/sdm`, the configured track
//! - [`health`] - `GET /health`, status and version as JSON
//! - [`not_found`] - fallback for every other path
//!
//! Catalog handlers run strictly in sequence: obtain a token, fetch from the
//! catalog, render. The first failing step ends the request with an
//! [`ApiError`], whose status depends on the kind of failure (502 for
//! upstream errors, 504 for timeouts, 500 for bad data or rendering).

mod error;
mod health;
mod pages;

pub use error::ApiError;
pub use health::health;
pub use pages::{album_list, home, log_request, not_found, track};
