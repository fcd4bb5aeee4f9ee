use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{error::CatalogError, render, warning};

/// A failed page request: which step failed and why.
#[derive(Debug)]
pub struct ApiError {
    pub context: &'static str,
    pub source: CatalogError,
}

impl ApiError {
    pub fn token(source: CatalogError) -> Self {
        Self {
            context: "Failed to obtain an access token",
            source,
        }
    }

    pub fn fetch(source: CatalogError) -> Self {
        Self {
            context: "Failed to fetch data from the Spotify API",
            source,
        }
    }

    pub fn render(source: CatalogError) -> Self {
        Self {
            context: "Failed to render the page",
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.source.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warning!("{} ({})", self, status);

        let title = status.canonical_reason().unwrap_or("Error");
        let body = render::render_error(status.as_u16(), title, &self.to_string());
        (status, Html(body)).into_response()
    }
}
