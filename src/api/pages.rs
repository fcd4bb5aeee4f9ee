use std::sync::Arc;

use axum::{
    Extension,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

use crate::{
    api::ApiError,
    error::CatalogError,
    info, render,
    server::AppState,
    spotify::{albums, tracks},
};

pub async fn home() -> Result<Html<String>, ApiError> {
    render::render_home().map(Html).map_err(ApiError::render)
}

/// Album list of the configured artist.
pub async fn album_list(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let token = state.tokens.get_valid_token().await.map_err(ApiError::token)?;

    let albums = match albums::fetch_albums(
        &state.client,
        &state.settings.api_url,
        &state.settings.artist_id,
        &token,
    )
    .await
    {
        Ok(albums) => albums,
        Err(e) => return Err(fetch_failed(&state, e).await),
    };

    render::render_albums(&albums)
        .map(Html)
        .map_err(ApiError::render)
}

/// Detail page of the configured track.
pub async fn track(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let token = state.tokens.get_valid_token().await.map_err(ApiError::token)?;

    let track = match tracks::fetch_track(
        &state.client,
        &state.settings.api_url,
        &state.settings.track_id,
        &token,
    )
    .await
    {
        Ok(track) => track,
        Err(e) => return Err(fetch_failed(&state, e).await),
    };

    render::render_track(&track)
        .map(Html)
        .map_err(ApiError::render)
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(render::render_error(404, "Not Found", "No page lives here.")),
    )
}

pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!("{} {} -> {}", method, path, response.status());
    response
}

// A rejected bearer token will not get better by reuse.
async fn fetch_failed(state: &AppState, err: CatalogError) -> ApiError {
    if err == (CatalogError::UpstreamFetch { status: 401 }) {
        state.tokens.invalidate().await;
    }
    ApiError::fetch(err)
}
