use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness report: crate version, the configured catalog targets and
/// whether the token cache is on. Never calls Spotify.
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "artist_id": state.settings.artist_id,
        "track_id": state.settings.track_id,
        "token_cache": state.tokens.is_caching()
    }))
}
