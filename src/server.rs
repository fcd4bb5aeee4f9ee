use std::sync::Arc;

use axum::{Extension, Router, middleware, routing::get};
use reqwest::Client;

use crate::{Res, api, config::Settings, info, management::TokenManager, spotify, success};

/// Request-independent state shared by every handler.
pub struct AppState {
    pub settings: Settings,
    pub client: Client,
    pub tokens: TokenManager,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let client = spotify::http_client(settings.timeout)?;
        let tokens = TokenManager::new(
            client.clone(),
            settings.token_url.clone(),
            settings.client_id.clone(),
            settings.client_secret.clone(),
            settings.token_cache,
        );

        Ok(Self {
            settings,
            client,
            tokens,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/album/jul", get(api::album_list))
        .route("/track/sdm", get(api::track))
        .route("/health", get(api::health))
        .fallback(api::not_found)
        .layer(Extension(state))
        .layer(middleware::from_fn(api::log_request))
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = settings.server_addr;
    let state = Arc::new(AppState::new(settings)?);

    info!(
        "Serving artist {} and track {} (token cache {})",
        state.settings.artist_id,
        state.settings.track_id,
        if state.tokens.is_caching() { "on" } else { "off" }
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
