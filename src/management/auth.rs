use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{error::CatalogError, info, spotify, types::AccessToken};

/// Owns the client credentials and, when caching is enabled, the current
/// bearer token.
///
/// With caching disabled every call acquires a fresh token, one per page
/// request. With caching enabled the token is reused until it comes within
/// [`crate::types::TOKEN_EXPIRY_BUFFER_SECS`] of its expiry. The lock is held
/// across a refresh so concurrent requests wait for a single acquisition.
pub struct TokenManager {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache: Option<Mutex<Option<AccessToken>>>,
}

impl TokenManager {
    pub fn new(
        client: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        cache_enabled: bool,
    ) -> Self {
        TokenManager {
            client,
            token_url,
            client_id,
            client_secret,
            cache: cache_enabled.then(|| Mutex::new(None)),
        }
    }

    pub async fn get_valid_token(&self) -> Result<String, CatalogError> {
        let Some(cache) = &self.cache else {
            return self.acquire().await.map(|t| t.access_token);
        };

        let mut slot = cache.lock().await;
        if let Some(token) = slot.as_ref() {
            if !token.needs_refresh_at(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        // drop the stale token first so a failed refresh never leaves it usable
        *slot = None;
        let token = self.acquire().await?;
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }

    /// Forgets the cached token, if any.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            *cache.lock().await = None;
        }
    }

    pub async fn current_token(&self) -> Option<AccessToken> {
        match &self.cache {
            Some(cache) => cache.lock().await.clone(),
            None => None,
        }
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    async fn acquire(&self) -> Result<AccessToken, CatalogError> {
        let token = spotify::auth::acquire_token(
            &self.client,
            &self.token_url,
            &self.client_id,
            &self.client_secret,
        )
        .await?;

        info!("Obtained access token valid until {}", token.expires_at);
        Ok(token)
    }
}
