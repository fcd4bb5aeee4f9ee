use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    error::CatalogError,
    types::{AccessToken, TokenResponse},
    warning,
};

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Exchanges the application's client ID and secret for a bearer token.
///
/// Implements the OAuth 2.0 client-credentials grant: a form-encoded POST with
/// `grant_type=client_credentials`, authenticated with HTTP Basic auth built
/// from the credential pair. No user is involved and no refresh token is
/// returned.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (carries the request timeout)
/// * `token_url` - Token endpoint, e.g. `https://accounts.spotify.com/api/token`
/// * `client_id` - Application client ID
/// * `client_secret` - Application client secret
///
/// # Returns
///
/// The bearer token together with its absolute expiry, computed as the time
/// of the response plus `expires_in` seconds.
///
/// # Errors
///
/// - [`CatalogError::UpstreamAuth`] for any non-success status
/// - [`CatalogError::Decode`] for an undecodable body or an empty token
/// - [`CatalogError::UpstreamTimeout`] / [`CatalogError::Transport`] when the
///   request could not complete
///
/// Nothing is cached here; see [`crate::management::TokenManager`] for that.
pub async fn acquire_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken, CatalogError> {
    let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));

    let response = client
        .post(token_url)
        .header(AUTHORIZATION, format!("Basic {credentials}"))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(CatalogError::from_send)?;

    let status = response.status();
    if !status.is_success() {
        warning!("Token endpoint answered with {}", status);
        return Err(CatalogError::UpstreamAuth {
            status: status.as_u16(),
        });
    }

    let body = response
        .json::<TokenResponse>()
        .await
        .map_err(CatalogError::from_body)?;

    if body.access_token.is_empty() {
        return Err(CatalogError::Decode(
            "token response has an empty access_token".to_string(),
        ));
    }

    Ok(AccessToken::new(
        body.access_token,
        body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        Utc::now(),
    ))
}
