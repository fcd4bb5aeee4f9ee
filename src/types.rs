use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Seconds before the real expiry at which a token is considered stale.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(access_token: String, expires_in: u64, obtained_at: DateTime<Utc>) -> Self {
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| obtained_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            access_token,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True when the token expires within the refresh buffer.
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        now.checked_add_signed(Duration::seconds(TOKEN_EXPIRY_BUFFER_SECS))
            .is_none_or(|deadline| deadline >= self.expires_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub name: String,
    pub image_url: String,
    pub release_date: String,
    pub total_tracks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub name: String,
    pub album_cover_url: String,
    pub album_name: String,
    pub artist_name: String,
    pub release_date: String,
    pub spotify_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistAlbumsResponse {
    #[serde(default)]
    pub items: Vec<AlbumItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumItem {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub total_tracks: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub name: String,
    pub album: TrackAlbum,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}
