use reqwest::Client;

use crate::{
    error::CatalogError,
    spotify::{endpoint, get_json},
    types::{TrackResponse, TrackSummary},
};

/// Key of the canonical link in a track's `external_urls` map.
pub const SPOTIFY_LINK_KEY: &str = "spotify";

/// Retrieves a single track from the Spotify Web API.
///
/// Sends `GET {api_url}/tracks/{track_id}` with the bearer token and projects
/// the response into a [`TrackSummary`]: track name, cover of the containing
/// album, album name, first listed artist, the album's release date and the
/// `spotify` external link.
///
/// # Errors
///
/// - [`CatalogError::UpstreamFetch`] for any status other than 200
/// - [`CatalogError::Decode`] for a malformed body
/// - [`CatalogError::MissingField`] when the album has no image or the track
///   lists no artist
/// - [`CatalogError::UpstreamTimeout`] / [`CatalogError::Transport`]
pub async fn fetch_track(
    client: &Client,
    api_url: &str,
    track_id: &str,
    token: &str,
) -> Result<TrackSummary, CatalogError> {
    let url = endpoint(api_url, &["tracks", track_id])?;
    let response = get_json::<TrackResponse>(client, url, token).await?;

    summarize_track(response)
}

pub fn summarize_track(response: TrackResponse) -> Result<TrackSummary, CatalogError> {
    let TrackResponse {
        name,
        album,
        artists,
        mut external_urls,
    } = response;

    let cover = album
        .images
        .into_iter()
        .next()
        .ok_or(CatalogError::MissingField {
            entity: "album",
            field: "image",
        })?;
    let artist = artists
        .into_iter()
        .next()
        .ok_or(CatalogError::MissingField {
            entity: "track",
            field: "artist",
        })?;

    Ok(TrackSummary {
        name,
        album_cover_url: cover.url,
        album_name: album.name,
        artist_name: artist.name,
        release_date: album.release_date,
        spotify_link: external_urls.remove(SPOTIFY_LINK_KEY).unwrap_or_default(),
    })
}
