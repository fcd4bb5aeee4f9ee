use reqwest::Client;

use crate::{
    error::CatalogError,
    spotify::{endpoint, get_json},
    types::{AlbumSummary, ArtistAlbumsResponse},
    warning,
};

/// Retrieves the albums of an artist from the Spotify Web API.
///
/// Sends `GET {api_url}/artists/{artist_id}/albums` with the bearer token and
/// projects each returned item into an [`AlbumSummary`].
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `artist_id` - Spotify ID of the artist
/// * `token` - Valid bearer token
///
/// # Returns
///
/// The summaries in the order the API returned them. Items without any cover
/// image are skipped (and logged), so the result may be shorter than the
/// upstream list. An empty upstream list yields an empty vector.
///
/// # Errors
///
/// - [`CatalogError::UpstreamFetch`] for any status other than 200
/// - [`CatalogError::Decode`] for a malformed body
/// - [`CatalogError::UpstreamTimeout`] / [`CatalogError::Transport`]
pub async fn fetch_albums(
    client: &Client,
    api_url: &str,
    artist_id: &str,
    token: &str,
) -> Result<Vec<AlbumSummary>, CatalogError> {
    let url = endpoint(api_url, &["artists", artist_id, "albums"])?;
    let response = get_json::<ArtistAlbumsResponse>(client, url, token).await?;

    Ok(summarize_albums(response))
}

/// Projects the upstream envelope onto album summaries, skipping items that
/// have no image.
pub fn summarize_albums(response: ArtistAlbumsResponse) -> Vec<AlbumSummary> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let Some(image) = item.images.into_iter().next() else {
                let err = CatalogError::MissingField {
                    entity: "album",
                    field: "image",
                };
                warning!("Skipping album {:?}: {}", item.name, err);
                return None;
            };

            Some(AlbumSummary {
                name: item.name,
                image_url: image.url,
                release_date: item.release_date,
                total_tracks: item.total_tracks,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode(value: serde_json::Value) -> ArtistAlbumsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_first_image_and_order() {
        let albums = summarize_albums(decode(json!({
            "items": [
                {
                    "name": "First",
                    "images": [{"url": "https://i/1-big"}, {"url": "https://i/1-small"}],
                    "release_date": "2020-01-01",
                    "total_tracks": 12
                },
                {
                    "name": "Second",
                    "images": [{"url": "https://i/2"}],
                    "release_date": "2021",
                    "total_tracks": 3
                }
            ]
        })));

        assert_eq!(
            albums,
            vec![
                AlbumSummary {
                    name: "First".to_string(),
                    image_url: "https://i/1-big".to_string(),
                    release_date: "2020-01-01".to_string(),
                    total_tracks: 12,
                },
                AlbumSummary {
                    name: "Second".to_string(),
                    image_url: "https://i/2".to_string(),
                    release_date: "2021".to_string(),
                    total_tracks: 3,
                },
            ]
        );
    }

    #[test]
    fn skips_items_without_images() {
        let albums = summarize_albums(decode(json!({
            "items": [
                {"name": "Bare", "images": [], "release_date": "2019", "total_tracks": 1},
                {"name": "Covered", "images": [{"url": "https://i/c"}], "release_date": "2019", "total_tracks": 9},
                {"name": "NoKey", "release_date": "2018", "total_tracks": 2}
            ]
        })));

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].name, "Covered");
    }

    #[test]
    fn missing_items_key_is_an_empty_list() {
        assert!(summarize_albums(decode(json!({}))).is_empty());
    }
}
