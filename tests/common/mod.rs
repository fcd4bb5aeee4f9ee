#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tunepage::config::Settings;

/// Behaviour of the fake Spotify endpoints.
#[derive(Clone)]
pub struct Upstream {
    pub token_status: StatusCode,
    pub token_body: Option<String>,
    pub expires_in: u64,
    pub catalog_status: StatusCode,
    pub albums: String,
    pub track: String,
    pub delay: Duration,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: None,
            expires_in: 3600,
            catalog_status: StatusCode::OK,
            albums: json!({ "items": [] }).to_string(),
            track: track_json("Song", "X", "Y", "https://open.spotify.com/track/abc"),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

struct Shared {
    upstream: Upstream,
    token_hits: AtomicUsize,
    catalog_hits: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

impl Shared {
    fn record(&self, path: String, headers: &HeaderMap, body: String) {
        let value_of = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization: value_of(header::AUTHORIZATION),
            content_type: value_of(header::CONTENT_TYPE),
            body,
        });
    }
}

pub struct Running {
    pub base: String,
    shared: Arc<Shared>,
}

impl Running {
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.base)
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base)
    }

    pub fn token_hits(&self) -> usize {
        self.shared.token_hits.load(Ordering::SeqCst)
    }

    pub fn catalog_hits(&self) -> usize {
        self.shared.catalog_hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Settings pointing at this upstream, plus any overrides.
    pub fn settings(&self, overrides: &[(&str, &str)]) -> Settings {
        let mut map: HashMap<String, String> = HashMap::from([
            ("SPOTIFY_API_AUTH_CLIENT_ID".to_string(), "client-id".to_string()),
            ("SPOTIFY_API_AUTH_CLIENT_SECRET".to_string(), "client-secret".to_string()),
            ("SPOTIFY_API_URL".to_string(), self.api_url()),
            ("SPOTIFY_API_TOKEN_URL".to_string(), self.token_url()),
            ("SPOTIFY_ARTIST_ID".to_string(), "artist-1".to_string()),
            ("SPOTIFY_TRACK_ID".to_string(), "track-1".to_string()),
            ("SERVER_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ]);
        for (k, v) in overrides {
            map.insert(k.to_string(), v.to_string());
        }
        Settings::from_lookup(move |key| map.get(key).cloned()).unwrap()
    }
}

impl Upstream {
    pub async fn start(self) -> Running {
        let shared = Arc::new(Shared {
            upstream: self,
            token_hits: AtomicUsize::new(0),
            catalog_hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/api/token", post(token))
            .route("/v1/artists/{id}/albums", get(albums))
            .route("/v1/tracks/{id}", get(track))
            .with_state(Arc::clone(&shared));

        Running {
            base: serve(router).await,
            shared,
        }
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn token(State(s): State<Arc<Shared>>, headers: HeaderMap, body: String) -> Response {
    let n = s.token_hits.fetch_add(1, Ordering::SeqCst) + 1;
    s.record("/api/token".to_string(), &headers, body);

    if s.upstream.token_status != StatusCode::OK {
        return (s.upstream.token_status, r#"{"error":"invalid_client"}"#).into_response();
    }
    if let Some(raw) = &s.upstream.token_body {
        return (StatusCode::OK, raw.clone()).into_response();
    }

    Json(json!({
        "access_token": format!("tok-{n}"),
        "token_type": "Bearer",
        "expires_in": s.upstream.expires_in
    }))
    .into_response()
}

async fn albums(
    State(s): State<Arc<Shared>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let body = s.upstream.albums.clone();
    catalog_reply(&s, format!("/v1/artists/{id}/albums"), &headers, body).await
}

async fn track(
    State(s): State<Arc<Shared>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let body = s.upstream.track.clone();
    catalog_reply(&s, format!("/v1/tracks/{id}"), &headers, body).await
}

async fn catalog_reply(s: &Shared, path: String, headers: &HeaderMap, body: String) -> Response {
    s.catalog_hits.fetch_add(1, Ordering::SeqCst);
    s.record(path, headers, String::new());

    if !s.upstream.delay.is_zero() {
        tokio::time::sleep(s.upstream.delay).await;
    }
    if s.upstream.catalog_status != StatusCode::OK {
        return (s.upstream.catalog_status, r#"{"error":"nope"}"#).into_response();
    }

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn album_json(
    name: &str,
    images: &[&str],
    release_date: &str,
    total_tracks: u32,
) -> serde_json::Value {
    let images: Vec<_> = images
        .iter()
        .map(|url| json!({ "url": url, "height": 640, "width": 640 }))
        .collect();
    json!({
        "name": name,
        "images": images,
        "release_date": release_date,
        "total_tracks": total_tracks
    })
}

pub fn albums_json(items: Vec<serde_json::Value>) -> String {
    let total = items.len();
    json!({
        "href": "https://api.spotify.com/v1/artists/x/albums",
        "items": items,
        "total": total
    })
    .to_string()
}

pub fn track_json(name: &str, album: &str, artist: &str, link: &str) -> String {
    json!({
        "name": name,
        "album": {
            "name": album,
            "images": [{ "url": "https://i.scdn.co/image/cover" }],
            "release_date": "2021-06-04"
        },
        "artists": [{ "name": artist }, { "name": "Guest" }],
        "external_urls": { "spotify": link },
        "duration_ms": 180000
    })
    .to_string()
}
