//! HTML page rendering.
//!
//! Pages are plain HTML files compiled into the binary. Dynamic values are
//! inserted at `{{NAME}}` placeholders after HTML escaping.

use crate::{
    error::CatalogError,
    types::{AlbumSummary, TrackSummary},
};

const INDEX_HTML: &str = include_str!("../templates/index.html");
const ALBUMS_HTML: &str = include_str!("../templates/album.html");
const ALBUM_ROW_HTML: &str = include_str!("../templates/album_row.html");
const TRACK_HTML: &str = include_str!("../templates/track.html");
const ERROR_HTML: &str = include_str!("../templates/error.html");

pub struct Template<'a> {
    name: &'static str,
    source: &'a str,
}

impl<'a> Template<'a> {
    pub fn new(name: &'static str, source: &'a str) -> Self {
        Self { name, source }
    }

    /// Substitutes every placeholder in one pass.
    ///
    /// Values in `raw` are inserted verbatim, values in `escaped` go through
    /// [`escape_html`]. A placeholder without a value, or an unterminated
    /// `{{`, is a [`CatalogError::Template`].
    pub fn fill(
        &self,
        escaped: &[(&str, &str)],
        raw: &[(&str, &str)],
    ) -> Result<String, CatalogError> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                CatalogError::Template(format!("{}: unterminated placeholder", self.name))
            })?;
            let key = after[..end].trim();

            if let Some((_, value)) = escaped.iter().find(|(k, _)| *k == key) {
                out.push_str(&escape_html(value));
            } else if let Some((_, value)) = raw.iter().find(|(k, _)| *k == key) {
                out.push_str(value);
            } else {
                return Err(CatalogError::Template(format!(
                    "{}: no value for placeholder {}",
                    self.name, key
                )));
            }

            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_home() -> Result<String, CatalogError> {
    Template::new("index.html", INDEX_HTML)
        .fill(&[("VERSION", env!("CARGO_PKG_VERSION"))], &[])
}

pub fn render_albums(albums: &[AlbumSummary]) -> Result<String, CatalogError> {
    let row = Template::new("album_row.html", ALBUM_ROW_HTML);
    let mut rows = String::new();
    for album in albums {
        rows.push_str(&row.fill(
            &[
                ("NAME", album.name.as_str()),
                ("IMAGE_URL", album.image_url.as_str()),
                ("RELEASE_DATE", album.release_date.as_str()),
                ("TOTAL_TRACKS", album.total_tracks.to_string().as_str()),
            ],
            &[],
        )?);
    }

    let count = albums.len().to_string();
    Template::new("album.html", ALBUMS_HTML)
        .fill(&[("COUNT", count.as_str())], &[("ROWS", rows.as_str())])
}

pub fn render_track(track: &TrackSummary) -> Result<String, CatalogError> {
    Template::new("track.html", TRACK_HTML).fill(
        &[
            ("NAME", track.name.as_str()),
            ("ALBUM_COVER_URL", track.album_cover_url.as_str()),
            ("ALBUM_NAME", track.album_name.as_str()),
            ("ARTIST_NAME", track.artist_name.as_str()),
            ("RELEASE_DATE", track.release_date.as_str()),
            ("SPOTIFY_LINK", track.spotify_link.as_str()),
        ],
        &[],
    )
}

/// Renders the error page. Never fails: falls back to a bare message.
pub fn render_error(status: u16, title: &str, message: &str) -> String {
    let status = status.to_string();
    Template::new("error.html", ERROR_HTML)
        .fill(
            &[("STATUS", status.as_str()), ("TITLE", title), ("MESSAGE", message)],
            &[],
        )
        .unwrap_or_else(|_| format!("<h1>{}</h1><p>{}</p>", status, escape_html(message)))
}
