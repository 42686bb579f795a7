//! iTunes Search API client
//!
//! Provides cover-art and audio-preview URLs for a track, plus the trending
//! list shown before any search. The catalog returns thumbnail-sized artwork
//! (`100x100`); `upgrade_artwork` rewrites it to the `600x600` variant before
//! anything reaches the UI.

use serde::Deserialize;

use crate::lyrics::{FetchError, http_client};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<TrackHit>,
}

/// First-match track metadata from the catalog. Everything is optional; the
/// API omits fields freely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackHit {
    #[serde(rename = "trackName")]
    pub track_name: Option<String>,
    #[serde(rename = "artistName")]
    pub artist_name: Option<String>,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url: Option<String>,
    #[serde(rename = "previewUrl")]
    pub preview_url: Option<String>,
}

/// A remote source of track metadata. Split from the concrete client so the
/// orchestrator can be exercised without the network.
pub trait TrackSource {
    fn search_track(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<TrackHit>, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ItunesClient {
    client: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    const DEFAULT_BASE_URL: &'static str = "https://itunes.apple.com";

    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    async fn search(&self, term: &str, limit: u32) -> Result<Vec<TrackHit>, FetchError> {
        let url = format!(
            "{}/search?term={}&media=music&limit={}&entity=song",
            self.base_url,
            urlencoding::encode(term),
            limit
        );
        tracing::debug!(%url, "itunes search");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Server(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Used once at startup to seed the trending list.
    pub async fn search_top_tracks(
        &self,
        seed_term: &str,
        limit: u32,
    ) -> Result<Vec<TrackHit>, FetchError> {
        self.search(seed_term, limit).await
    }
}

impl Default for ItunesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackSource for ItunesClient {
    async fn search_track(&self, query: &str, limit: u32) -> Result<Vec<TrackHit>, FetchError> {
        self.search(query, limit).await
    }
}

/// Rewrite the catalog's thumbnail artwork URL to the high-resolution
/// variant. Pure string substitution on the known size token.
pub fn upgrade_artwork(url: Option<String>) -> Option<String> {
    url.map(|u| u.replace("100x100", "600x600"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artwork_upgrade_is_pure_substitution() {
        assert_eq!(
            upgrade_artwork(Some("http://x/100x100/y.jpg".into())),
            Some("http://x/600x600/y.jpg".into())
        );
        assert_eq!(
            upgrade_artwork(Some(".../100x100bb.jpg".into())),
            Some(".../600x600bb.jpg".into())
        );
        assert_eq!(upgrade_artwork(None), None);
    }

    #[test]
    fn artwork_without_token_is_untouched() {
        assert_eq!(
            upgrade_artwork(Some("http://x/cover.jpg".into())),
            Some("http://x/cover.jpg".into())
        );
    }

    #[test]
    fn track_hit_deserializes_api_field_names() {
        let raw = r#"{
            "trackName": "Bohemian Rhapsody",
            "artistName": "Queen",
            "artworkUrl100": "https://a/100x100bb.jpg",
            "previewUrl": "https://a/preview.m4a"
        }"#;
        let hit: TrackHit = serde_json::from_str(raw).unwrap();
        assert_eq!(hit.track_name.as_deref(), Some("Bohemian Rhapsody"));
        assert_eq!(hit.artist_name.as_deref(), Some("Queen"));
        assert_eq!(hit.artwork_url.as_deref(), Some("https://a/100x100bb.jpg"));
        assert_eq!(hit.preview_url.as_deref(), Some("https://a/preview.m4a"));
    }
}
