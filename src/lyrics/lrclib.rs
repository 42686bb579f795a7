//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API. We only use the plain-lyrics field of the
//! exact-match endpoint. API documentation: https://lrclib.net/docs

use serde::Deserialize;

use super::{FetchError, LyricsSource, http_client, lyrics_from_body};

#[derive(Debug, Deserialize)]
struct LrclibResponse {
    #[serde(rename = "plainLyrics")]
    plain_lyrics: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    const DEFAULT_BASE_URL: &'static str = "https://lrclib.net/api";

    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for LrclibClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsSource for LrclibClient {
    async fn fetch_lyrics(&self, artist: &str, title: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/get?artist_name={}&track_name={}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );
        tracing::debug!(%url, "lrclib request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: LrclibResponse = response.json().await?;
            lyrics_from_body(body.plain_lyrics)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(FetchError::NotFound)
        } else {
            Err(FetchError::Server(status.as_u16()))
        }
    }
}
