//! lyrics.ovh API client
//!
//! `GET https://api.lyrics.ovh/v1/{artist}/{title}` -> `{ "lyrics": "..." }`

use serde::Deserialize;

use super::{FetchError, LyricsSource, http_client, lyrics_from_body};

#[derive(Debug, Deserialize)]
struct OvhResponse {
    lyrics: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OvhClient {
    client: reqwest::Client,
    base_url: String,
}

impl OvhClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.lyrics.ovh/v1";

    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for OvhClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsSource for OvhClient {
    async fn fetch_lyrics(&self, artist: &str, title: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );
        tracing::debug!(%url, "lyrics.ovh request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: OvhResponse = response.json().await?;
            lyrics_from_body(body.lyrics)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(FetchError::NotFound)
        } else {
            Err(FetchError::Server(status.as_u16()))
        }
    }
}
