//! Lyrics provider clients
//!
//! Two public lyrics APIs are supported, selected by configuration:
//! - lyrics.ovh (path-parameter API, `{ "lyrics": ... }`)
//! - lrclib.net (query-parameter API, `{ "plainLyrics": ... }`)
//!
//! Callers only ever see `LyricsClient` and never branch on the provider.

pub mod lrclib;
pub mod ovh;

pub use lrclib::LrclibClient;
pub use ovh::OvhClient;

use serde::{Deserialize, Serialize};

pub const USER_AGENT: &str = "verso/0.1.0 (https://github.com/verso)";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Failure taxonomy for remote calls. "Not found" is an outcome, not a
/// transport error, and must stay distinguishable from one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("no lyrics found")]
    NotFound,
    #[error("server error: http {0}")]
    Server(u16),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// A remote source of plain lyrics text.
pub trait LyricsSource {
    fn fetch_lyrics(
        &self,
        artist: &str,
        title: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Which backend to use. Lives in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LyricsProvider {
    LyricsOvh,
    #[default]
    Lrclib,
}

/// Concrete client wrapping the configured adapter.
#[derive(Debug, Clone)]
pub enum LyricsClient {
    Ovh(OvhClient),
    Lrclib(LrclibClient),
}

impl LyricsClient {
    pub fn from_provider(provider: LyricsProvider) -> Self {
        match provider {
            LyricsProvider::LyricsOvh => LyricsClient::Ovh(OvhClient::new()),
            LyricsProvider::Lrclib => LyricsClient::Lrclib(LrclibClient::new()),
        }
    }
}

impl LyricsSource for LyricsClient {
    async fn fetch_lyrics(&self, artist: &str, title: &str) -> Result<String, FetchError> {
        match self {
            LyricsClient::Ovh(c) => c.fetch_lyrics(artist, title).await,
            LyricsClient::Lrclib(c) => c.fetch_lyrics(artist, title).await,
        }
    }
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("failed to create reqwest client")
}

/// Empty or whitespace-only lyrics count as not found.
pub(crate) fn lyrics_from_body(text: Option<String>) -> Result<String, FetchError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(FetchError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_not_found() {
        assert!(matches!(
            lyrics_from_body(Some("   \n".into())),
            Err(FetchError::NotFound)
        ));
        assert!(matches!(lyrics_from_body(None), Err(FetchError::NotFound)));
        assert_eq!(lyrics_from_body(Some("la la".into())).unwrap(), "la la");
    }
}
