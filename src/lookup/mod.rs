//! Lookup orchestration
//!
//! One search follows a small state machine:
//! `Idle -> Searching -> { Found (cache or network), NotFound, Error }`.
//!
//! The cache is consulted first and wins unconditionally when present (the
//! offline path; favorites are assumed stable, no revalidation). On a miss
//! the lyrics fetch and the track search run concurrently and are isolated
//! from each other; everything is folded into a `ResolvedLookup` here, so
//! remote failures never reach the presentation layer as faults.

use crate::catalog::{TrackHit, TrackSource, upgrade_artwork};
use crate::lyrics::{FetchError, LyricsSource};
use crate::storage::{Song, StorageHandle};

pub const NOT_FOUND_MESSAGE: &str = "No lyrics found for this song.";

/// The `(artist, title)` pair identifying a search/cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub artist: String,
    pub title: String,
}

impl LookupKey {
    /// Trims both parts; `None` if either is blank. The UI is expected to
    /// disable search on blank input, but callers must stay safe anyway.
    pub fn new(artist: &str, title: &str) -> Option<Self> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self {
            artist: artist.to_string(),
            title: title.to_string(),
        })
    }

    pub fn matches(&self, artist: &str, title: &str) -> bool {
        self.artist == artist && self.title == title
    }
}

/// Explicit status carried alongside the display text. What to render is
/// never derived from the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LyricsStatus {
    #[default]
    Idle,
    Searching,
    Found,
    NotFound,
    Error,
}

/// Terminal state of one lookup, published to observers.
#[derive(Debug, Clone)]
pub struct ResolvedLookup {
    pub status: LyricsStatus,
    pub lyrics: String,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub from_cache: bool,
    pub is_favorite: bool,
}

/// Orchestrates one lookup: cache first, then the two remote clients.
#[derive(Debug, Clone)]
pub struct Resolver<L, C> {
    lyrics: L,
    catalog: C,
    store: StorageHandle,
}

impl<L, C> Resolver<L, C>
where
    L: LyricsSource,
    C: TrackSource,
{
    pub fn new(lyrics: L, catalog: C, store: StorageHandle) -> Self {
        Self {
            lyrics,
            catalog,
            store,
        }
    }

    pub fn store(&self) -> &StorageHandle {
        &self.store
    }

    /// Resolve a lookup. Infallible by construction: every failure mode is
    /// folded into a terminal `ResolvedLookup`.
    pub async fn resolve(&self, key: &LookupKey) -> ResolvedLookup {
        match self.store.find_by_key(&key.artist, &key.title).await {
            Ok(Some(song)) => {
                tracing::debug!(artist = %key.artist, title = %key.title, "cache hit");
                return ResolvedLookup {
                    status: LyricsStatus::Found,
                    lyrics: song.lyrics,
                    cover_url: song.cover_url,
                    audio_url: song.audio_url,
                    from_cache: true,
                    is_favorite: true,
                };
            }
            Ok(None) => {}
            Err(e) => {
                // A cache read failure is a miss; fall through to network.
                tracing::warn!(error = %format!("{e:#}"), "cache read failed");
            }
        }

        self.resolve_from_network(key).await
    }

    async fn resolve_from_network(&self, key: &LookupKey) -> ResolvedLookup {
        let query = format!("{} {}", key.artist, key.title);
        let (lyrics_res, track_res) = tokio::join!(
            self.lyrics.fetch_lyrics(&key.artist, &key.title),
            self.catalog.search_track(&query, 1),
        );

        // Track metadata failure never invalidates the lyrics side.
        let first_hit: Option<TrackHit> = match track_res {
            Ok(hits) => hits.into_iter().next(),
            Err(e) => {
                tracing::warn!(error = %e, "track search failed");
                None
            }
        };
        let (cover_url, audio_url) = match first_hit {
            Some(hit) => (upgrade_artwork(hit.artwork_url), hit.preview_url),
            None => (None, None),
        };

        let (status, lyrics) = match lyrics_res {
            Ok(text) => (LyricsStatus::Found, text),
            Err(FetchError::NotFound) => (LyricsStatus::NotFound, NOT_FOUND_MESSAGE.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "lyrics fetch failed");
                (LyricsStatus::Error, format!("Network error: {e}"))
            }
        };

        ResolvedLookup {
            status,
            lyrics,
            cover_url,
            audio_url,
            from_cache: false,
            // A network-resolved result is never already favorited; the user
            // must toggle explicitly, even for a key favorited in the past.
            is_favorite: false,
        }
    }

    /// Favorite toggle against the cache. Returns the new favorite flag, or
    /// `None` when the current state is not a saveable lyrics result.
    pub async fn toggle_favorite(
        &self,
        key: &LookupKey,
        view: &ResolvedLookup,
    ) -> anyhow::Result<Option<bool>> {
        if view.status != LyricsStatus::Found {
            return Ok(None);
        }

        match self.store.find_by_key(&key.artist, &key.title).await? {
            Some(existing) => {
                self.store.delete(existing).await?;
                Ok(Some(false))
            }
            None => {
                let song = Song {
                    id: None,
                    artist: key.artist.clone(),
                    title: key.title.clone(),
                    lyrics: view.lyrics.clone(),
                    cover_url: view.cover_url.clone(),
                    audio_url: view.audio_url.clone(),
                    is_favorite: true,
                };
                self.store.upsert(song).await?;
                Ok(Some(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct FakeLyrics {
        calls: Arc<AtomicUsize>,
        reply: Result<String, FetchError>,
    }

    impl FakeLyrics {
        fn new(reply: Result<String, FetchError>) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LyricsSource for FakeLyrics {
        async fn fetch_lyrics(&self, _artist: &str, _title: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[derive(Clone)]
    struct FakeCatalog {
        calls: Arc<AtomicUsize>,
        reply: Result<Vec<TrackHit>, FetchError>,
    }

    impl FakeCatalog {
        fn new(reply: Result<Vec<TrackHit>, FetchError>) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                reply,
            }
        }

        fn empty() -> Self {
            Self::new(Ok(Vec::new()))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TrackSource for FakeCatalog {
        async fn search_track(&self, _query: &str, _limit: u32) -> Result<Vec<TrackHit>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn temp_store() -> (tempfile::TempDir, StorageHandle) {
        let dir = tempfile::tempdir().unwrap();
        let handle = StorageHandle::new(dir.path().join("songs.sqlite3"));
        (dir, handle)
    }

    fn key() -> LookupKey {
        LookupKey::new("Queen", "Bohemian Rhapsody").unwrap()
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(LookupKey::new("", "Title").is_none());
        assert!(LookupKey::new("Artist", "   ").is_none());
        let k = LookupKey::new("  Queen  ", " Bohemian Rhapsody ").unwrap();
        assert_eq!(k.artist, "Queen");
        assert_eq!(k.title, "Bohemian Rhapsody");
    }

    #[tokio::test]
    async fn cache_hit_skips_both_remote_clients() {
        let (_dir, store) = temp_store();
        store
            .upsert(Song {
                id: None,
                artist: "Queen".into(),
                title: "Bohemian Rhapsody".into(),
                lyrics: "Is this the real...".into(),
                cover_url: Some("https://a/600x600bb.jpg".into()),
                audio_url: Some("https://a/preview.m4a".into()),
                is_favorite: true,
            })
            .await
            .unwrap();

        let lyrics = FakeLyrics::new(Ok("network copy".into()));
        let catalog = FakeCatalog::empty();
        let resolver = Resolver::new(lyrics.clone(), catalog.clone(), store);

        let out = resolver.resolve(&key()).await;
        assert_eq!(out.status, LyricsStatus::Found);
        assert!(out.from_cache);
        assert!(out.is_favorite);
        assert_eq!(out.lyrics, "Is this the real...");
        assert_eq!(out.cover_url.as_deref(), Some("https://a/600x600bb.jpg"));
        assert_eq!(out.audio_url.as_deref(), Some("https://a/preview.m4a"));
        assert_eq!(lyrics.calls(), 0);
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn network_resolution_merges_lyrics_and_metadata() {
        let (_dir, store) = temp_store();
        let lyrics = FakeLyrics::new(Ok("Is this the real...".into()));
        let catalog = FakeCatalog::new(Ok(vec![TrackHit {
            track_name: Some("Bohemian Rhapsody".into()),
            artist_name: Some("Queen".into()),
            artwork_url: Some("https://a/100x100bb.jpg".into()),
            preview_url: Some("https://a/preview.m4a".into()),
        }]));
        let resolver = Resolver::new(lyrics, catalog, store);

        let out = resolver.resolve(&key()).await;
        assert_eq!(out.status, LyricsStatus::Found);
        assert_eq!(out.lyrics, "Is this the real...");
        assert_eq!(out.cover_url.as_deref(), Some("https://a/600x600bb.jpg"));
        assert_eq!(out.audio_url.as_deref(), Some("https://a/preview.m4a"));
        assert!(!out.from_cache);
        assert!(!out.is_favorite);
    }

    #[tokio::test]
    async fn lyrics_not_found_yields_status_message() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(
            FakeLyrics::new(Err(FetchError::NotFound)),
            FakeCatalog::empty(),
            store,
        );

        let out = resolver.resolve(&key()).await;
        assert_eq!(out.status, LyricsStatus::NotFound);
        assert_eq!(out.lyrics, NOT_FOUND_MESSAGE);
        assert!(!out.is_favorite);
    }

    #[tokio::test]
    async fn transport_failure_yields_error_status() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(
            FakeLyrics::new(Err(FetchError::Transport("timeout".into()))),
            FakeCatalog::empty(),
            store,
        );

        let out = resolver.resolve(&key()).await;
        assert_eq!(out.status, LyricsStatus::Error);
        assert!(out.lyrics.starts_with("Network error:"));
    }

    #[tokio::test]
    async fn catalog_failure_does_not_block_lyrics() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(
            FakeLyrics::new(Ok("still here".into())),
            FakeCatalog::new(Err(FetchError::Server(500))),
            store,
        );

        let out = resolver.resolve(&key()).await;
        assert_eq!(out.status, LyricsStatus::Found);
        assert_eq!(out.lyrics, "still here");
        assert_eq!(out.cover_url, None);
        assert_eq!(out.audio_url, None);
    }

    #[tokio::test]
    async fn favorite_stays_false_after_previous_delete() {
        let (_dir, store) = temp_store();
        let lyrics = FakeLyrics::new(Ok("text".into()));
        let resolver = Resolver::new(lyrics, FakeCatalog::empty(), store.clone());

        // favorite once, then remove it again
        let out = resolver.resolve(&key()).await;
        assert_eq!(resolver.toggle_favorite(&key(), &out).await.unwrap(), Some(true));
        assert_eq!(resolver.toggle_favorite(&key(), &out).await.unwrap(), Some(false));

        let out = resolver.resolve(&key()).await;
        assert!(!out.is_favorite);
        assert!(!out.from_cache);
    }

    #[tokio::test]
    async fn toggle_is_idempotent_pairwise_and_keeps_one_row() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(
            FakeLyrics::new(Ok("text".into())),
            FakeCatalog::empty(),
            store.clone(),
        );

        let out = resolver.resolve(&key()).await;
        assert_eq!(resolver.toggle_favorite(&key(), &out).await.unwrap(), Some(true));
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        assert_eq!(resolver.toggle_favorite(&key(), &out).await.unwrap(), Some(false));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_on_not_found_is_a_guarded_noop() {
        let (_dir, store) = temp_store();
        let resolver = Resolver::new(
            FakeLyrics::new(Err(FetchError::NotFound)),
            FakeCatalog::empty(),
            store.clone(),
        );

        let out = resolver.resolve(&key()).await;
        assert_eq!(resolver.toggle_favorite(&key(), &out).await.unwrap(), None);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
