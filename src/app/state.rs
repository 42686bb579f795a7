use crate::catalog::TrackHit;
use crate::lookup::{LookupKey, LyricsStatus, ResolvedLookup};
use crate::storage::Song;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    Favorites,
    Help,
}

impl Screen {
    pub fn next(self) -> Self {
        match self {
            Screen::Search => Screen::Favorites,
            Screen::Favorites => Screen::Help,
            Screen::Help => Screen::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Search => Screen::Help,
            Screen::Favorites => Screen::Search,
            Screen::Help => Screen::Favorites,
        }
    }
}

/// Which part of the Search screen receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Artist,
    Title,
    Lyrics,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// The merged lookup state the UI observes. Owned and mutated exclusively by
/// the app loop.
#[derive(Debug, Clone, Default)]
pub struct LookupView {
    pub status: LyricsStatus,
    pub lyrics: String,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub is_loading: bool,
    pub is_favorite: bool,
}

impl LookupView {
    pub fn snapshot(&self) -> ResolvedLookup {
        ResolvedLookup {
            status: self.status,
            lyrics: self.lyrics.clone(),
            cover_url: self.cover_url.clone(),
            audio_url: self.audio_url.clone(),
            from_cache: false,
            is_favorite: self.is_favorite,
        }
    }
}

/// Favorites list with selection, kept in insertion-recency order.
#[derive(Debug, Clone, Default)]
pub struct FavoritesList {
    pub songs: Vec<Song>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub loaded: bool,
}

impl FavoritesList {
    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.loading = false;
        self.loaded = true;
        if !self.songs.is_empty() {
            self.selected = self.selected.min(self.songs.len() - 1);
        } else {
            self.selected = 0;
        }
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.songs.get(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.songs.is_empty() {
            self.selected = (self.selected + 1).min(self.songs.len() - 1);
        }
    }

    pub fn remove_by_key(&mut self, artist: &str, title: &str) {
        if let Some(idx) = self
            .songs
            .iter()
            .position(|s| s.artist == artist && s.title == title)
        {
            self.songs.remove(idx);
            if !self.songs.is_empty() {
                self.selected = self.selected.min(self.songs.len() - 1);
            } else {
                self.selected = 0;
            }
        }
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub screen: Screen,
    pub sidebar_selected: usize,

    // Search inputs
    pub artist_input: String,
    pub title_input: String,
    pub search_focus: SearchFocus,

    // Current lookup
    pub lookup: LookupView,
    pub current_key: Option<LookupKey>,
    pub search_generation: u64,
    pub lyrics_scroll: u16,
    pub has_searched: bool,

    // Favorite toggle single-flight guard
    pub favorite_busy: bool,

    pub favorites: FavoritesList,

    // Trending list shown before the first search
    pub top_tracks: Vec<TrackHit>,

    pub toast: Option<Toast>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tick: 0,
            screen: Screen::Search,
            sidebar_selected: 0,
            artist_input: String::new(),
            title_input: String::new(),
            search_focus: SearchFocus::Artist,
            lookup: LookupView::default(),
            current_key: None,
            search_generation: 0,
            lyrics_scroll: 0,
            has_searched: false,
            favorite_busy: false,
            favorites: FavoritesList::default(),
            top_tracks: Vec::new(),
            toast: None,
            status: String::new(),
        }
    }

    /// Reset display state for a new lookup and issue its generation. Stale
    /// in-flight completions compare against `search_generation` and are
    /// dropped, so a slow older request can never overwrite a newer one.
    pub fn begin_search(&mut self, key: LookupKey) -> u64 {
        self.search_generation += 1;
        self.current_key = Some(key);
        self.has_searched = true;
        self.lyrics_scroll = 0;
        self.lookup = LookupView {
            status: LyricsStatus::Searching,
            lyrics: "Searching...".to_string(),
            cover_url: None,
            audio_url: None,
            is_loading: true,
            is_favorite: false,
        };
        self.search_generation
    }

    /// Publish a terminal lookup state. Returns false when the completion is
    /// stale and was discarded. Loading always ends here, whatever the
    /// terminal branch.
    pub fn apply_lookup(&mut self, generation: u64, resolved: ResolvedLookup) -> bool {
        if generation != self.search_generation {
            tracing::debug!(generation, latest = self.search_generation, "stale lookup dropped");
            return false;
        }
        self.lookup = LookupView {
            status: resolved.status,
            lyrics: resolved.lyrics,
            cover_url: resolved.cover_url,
            audio_url: resolved.audio_url,
            is_loading: false,
            is_favorite: resolved.is_favorite,
        };
        self.search_focus = SearchFocus::Lyrics;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NOT_FOUND_MESSAGE;

    fn resolved(status: LyricsStatus, lyrics: &str) -> ResolvedLookup {
        ResolvedLookup {
            status,
            lyrics: lyrics.into(),
            cover_url: None,
            audio_url: None,
            from_cache: false,
            is_favorite: false,
        }
    }

    #[test]
    fn loading_clears_on_every_terminal_branch() {
        for (status, text) in [
            (LyricsStatus::Found, "lyrics"),
            (LyricsStatus::NotFound, NOT_FOUND_MESSAGE),
            (LyricsStatus::Error, "Network error: timeout"),
        ] {
            let mut state = AppState::new();
            let generation =
                state.begin_search(LookupKey::new("Queen", "Bohemian Rhapsody").unwrap());
            assert!(state.lookup.is_loading);
            assert_eq!(state.lookup.status, LyricsStatus::Searching);

            assert!(state.apply_lookup(generation, resolved(status, text)));
            assert!(!state.lookup.is_loading);
            assert_eq!(state.lookup.status, status);
            assert_eq!(state.lookup.lyrics, text);
        }
    }

    #[test]
    fn begin_search_clears_previous_display_state() {
        let mut state = AppState::new();
        let generation = state.begin_search(LookupKey::new("A", "B").unwrap());
        let mut found = resolved(LyricsStatus::Found, "old lyrics");
        found.cover_url = Some("https://a/600x600.jpg".into());
        found.is_favorite = true;
        state.apply_lookup(generation, found);

        state.begin_search(LookupKey::new("C", "D").unwrap());
        assert_eq!(state.lookup.cover_url, None);
        assert_eq!(state.lookup.audio_url, None);
        assert!(!state.lookup.is_favorite);
        assert!(state.lookup.is_loading);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut state = AppState::new();
        let first = state.begin_search(LookupKey::new("A", "B").unwrap());
        let second = state.begin_search(LookupKey::new("C", "D").unwrap());
        assert_ne!(first, second);

        // slow first request completes after the newer search started
        assert!(!state.apply_lookup(first, resolved(LyricsStatus::Found, "stale")));
        assert!(state.lookup.is_loading);
        assert_eq!(state.lookup.status, LyricsStatus::Searching);

        assert!(state.apply_lookup(second, resolved(LyricsStatus::Found, "fresh")));
        assert_eq!(state.lookup.lyrics, "fresh");
    }
}
