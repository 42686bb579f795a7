pub mod actions;
pub mod events;
pub mod state;

use crate::catalog::ItunesClient;
use crate::config::Config;
use crate::input;
use crate::lookup::{LookupKey, LyricsStatus, Resolver};
use crate::lyrics::LyricsClient;
use crate::storage::StorageHandle;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent};
use state::{AppState, Screen, SearchFocus, Toast};
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    resolver: Resolver<LyricsClient, ItunesClient>,
    catalog: ItunesClient,
}

impl App {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let store = StorageHandle::new(cfg.songs_db_path());
        let lyrics = LyricsClient::from_provider(cfg.lyrics.provider);
        let catalog = ItunesClient::new();
        let resolver = Resolver::new(lyrics, catalog.clone(), store);

        Ok(Self {
            cfg,
            state: AppState::new(),
            resolver,
            catalog,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        // No constant ticker; we re-render on input and network events.

        tui::draw(terminal, &mut self.state)?;

        // Populate the trending list and favorites on startup.
        self.spawn_load_top(&tx);
        self.spawn_load_favorites(&tx);

        while let Some(ev) = rx.recv().await {
            self.state.tick = self.state.tick.wrapping_add(1);
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Network(ne) => self.handle_network(ne, &tx),
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        Ok(())
    }

    fn on_screen_enter(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.screen == Screen::Favorites && !self.state.favorites.loaded {
            self.spawn_load_favorites(tx);
        }
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::StartSearch => self.spawn_search(tx),
            Action::ToggleFavorite => self.spawn_toggle_favorite(tx),
            Action::OpenSelectedFavorite => {
                let Some(song) = self.state.favorites.selected_song().cloned() else {
                    return;
                };
                self.state.artist_input = song.artist;
                self.state.title_input = song.title;
                self.reduce(Action::SetScreen(Screen::Search));
                // Goes through the normal lookup path; the cache answers it.
                self.spawn_search(tx);
            }
            Action::DeleteSelectedFavorite => self.spawn_delete_favorite(tx),
            Action::Refresh => match self.state.screen {
                Screen::Favorites => {
                    self.state.favorites.loaded = false;
                    self.spawn_load_favorites(tx);
                }
                Screen::Search => self.spawn_search(tx),
                Screen::Help => {}
            },
            Action::NextScreen | Action::PrevScreen | Action::SetScreen(_)
            | Action::SidebarUp | Action::SidebarDown => {
                self.reduce(action);
                self.on_screen_enter(tx);
            }
            _ => self.reduce(action),
        }
    }

    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => self.set_screen(self.state.screen.next()),
            Action::PrevScreen => self.set_screen(self.state.screen.prev()),
            Action::SetScreen(screen) => self.set_screen(screen),
            Action::SidebarUp => {
                let idx = self.state.sidebar_selected.saturating_sub(1);
                self.set_screen(sidebar_to_screen(idx));
            }
            Action::SidebarDown => {
                let idx = (self.state.sidebar_selected + 1).min(2);
                self.set_screen(sidebar_to_screen(idx));
            }
            Action::SetSearchFocus(f) => self.state.search_focus = f,
            Action::InputChar(c) => match self.state.search_focus {
                SearchFocus::Artist => self.state.artist_input.push(c),
                SearchFocus::Title => self.state.title_input.push(c),
                SearchFocus::Lyrics => {}
            },
            Action::Backspace => {
                match self.state.search_focus {
                    SearchFocus::Artist => self.state.artist_input.pop(),
                    SearchFocus::Title => self.state.title_input.pop(),
                    SearchFocus::Lyrics => None,
                };
            }
            Action::ClearInput => match self.state.search_focus {
                SearchFocus::Artist => self.state.artist_input.clear(),
                SearchFocus::Title => self.state.title_input.clear(),
                SearchFocus::Lyrics => {}
            },
            Action::ListUp => {
                if self.state.screen == Screen::Favorites {
                    self.state.favorites.select_prev();
                    self.state.favorites.update_scroll(20);
                }
            }
            Action::ListDown => {
                if self.state.screen == Screen::Favorites {
                    self.state.favorites.select_next();
                    self.state.favorites.update_scroll(20);
                }
            }
            Action::ScrollLyricsUp => {
                self.state.lyrics_scroll = self.state.lyrics_scroll.saturating_sub(1);
            }
            Action::ScrollLyricsDown => {
                self.state.lyrics_scroll = self.state.lyrics_scroll.saturating_add(1);
            }
            Action::Resize => {}
            // Handled in handle_action.
            Action::StartSearch
            | Action::ToggleFavorite
            | Action::OpenSelectedFavorite
            | Action::DeleteSelectedFavorite
            | Action::Refresh => {}
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        self.state.screen = screen;
        self.state.sidebar_selected = screen_to_sidebar(screen);
        if screen == Screen::Search && self.state.search_focus == SearchFocus::Lyrics
            && !self.state.has_searched
        {
            self.state.search_focus = SearchFocus::Artist;
        }
    }

    fn spawn_search(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(key) = LookupKey::new(&self.state.artist_input, &self.state.title_input) else {
            self.state.status = "Type an artist and a title first".into();
            return;
        };

        let generation = self.state.begin_search(key.clone());
        self.state.status = format!("Searching: {} - {}", key.artist, key.title);

        let resolver = self.resolver.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let resolved = resolver.resolve(&key).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::LookupResolved {
                    generation,
                    resolved,
                }))
                .await;
        });
    }

    fn spawn_toggle_favorite(&mut self, tx: &mpsc::Sender<Event>) {
        // Single-flight per tap.
        if self.state.favorite_busy {
            return;
        }
        let Some(key) = self.state.current_key.clone() else {
            self.state.toast = Some(Toast::error("Nothing to save yet"));
            return;
        };
        if self.state.lookup.status != LyricsStatus::Found {
            self.state.toast = Some(Toast::error("You can't save this"));
            return;
        }

        self.state.favorite_busy = true;
        let view = self.state.lookup.snapshot();
        let resolver = self.resolver.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match resolver.toggle_favorite(&key, &view).await {
                Ok(favorite) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::FavoriteToggled { key, favorite }))
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::Error(format!("{e:#}"))))
                        .await;
                }
            }
        });
    }

    fn spawn_delete_favorite(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(song) = self.state.favorites.selected_song().cloned() else {
            return;
        };

        let store = self.resolver.store().clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match store.delete(song.clone()).await {
                Ok(()) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::FavoriteRemoved { song }))
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::Error(format!("{e:#}"))))
                        .await;
                }
            }
        });
    }

    fn spawn_load_favorites(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.favorites.loading {
            return;
        }
        self.state.favorites.loading = true;

        let store = self.resolver.store().clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match store.list_all().await {
                Ok(songs) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::FavoritesLoaded { songs }))
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::Error(format!("{e:#}"))))
                        .await;
                }
            }
        });
    }

    fn spawn_load_top(&mut self, tx: &mpsc::Sender<Event>) {
        let catalog = self.catalog.clone();
        let seed = self.cfg.trending.seed_term.clone();
        let limit = self.cfg.trending.limit;
        let tx = tx.clone();
        tokio::spawn(async move {
            // Best-effort: the trending list is decorative, failures are
            // logged and the panel stays empty.
            match catalog.search_top_tracks(&seed, limit).await {
                Ok(hits) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::TopTracksLoaded { hits }))
                        .await;
                }
                Err(e) => tracing::warn!(error = %e, "trending load failed"),
            }
        });
    }

    fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::Error(e) => {
                self.state.lookup.is_loading = false;
                self.state.favorite_busy = false;
                self.state.favorites.loading = false;
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e}");
            }
            NetworkEvent::LookupResolved { generation, resolved } => {
                let from_cache = resolved.from_cache;
                if self.state.apply_lookup(generation, resolved) {
                    self.state.status = match self.state.lookup.status {
                        LyricsStatus::Found => "Lyrics ready".into(),
                        LyricsStatus::NotFound => "No lyrics found".into(),
                        _ => "Lookup failed".into(),
                    };
                    if from_cache {
                        self.state.toast = Some(Toast::success("Loaded from favorites (offline)"));
                    }
                }
            }
            NetworkEvent::FavoriteToggled { key, favorite } => {
                self.state.favorite_busy = false;
                match favorite {
                    None => {
                        self.state.toast = Some(Toast::error("You can't save this"));
                    }
                    Some(fav) => {
                        if self.state.current_key.as_ref() == Some(&key) {
                            self.state.lookup.is_favorite = fav;
                        }
                        self.state.toast = Some(if fav {
                            Toast::success("Saved to favorites")
                        } else {
                            Toast::success("Removed from favorites")
                        });
                        self.state.favorites.loaded = false;
                        self.spawn_load_favorites(tx);
                    }
                }
            }
            NetworkEvent::FavoriteRemoved { song } => {
                self.state.favorites.remove_by_key(&song.artist, &song.title);
                // Keep the live display consistent with the favorites list.
                if let Some(key) = &self.state.current_key
                    && key.matches(&song.artist, &song.title)
                {
                    self.state.lookup.is_favorite = false;
                }
                self.state.toast = Some(Toast::success("Removed from favorites"));
            }
            NetworkEvent::FavoritesLoaded { songs } => {
                self.state.favorites.set_songs(songs);
                if self.state.screen == Screen::Favorites {
                    self.state.status = format!("Favorites: {}", self.state.favorites.songs.len());
                }
            }
            NetworkEvent::TopTracksLoaded { hits } => {
                self.state.top_tracks = hits;
            }
        }
    }
}

fn sidebar_to_screen(idx: usize) -> Screen {
    match idx {
        0 => Screen::Search,
        1 => Screen::Favorites,
        _ => Screen::Help,
    }
}

fn screen_to_sidebar(screen: Screen) -> usize {
    match screen {
        Screen::Search => 0,
        Screen::Favorites => 1,
        Screen::Help => 2,
    }
}
