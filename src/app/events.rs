use crate::catalog::TrackHit;
use crate::lookup::{LookupKey, ResolvedLookup};
use crate::storage::Song;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum NetworkEvent {
    Error(String),
    LookupResolved {
        generation: u64,
        resolved: ResolvedLookup,
    },
    FavoriteToggled {
        key: LookupKey,
        favorite: Option<bool>,
    },
    FavoriteRemoved {
        song: Song,
    },
    FavoritesLoaded {
        songs: Vec<Song>,
    },
    TopTracksLoaded {
        hits: Vec<TrackHit>,
    },
}
