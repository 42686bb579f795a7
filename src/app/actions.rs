use super::state::{Screen, SearchFocus};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),

    SidebarUp,
    SidebarDown,

    SetSearchFocus(SearchFocus),
    InputChar(char),
    Backspace,
    ClearInput,
    StartSearch,

    ToggleFavorite,
    OpenSelectedFavorite,
    DeleteSelectedFavorite,

    ListUp,
    ListDown,
    ScrollLyricsUp,
    ScrollLyricsDown,

    Refresh,
    Resize,
}
