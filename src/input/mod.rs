use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Screen, SearchFocus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        let _ = mouse_enabled;
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                match event::read() {
                    Ok(CtEvent::Key(k)) => {
                        if k.kind == KeyEventKind::Press
                            && tx.blocking_send(Event::Input(InputEvent::Key(k))).is_err()
                        {
                            break;
                        }
                    }
                    Ok(CtEvent::Mouse(m)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Mouse(m))).is_err() {
                            break;
                        }
                    }
                    Ok(CtEvent::Resize(_, _)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Resize)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {}
                }
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(scroll_up_action(state)),
            MouseEventKind::ScrollDown => Some(scroll_down_action(state)),
            _ => None,
        },
        InputEvent::Key(k) => match state.screen {
            Screen::Search => handle_search_screen(state, k),
            Screen::Favorites => handle_favorites_screen(k),
            Screen::Help => handle_help_screen(k),
        },
    }
}

fn scroll_up_action(state: &AppState) -> Action {
    match state.screen {
        Screen::Favorites => Action::ListUp,
        _ => Action::ScrollLyricsUp,
    }
}

fn scroll_down_action(state: &AppState) -> Action {
    match state.screen {
        Screen::Favorites => Action::ListDown,
        _ => Action::ScrollLyricsDown,
    }
}

fn handle_search_screen(state: &AppState, k: crossterm::event::KeyEvent) -> Option<Action> {
    match state.search_focus {
        SearchFocus::Artist | SearchFocus::Title => handle_search_input(state, k),
        SearchFocus::Lyrics => handle_lyrics_view(k),
    }
}

/// Typing mode: characters go into the focused input box.
fn handle_search_input(state: &AppState, k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::StartSearch),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::SetSearchFocus(match state.search_focus {
            SearchFocus::Artist => SearchFocus::Title,
            _ => SearchFocus::Artist,
        })),
        KeyCode::Down if state.has_searched => Some(Action::SetSearchFocus(SearchFocus::Lyrics)),
        KeyCode::Left => Some(Action::SidebarUp),
        KeyCode::Right => Some(Action::SidebarDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearInput)
        }
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

/// Browsing mode: the lyrics panel has focus.
fn handle_lyrics_view(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('i') => {
            Some(Action::SetSearchFocus(SearchFocus::Artist))
        }
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Char('f') => Some(Action::ToggleFavorite),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollLyricsUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollLyricsDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Search)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Favorites)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Help)),
        KeyCode::Char('r') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Refresh),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),
        _ => None,
    }
}

fn handle_favorites_screen(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),
        KeyCode::Enter => Some(Action::OpenSelectedFavorite),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelectedFavorite),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Search)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Help)),
        KeyCode::Char('r') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Refresh),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),
        _ => None,
    }
}

fn handle_help_screen(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Search)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Favorites)),
        _ => None,
    }
}
