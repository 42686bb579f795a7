//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, Screen, Toast, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{favorites, help, search, sidebar};

/// Main layout:
/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Main Content                  │
/// │  Search  │     (Search/Favorites/Help)             │
/// │  Favs    │                                         │
/// │  Help    │                                         │
/// ├──────────┴─────────────────────────────────────────┤
/// │ status line / toast                                │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // sidebar + content
            Constraint::Length(1), // status line
        ])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // sidebar menu
            Constraint::Min(40),    // main content
        ])
        .split(rows[0]);

    sidebar::render(frame, state, top_cols[0]);
    render_main_content(frame, state, top_cols[1]);
    render_status_line(frame, state, rows[1]);
}

fn render_main_content(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = match state.screen {
        Screen::Search => format!(" {} Search ", icons.search),
        Screen::Favorites => format!(" {} Favorites ", icons.favorite),
        Screen::Help => format!(" {} Keybinds ", icons.help),
    };

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    match state.screen {
        Screen::Search => search::render(frame, state, inner),
        Screen::Favorites => favorites::render(frame, state, inner),
        Screen::Help => help::render(frame, inner),
    }
}

fn render_status_line(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let line = match &state.toast {
        Some(Toast { message, kind, .. }) => {
            let (icon, style) = match kind {
                ToastKind::Success => (
                    icons.success,
                    Style::default()
                        .fg(theme.palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                ToastKind::Error => (
                    icons.error,
                    Style::default()
                        .fg(theme.palette.fg_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            };
            Line::from(vec![
                Span::styled(format!(" {icon} "), style),
                Span::styled(message.clone(), style),
            ])
        }
        None => Line::from(Span::styled(
            format!(" {}", state.status),
            Style::default().fg(theme.palette.fg_secondary),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
