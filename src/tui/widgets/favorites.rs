//! Favorites screen: the locally cached songs, most recent first

use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    if state.favorites.loading {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{spinner} Loading favorites...")))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, area);
        return;
    }

    if state.favorites.songs.is_empty() {
        let msg = "No favorites yet. Search a song and press f to save it.";
        let empty =
            Paragraph::new(Line::from(msg)).style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    let scroll_offset = state.favorites.scroll_offset;

    let items: Vec<ListItem> = state
        .favorites
        .songs
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, song)| {
            let is_selected = i == state.favorites.selected;

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };

            let display = format!("{} {} - {}", icons.music, song.title, song.artist);
            ListItem::new(Line::from(Span::styled(display, style)))
        })
        .collect();

    let adjusted_selected = state.favorites.selected.saturating_sub(scroll_offset);
    let mut list_state = ListState::default();
    list_state.select(Some(adjusted_selected));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{f054} ");

    frame.render_stateful_widget(list, area, &mut list_state);

    // Scroll position indicator
    if state.favorites.songs.len() > visible_height {
        let pos_text = format!(
            "{}/{}",
            state.favorites.selected + 1,
            state.favorites.songs.len()
        );
        let pos_len = pos_text.len() as u16;
        let pos_x = area.x + area.width.saturating_sub(pos_len);
        if pos_x > area.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, area.y, pos_len, 1),
            );
        }
    }
}
