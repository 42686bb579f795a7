//! Search screen: artist/title inputs, lyrics panel, trending list

use crate::app::state::{AppState, SearchFocus};
use crate::lookup::LyricsStatus;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::root::truncate_str;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let sub = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_inputs(frame, state, sub[0]);

    if state.has_searched {
        render_lyrics_panel(frame, state, sub[1]);
    } else {
        render_trending(frame, state, sub[1]);
    }
}

fn render_inputs(frame: &mut Frame, state: &AppState, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_input_box(
        frame,
        cols[0],
        "Artist",
        &state.artist_input,
        state.search_focus == SearchFocus::Artist,
    );
    render_input_box(
        frame,
        cols[1],
        "Title",
        &state.title_input,
        state.search_focus == SearchFocus::Title,
    );
}

fn render_input_box(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let theme = get_theme();

    let border_style = if focused {
        Style::default().fg(theme.palette.accent)
    } else {
        Style::default().fg(theme.palette.border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(border_style)
        .title(format!(" {label} "))
        .title_style(Style::default().fg(theme.palette.accent));

    let cursor = if focused { "▏" } else { "" };
    let text = Line::from(vec![
        Span::styled(value, Style::default().fg(theme.palette.fg_primary)),
        Span::styled(cursor, Style::default().fg(theme.palette.accent)),
    ]);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_lyrics_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let sub = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    // Metadata header: favorite flag + cover/audio URLs when known.
    let heart_style = if state.lookup.is_favorite {
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.palette.fg_secondary)
    };
    let mut header_spans = vec![
        Span::styled(format!("{} ", icons.favorite), heart_style),
        Span::styled(
            if state.lookup.is_favorite { "favorite" } else { "not saved" },
            heart_style,
        ),
    ];
    if let Some(cover) = &state.lookup.cover_url {
        header_spans.push(Span::styled(
            format!("  cover: {}", truncate_str(cover, 40)),
            Style::default().fg(theme.palette.fg_secondary),
        ));
    }
    if let Some(audio) = &state.lookup.audio_url {
        header_spans.push(Span::styled(
            format!("  preview: {}", truncate_str(audio, 40)),
            Style::default().fg(theme.palette.fg_secondary),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header_spans)), sub[0]);

    if state.lookup.is_loading {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{spinner} Searching...")))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, sub[1]);
        return;
    }

    let style = match state.lookup.status {
        LyricsStatus::Found => Style::default().fg(theme.palette.fg_primary),
        _ => Style::default().fg(theme.palette.fg_secondary),
    };

    let lines: Vec<Line> = state
        .lookup
        .lyrics
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();

    let lyrics = Paragraph::new(lines).scroll((state.lyrics_scroll, 0));
    frame.render_widget(lyrics, sub[1]);
}

/// Trending list shown in place of lyrics before the first search.
fn render_trending(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    if state.top_tracks.is_empty() {
        let hint = Paragraph::new(Line::from(
            "Type an artist and a title, then press Enter to search.",
        ))
        .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .top_tracks
        .iter()
        .map(|hit| {
            let track = hit.track_name.as_deref().unwrap_or("Unknown");
            let artist = hit.artist_name.as_deref().unwrap_or("Unknown");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", icons.music),
                    Style::default().fg(theme.palette.fg_secondary),
                ),
                Span::styled(track.to_string(), Style::default().fg(theme.palette.fg_primary)),
                Span::styled(
                    format!(" - {artist}"),
                    Style::default().fg(theme.palette.fg_secondary),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.palette.border))
            .title(" Trending ")
            .title_style(Style::default().fg(theme.palette.accent)),
    );
    frame.render_widget(list, area);
}
