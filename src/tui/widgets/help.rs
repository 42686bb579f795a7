use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();

    let bindings: &[(&str, &str)] = &[
        ("Enter", "search (input) / open favorite (favorites)"),
        ("Tab", "next field / next screen"),
        ("Esc, /", "back to the input boxes"),
        ("f", "toggle favorite for the current song"),
        ("d, Del", "delete the selected favorite"),
        ("j/k, arrows", "scroll lyrics / move selection"),
        ("h/l, arrows", "switch screen via the menu"),
        ("1 / 2 / 3", "Search / Favorites / Help"),
        ("Ctrl-r, F5", "refresh"),
        ("Ctrl-u", "clear the focused input"),
        ("q", "quit"),
    ];

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<12}"),
                    Style::default().fg(theme.palette.accent),
                ),
                Span::styled(*desc, Style::default().fg(theme.palette.fg_primary)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
