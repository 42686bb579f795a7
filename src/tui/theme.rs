//! Theme - monochrome grayscale with Nerd Font icons

use ratatui::style::Color;
use ratatui::symbols::border;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub border: Color,
}

impl Palette {
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(136, 136, 136),
        accent: Color::Rgb(255, 255, 255),
        border: Color::Rgb(64, 64, 64),
    };
}

/// Icon set using Nerd Font glyphs.
#[derive(Debug, Clone)]
pub struct Icons {
    pub search: &'static str,
    pub favorite: &'static str,
    pub help: &'static str,
    pub music: &'static str,
    pub artist: &'static str,
    pub lyrics: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub selected: &'static str,
    pub unselected: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            search: "\u{f002}",   // nf-fa-search
            favorite: "\u{f004}", // nf-fa-heart
            help: "\u{f059}",     // nf-fa-question_circle
            music: "\u{f001}",    // nf-fa-music
            artist: "\u{f007}",   // nf-fa-user
            lyrics: "\u{f15c}",   // nf-fa-file_text_o
            success: "\u{f00c}",  // nf-fa-check
            error: "\u{f00d}",    // nf-fa-times
            selected: "\u{f054}", // nf-fa-chevron_right
            unselected: " ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 4) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
