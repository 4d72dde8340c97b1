//! Orange-on-slate palette and the semantic styles built from it.

use ratatui::style::{Color, Modifier, Style};

pub const ORANGE: Color = Color::Rgb(255, 140, 26); // #ff8c1a
pub const AMBER: Color = Color::Rgb(255, 196, 61); // #ffc43d
pub const TEAL: Color = Color::Rgb(64, 210, 196); // #40d2c4
pub const GREEN: Color = Color::Rgb(120, 220, 110); // #78dc6e
pub const RED: Color = Color::Rgb(255, 92, 87); // #ff5c57

pub const TEXT: Color = Color::Rgb(206, 208, 214); // #ced0d6
pub const MUTED: Color = Color::Rgb(112, 120, 140); // #70788c
pub const SURFACE: Color = Color::Rgb(44, 46, 56); // #2c2e38
pub const BACKDROP: Color = Color::Rgb(28, 29, 36); // #1c1d24

pub fn title() -> Style {
    Style::default().fg(ORANGE).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { ORANGE } else { MUTED })
}

pub fn table_header() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Header cell of the column the list is sorted by.
pub fn table_header_sorted() -> Style {
    table_header().fg(AMBER).add_modifier(Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ORANGE)
        .bg(SURFACE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab(active: bool) -> Style {
    if active {
        Style::default().fg(BACKDROP).bg(ORANGE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn input(active: bool) -> Style {
    Style::default().fg(if active { TEAL } else { TEXT })
}

pub fn error() -> Style {
    Style::default().fg(RED)
}
