//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's palette, with darker
//! indexed colors when the background is light.

use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineStyle, LineType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<Background>>> = OnceLock::new();

/// Force a background mode, or `None` to detect it from the environment.
pub fn set_background_mode(mode: Option<Background>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

pub fn is_light_background() -> bool {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return mode == Background::Light;
    }
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()) == Background::Light
}

/// Interpret `COLORFGBG` (`fg;bg`); unknown values count as dark.
fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    match bg_str.parse::<u8>() {
        Ok(bg) if bg >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

const fn pick(light_bg: bool, light: Color, dark: Color) -> Color {
    if light_bg { light } else { dark }
}

/// Get the style for a given line type.
pub fn style_for_line_type(line_type: &LineType) -> Style {
    let light_bg = is_light_background();
    match line_type {
        // Section titles
        LineType::Heading(1) => Style::default()
            .fg(pick(light_bg, Color::Indexed(24), Color::Cyan))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Heading(2) => Style::default()
            .fg(pick(light_bg, Color::Indexed(22), Color::Green))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(3) => Style::default()
            .fg(pick(light_bg, Color::Indexed(58), Color::Yellow))
            .add_modifier(Modifier::BOLD),
        LineType::Heading(_) => Style::default()
            .fg(pick(light_bg, Color::Indexed(25), Color::Blue))
            .add_modifier(Modifier::BOLD),
        LineType::ListItem | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(base: Style, inline: InlineStyle) -> Style {
    let mut style = base;
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.link {
        style = style
            .fg(pick(is_light_background(), Color::Blue, Color::LightBlue))
            .add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Highlight for the selected production entry.
pub fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Muted text: hints, disabled buttons, metadata.
pub fn muted_style() -> Style {
    Style::default().fg(pick(
        is_light_background(),
        Color::Indexed(241),
        Color::Indexed(245),
    ))
}

pub fn tag_style() -> Style {
    Style::default().fg(pick(is_light_background(), Color::Indexed(90), Color::Magenta))
}

/// Style applied to the whole modal while it is entering or leaving.
pub fn transition_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(pick(is_light_background(), Color::Indexed(25), Color::Cyan))
            .add_modifier(Modifier::BOLD)
    } else {
        muted_style().add_modifier(Modifier::DIM)
    }
}
