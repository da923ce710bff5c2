use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = if let Some(item) = model.modal_item() {
        format!(
            " {}  page {}/{}  ←/→:pages  Esc:close{}  ?:help",
            item.title,
            model.modal.page_index() + 1,
            model.modal.total_pages(),
            watch_indicator
        )
    } else {
        let name = if model.catalog.profile.name.is_empty() {
            "portfolio"
        } else {
            model.catalog.profile.name.as_str()
        };
        let selection = model.selected_item().map_or_else(String::new, |item| {
            format!(
                "  Item {}/{}: {}",
                model.selected + 1,
                model.catalog.production.len(),
                item.title
            )
        });
        format!(
            " {}  [{}%]{}{}  ?:help",
            name,
            model.viewport.scroll_percent(),
            selection,
            watch_indicator
        )
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
