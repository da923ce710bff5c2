use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::app::{Model, item_links, page_label};
use crate::catalog::ProductionItem;
use crate::document::RenderedLine;

use super::{
    ASIDE_MIN_WIDTH, ASIDE_WIDTH, MAX_CONTENT_WIDTH, PORTFOLIO_PADDING, overlays, status, style,
};

pub const PREV_LABEL: &str = "< Prev";
pub const NEXT_LABEL: &str = "Next >";
pub const CLOSE_LABEL: &str = "Close";
const BUTTON_WIDTH: u16 = 7;
const CLOSE_HINT: &str = "Esc to close";

/// Width the portfolio wraps to on a terminal `total_width` columns wide.
pub fn portfolio_content_width(total_width: u16) -> u16 {
    total_width
        .saturating_sub(PORTFOLIO_PADDING * 2)
        .clamp(1, MAX_CONTENT_WIDTH)
}

/// Where portfolio lines are drawn: everything above the status bar, less
/// the side padding.
pub fn portfolio_area(area: Rect) -> Rect {
    Rect {
        x: area.x + PORTFOLIO_PADDING.min(area.width),
        y: area.y,
        width: portfolio_content_width(area.width).min(area.width),
        height: area.height.saturating_sub(1),
    }
}

/// Regions of the detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalAreas {
    /// Border included. Clicks outside it close the modal.
    pub outer: Rect,
    pub header: Rect,
    /// Image placeholder and links. Zero width on narrow terminals.
    pub aside: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub prev: Rect,
    pub next: Rect,
}

/// Lay out the modal over `area` (status bar row included). A modal that
/// is not yet, or no longer, visible is drawn slightly smaller.
pub fn modal_areas(area: Rect, visible: bool) -> ModalAreas {
    let screen = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let width = screen.width.saturating_sub(8).clamp(screen.width.min(30), 110);
    let height = screen.height.saturating_sub(2).max(screen.height.min(10));
    let mut outer = centered_rect(width, height, screen);
    if !visible {
        outer = Rect {
            x: outer.x + 2.min(outer.width / 2),
            y: outer.y + 1.min(outer.height / 2),
            width: outer.width.saturating_sub(4),
            height: outer.height.saturating_sub(2),
        };
    }

    let inner = Rect {
        x: outer.x + 1.min(outer.width),
        y: outer.y + 1.min(outer.height),
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    };
    let header = Rect {
        height: inner.height.min(1),
        ..inner
    };
    let footer = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    let middle = Rect {
        y: inner.y + inner.height.min(1),
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let (aside, body) = if inner.width >= ASIDE_MIN_WIDTH {
        (
            Rect {
                width: ASIDE_WIDTH,
                ..middle
            },
            Rect {
                x: middle.x + ASIDE_WIDTH + 1,
                width: middle.width - ASIDE_WIDTH - 1,
                ..middle
            },
        )
    } else {
        (Rect { width: 0, ..middle }, middle)
    };
    let button = BUTTON_WIDTH.min(footer.width / 2);
    let prev = Rect {
        width: button,
        ..footer
    };
    let next = Rect {
        x: footer.x + footer.width - button,
        width: button,
        ..footer
    };

    ModalAreas {
        outer,
        header,
        aside,
        body,
        footer,
        prev,
        next,
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    render_portfolio(model, frame, area);
    if model.modal.is_open() {
        render_modal(model, frame, area);
    }

    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    if model.active_toast().is_some() && area.height >= 2 {
        let toast_area = Rect {
            y: status_area.y - 1,
            ..status_area
        };
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.link_picker_active() {
        overlays::render_link_picker_overlay(model, frame, area);
    }
}

fn styled_line(line: &RenderedLine) -> Line<'static> {
    let line_style = style::style_for_line_type(line.line_type());
    match line.spans() {
        Some(spans) => Line::from(
            spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style::style_for_inline(line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::styled(line.content().to_string(), line_style),
    }
}

fn render_portfolio(model: &Model, frame: &mut Frame, area: Rect) {
    let doc_area = portfolio_area(area);
    let offset = model.viewport.offset();
    let selected_heading = model
        .portfolio
        .item_lines
        .get(model.selected)
        .map(|range| range.start);

    let content: Vec<Line> = model
        .portfolio
        .layout
        .visible_lines(offset, doc_area.height as usize)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let styled = styled_line(line);
            if Some(offset + idx) == selected_heading {
                styled.patch_style(style::selected_style())
            } else {
                styled
            }
        })
        .collect();

    frame.render_widget(
        Clear,
        Rect {
            height: area.height.saturating_sub(1),
            ..area
        },
    );
    frame.render_widget(Paragraph::new(content), doc_area);
}

fn render_modal(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(item) = model.modal_item() else {
        return;
    };
    let visible = model.modal.is_visible();
    let areas = modal_areas(area, visible);

    frame.render_widget(Clear, areas.outer);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
        areas.outer,
    );

    let title = Line::from(Span::styled(
        item.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), areas.header);
    let hint_width = u16::try_from(CLOSE_HINT.len()).unwrap_or(u16::MAX);
    if areas.header.width > hint_width + 2 {
        let hint = Line::from(Span::styled(CLOSE_HINT, style::muted_style())).right_aligned();
        frame.render_widget(Paragraph::new(hint), areas.header);
    }

    if areas.aside.width > 0 {
        render_aside(item, frame, areas.aside);
    }

    let body: Vec<Line> = model
        .modal_body
        .visible_lines(model.modal_viewport.offset(), areas.body.height as usize)
        .into_iter()
        .map(styled_line)
        .collect();
    frame.render_widget(Paragraph::new(body), areas.body);

    render_modal_footer(model, item, frame, &areas);

    if !visible {
        frame
            .buffer_mut()
            .set_style(areas.outer, style::transition_style());
    }
}

fn render_aside(item: &ProductionItem, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(image) = item.image() {
        lines.push(Line::styled(format!("[image: {image}]"), style::muted_style()));
        lines.push(Line::raw(""));
    }
    for (label, url) in item_links(item) {
        lines.push(Line::styled(
            label,
            style::style_for_inline(
                Style::default(),
                crate::document::InlineStyle {
                    strong: true,
                    link: true,
                },
            ),
        ));
        lines.push(Line::styled(url.to_string(), style::muted_style()));
    }
    if let Some(date) = &item.published_at {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("Published {date}"), style::muted_style()));
    }
    if !item.tags.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(item.tags.join(" · "), style::tag_style()));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_modal_footer(model: &Model, item: &ProductionItem, frame: &mut Frame, areas: &ModalAreas) {
    let index = model.modal.page_index();
    let label = format!(
        "{} ({}/{})",
        page_label(item, model.modal.current_page()),
        index + 1,
        model.modal.total_pages()
    );
    frame.render_widget(
        Paragraph::new(Line::styled(label, style::muted_style()).centered()),
        areas.footer,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(PREV_LABEL, style::button_style(index > 0))),
        areas.prev,
    );
    let next = if model.modal.is_last_page() {
        CLOSE_LABEL
    } else {
        NEXT_LABEL
    };
    frame.render_widget(
        Paragraph::new(Line::styled(next, style::button_style(true)).right_aligned()),
        areas.next,
    );
}
