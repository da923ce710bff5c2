use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Message, Model};
use crate::document::{LinkRef, PageLayout};
use crate::modal::DismissKey;
use crate::ui::viewport::Viewport;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        let area = model.screen_area();
        let clicked = matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left));

        if model.link_picker_active() {
            if !clicked {
                return None;
            }
            let popup = crate::ui::link_picker_rect(area, model.link_picker_items.len());
            if point_in_rect(mouse.column, mouse.row, popup) {
                let content_top = crate::ui::link_picker_content_top(popup);
                if mouse.row >= content_top {
                    let idx = ((mouse.row - content_top) / 2) as usize;
                    if idx < model.link_picker_items.len() {
                        return u8::try_from(idx + 1).ok().map(Message::SelectVisibleLink);
                    }
                }
            }
            return Some(Message::CancelVisibleLinkPicker);
        }

        if model.modal.is_open() {
            let areas = crate::ui::modal_areas(area, true);
            return match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) => {
                    if !point_in_rect(mouse.column, mouse.row, areas.outer) {
                        Some(Message::ModalClose)
                    } else if point_in_rect(mouse.column, mouse.row, areas.prev) {
                        (model.modal.page_index() > 0).then_some(Message::ModalPrev)
                    } else if point_in_rect(mouse.column, mouse.row, areas.next) {
                        Some(Message::ModalNext)
                    } else {
                        link_under_cursor(
                            &model.modal_body,
                            &model.modal_viewport,
                            areas.body,
                            mouse,
                        )
                        .map(|link| Message::FollowLink(link.url))
                    }
                }
                MouseEventKind::ScrollDown => model
                    .modal_viewport
                    .can_scroll_down()
                    .then_some(Message::ModalScrollDown(3)),
                MouseEventKind::ScrollUp => (model.modal_viewport.offset() > 0)
                    .then_some(Message::ModalScrollUp(3)),
                _ => None,
            };
        }

        let doc_area = crate::ui::portfolio_area(area);
        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(link) =
                    link_under_cursor(&model.portfolio.layout, &model.viewport, doc_area, mouse)
                {
                    return Some(Message::FollowLink(link.url));
                }
                let line = line_for_row(&model.viewport, doc_area, mouse.row)?;
                let idx = model.portfolio.item_at_line(line)?;
                model
                    .catalog
                    .production
                    .get(idx)
                    .map(|item| Message::OpenItem(item.id.clone()))
            }
            MouseEventKind::ScrollDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => {
                (model.viewport.offset() > 0).then_some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.link_picker_active() {
            return match key.code {
                KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                    Some(Message::SelectVisibleLink((c as u8) - b'0'))
                }
                _ => Some(Message::CancelVisibleLinkPicker),
            };
        }

        // Registered dismiss keys take priority over everything else.
        if key.code == KeyCode::Esc && model.key_listeners.is_listening(DismissKey::Escape) {
            return Some(Message::ModalDismiss(DismissKey::Escape));
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Redraw);
        }

        if model.modal.is_open() {
            let body_height = model.modal_viewport.height() as usize;
            return match key.code {
                KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
                    (model.modal.page_index() > 0).then_some(Message::ModalPrev)
                }
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                    Some(Message::ModalNext)
                }
                KeyCode::Char('j') | KeyCode::Down => model
                    .modal_viewport
                    .can_scroll_down()
                    .then_some(Message::ModalScrollDown(1)),
                KeyCode::Char('k') | KeyCode::Up => {
                    (model.modal_viewport.offset() > 0).then_some(Message::ModalScrollUp(1))
                }
                KeyCode::PageDown => Some(Message::ModalScrollDown(body_height.max(1))),
                KeyCode::PageUp => Some(Message::ModalScrollUp(body_height.max(1))),
                KeyCode::Char('x') => Some(Message::ModalClose),
                KeyCode::Char('o') => Some(Message::OpenVisibleLinks),
                KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
                KeyCode::Char('q') => Some(Message::Quit),
                _ => None,
            };
        }

        // Normal key handling
        match key.code {
            // Navigation
            KeyCode::Char('j') => model
                .viewport
                .can_scroll_down()
                .then_some(Message::ScrollDown(1)),
            KeyCode::Char('k') => (model.viewport.offset() > 0).then_some(Message::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => model
                .viewport
                .can_scroll_down()
                .then_some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => {
                (model.viewport.offset() > 0).then_some(Message::PageUp)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => model
                .viewport
                .can_scroll_down()
                .then_some(Message::HalfPageDown),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                (model.viewport.offset() > 0).then_some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Production items
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('n') => Some(Message::SelectNext),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('p') => Some(Message::SelectPrev),
            KeyCode::Enter => Some(Message::OpenSelected),

            // Catalog
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('o') => Some(Message::OpenVisibleLinks),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Layout line drawn at `row` inside `area`.
fn line_for_row(viewport: &Viewport, area: Rect, row: u16) -> Option<usize> {
    if row < area.y || row >= area.y + area.height {
        return None;
    }
    let line = viewport.offset() + (row - area.y) as usize;
    (line < viewport.total_lines()).then_some(line)
}

/// The link drawn under the mouse, matched by display column on its line.
fn link_under_cursor(
    layout: &PageLayout,
    viewport: &Viewport,
    area: Rect,
    mouse: MouseEvent,
) -> Option<LinkRef> {
    if !point_in_rect(mouse.column, mouse.row, area) {
        return None;
    }
    let line = line_for_row(viewport, area, mouse.row)?;
    let text = layout.lines.get(line)?.content();
    let col = (mouse.column - area.x) as usize;
    layout
        .links
        .iter()
        .filter(|link| link.line == line)
        .find(|link| {
            text.match_indices(link.text.as_str()).any(|(byte, _)| {
                let start = text[..byte].width();
                col >= start && col < start + link.text.width()
            })
        })
        .cloned()
}
