use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::layout::Rect;

use crate::catalog::{Catalog, ProductionItem};
use crate::document::{LinkRef, PageLayout};
use crate::modal::{KeyListeners, ModalHost, PagedModal, Scheduler};
use crate::ui::viewport::Viewport;

use super::host::ModalEnv;
use super::pages::{self, Portfolio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// Loaded portfolio content
    pub catalog: Catalog,
    /// Catalog file, `None` for the bundled sample
    pub catalog_path: Option<PathBuf>,
    /// Portfolio laid out for the current width
    pub portfolio: Portfolio,
    /// Selected production item
    pub selected: usize,
    /// Scroll position of the portfolio (locked while the modal is open)
    pub viewport: Viewport,
    /// Detail modal state machine
    pub modal: PagedModal,
    /// Frame and timer callbacks owned by the event loop
    pub scheduler: Scheduler,
    /// Keys that take priority over normal handling
    pub key_listeners: KeyListeners,
    /// Current modal page laid out for the modal body
    pub modal_body: PageLayout,
    /// Scroll position inside the modal body
    pub modal_viewport: Viewport,
    /// Whether catalog watching is enabled
    pub watch_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Pending link picker items for quick follow (`o`)
    pub link_picker_items: Vec<LinkRef>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for a terminal of `terminal_size` (columns, rows).
    pub fn new(catalog: Catalog, catalog_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        let content_width = crate::ui::portfolio_content_width(width);
        let portfolio = Portfolio::build(&catalog, content_width);
        let viewport = Viewport::new(
            width,
            height.saturating_sub(1),
            portfolio.layout.line_count(),
        );
        Self {
            catalog,
            catalog_path,
            portfolio,
            selected: 0,
            viewport,
            modal: PagedModal::default(),
            scheduler: Scheduler::new(),
            key_listeners: KeyListeners::default(),
            modal_body: PageLayout::default(),
            modal_viewport: Viewport::new(0, 0, 0),
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            link_picker_items: Vec::new(),
            toast: None,
            should_quit: false,
        }
    }

    /// Set the modal exit delay.
    #[must_use]
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.modal.set_close_delay(delay);
        self
    }

    /// The full terminal area, status bar included.
    pub fn screen_area(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.viewport.width(),
            self.viewport.height().saturating_add(1),
        )
    }

    pub fn selected_item(&self) -> Option<&ProductionItem> {
        self.catalog.production.get(self.selected)
    }

    /// The item shown in the modal, while a session is active.
    pub fn modal_item(&self) -> Option<&ProductionItem> {
        self.modal.item().and_then(|id| self.catalog.item(id))
    }

    /// Run a modal operation with the model as its host.
    pub(super) fn with_modal<R>(
        &mut self,
        f: impl FnOnce(&mut PagedModal, &mut dyn ModalHost) -> R,
    ) -> R {
        let mut env = ModalEnv {
            scheduler: &mut self.scheduler,
            listeners: &mut self.key_listeners,
            background: &mut self.viewport,
        };
        f(&mut self.modal, &mut env)
    }

    /// Re-lay out the portfolio for the current width.
    pub(super) fn reflow_portfolio(&mut self) {
        let width = crate::ui::portfolio_content_width(self.viewport.width());
        self.portfolio = Portfolio::build(&self.catalog, width);
        self.viewport
            .set_total_lines(self.portfolio.layout.line_count());
        self.selected = self
            .selected
            .min(self.catalog.production.len().saturating_sub(1));
    }

    /// Lay out the current modal page and size the modal viewport.
    pub(super) fn refresh_modal_body(&mut self, reset_scroll: bool) {
        let areas = crate::ui::modal_areas(self.screen_area(), true);
        let layout = match self.modal_item() {
            Some(item) => pages::page_layout(item, self.modal.current_page(), areas.body.width),
            None => PageLayout::default(),
        };
        let offset = if reset_scroll {
            0
        } else {
            self.modal_viewport.offset()
        };
        self.modal_viewport = Viewport::new(areas.body.width, areas.body.height, layout.line_count());
        self.modal_viewport.scroll_down(offset);
        self.modal_body = layout;
    }

    /// Keep the selected item on screen.
    pub(super) fn reveal_selected(&mut self) {
        if let Some(range) = self.portfolio.item_lines.get(self.selected).cloned() {
            self.viewport.reveal_line(range.end.saturating_sub(1));
            self.viewport.reveal_line(range.start);
        }
    }

    /// Links the reader can currently see: the modal body and its side
    /// links while a modal is open, otherwise the visible portfolio rows.
    pub fn visible_links(&self) -> Vec<LinkRef> {
        if self.modal.is_open() {
            let range = self.modal_viewport.visible_range();
            let mut links: Vec<LinkRef> = self
                .modal_body
                .links
                .iter()
                .filter(|link| range.contains(&link.line))
                .cloned()
                .collect();
            if let Some(item) = self.modal_item() {
                for (label, url) in pages::item_links(item) {
                    if !links.iter().any(|link| link.url == url) {
                        links.push(LinkRef {
                            text: label.to_string(),
                            url: url.to_string(),
                            line: 0,
                        });
                    }
                }
            }
            links
        } else {
            let range = self.viewport.visible_range();
            self.portfolio
                .layout
                .links
                .iter()
                .filter(|link| range.contains(&link.line))
                .cloned()
                .collect()
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub fn link_picker_active(&self) -> bool {
        !self.link_picker_items.is_empty()
    }

    /// Re-read the catalog file. An open modal whose item disappeared is
    /// closed; otherwise it stays on its page with refreshed content.
    pub(super) fn reload_catalog(&mut self) -> Result<()> {
        let Some(path) = self.catalog_path.clone() else {
            return Ok(());
        };
        let catalog =
            Catalog::load(&path).with_context(|| format!("reload of {}", path.display()))?;
        let selected_id = self.selected_item().map(|item| item.id.clone());
        self.catalog = catalog;
        self.reflow_portfolio();
        if let Some(idx) = selected_id.and_then(|id| self.catalog.item_index(&id)) {
            self.selected = idx;
        }
        if self.modal.is_open() {
            if let Some(pages) = self.modal_item().map(|item| item.pages().len()) {
                self.modal.set_page_count(pages);
                self.refresh_modal_body(false);
            } else {
                self.with_modal(|modal, host| modal.close(host));
            }
        }
        Ok(())
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Catalog::default(), None, (80, 24))
    }
}
