//! Paged detail modal.
//!
//! [`PagedModal`] is a small state machine over
//! `Closed -> Opening -> Open -> Closing -> Closed`. Page 0 is the overview;
//! pages `1..=N` are the item's markdown pages.
//!
//! The controller never touches the terminal or the model directly. Every
//! side effect goes through a [`ModalHost`], and every deferred callback is a
//! [`TaskHandle`] the controller owns and cancels on each exit path.

mod listeners;
mod scheduler;

pub use listeners::{DismissKey, KeyListeners, ListenerId};
pub use scheduler::{Scheduler, TaskHandle};

use std::time::Duration;

/// Delay between leaving the visible state and teardown.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Resources a modal session borrows from its environment.
pub trait ModalHost {
    /// Disable background scrolling and return the setting it replaced.
    fn lock_scroll(&mut self) -> bool;
    /// Put back the exact setting returned by [`ModalHost::lock_scroll`].
    fn restore_scroll(&mut self, prior: bool);
    fn add_key_listener(&mut self, key: DismissKey) -> ListenerId;
    fn remove_key_listener(&mut self, id: ListenerId);
    /// Callback after the next completed frame.
    fn request_frame(&mut self) -> TaskHandle;
    fn set_timeout(&mut self, delay: Duration) -> TaskHandle;
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    /// Open but not yet visible; waiting for the first frame.
    Opening,
    Open,
    /// No longer visible; teardown is scheduled.
    Closing,
}

/// What the current page index points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPage {
    Overview,
    Markdown(usize),
}

/// Notifications for the owner of the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Ended { item: String },
}

#[derive(Debug, Clone, Copy)]
struct Held {
    prior_scroll: bool,
    listener: ListenerId,
}

#[derive(Debug)]
pub struct PagedModal {
    phase: ModalPhase,
    item: Option<String>,
    page_index: usize,
    markdown_pages: usize,
    close_delay: Duration,
    held: Option<Held>,
    pending_frame: Option<TaskHandle>,
    pending_teardown: Option<TaskHandle>,
}

impl Default for PagedModal {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_DELAY)
    }
}

impl PagedModal {
    pub const fn new(close_delay: Duration) -> Self {
        Self {
            phase: ModalPhase::Closed,
            item: None,
            page_index: 0,
            markdown_pages: 0,
            close_delay,
            held: None,
            pending_frame: None,
            pending_teardown: None,
        }
    }

    pub const fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// True from `open` until teardown.
    pub const fn is_open(&self) -> bool {
        !matches!(self.phase, ModalPhase::Closed)
    }

    pub const fn is_visible(&self) -> bool {
        matches!(self.phase, ModalPhase::Open)
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Overview plus markdown pages.
    pub const fn total_pages(&self) -> usize {
        self.markdown_pages + 1
    }

    pub const fn markdown_pages(&self) -> usize {
        self.markdown_pages
    }

    pub const fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub fn set_close_delay(&mut self, delay: Duration) {
        self.close_delay = delay;
    }

    /// Replace the markdown page count of the active session, keeping
    /// `page_index` on a real page.
    pub fn set_page_count(&mut self, markdown_pages: usize) {
        self.markdown_pages = markdown_pages;
        self.page_index = self.page_index.min(self.total_pages() - 1);
    }

    pub const fn is_last_page(&self) -> bool {
        self.page_index + 1 >= self.total_pages()
    }

    pub const fn current_page(&self) -> ModalPage {
        match self.page_index {
            0 => ModalPage::Overview,
            n => ModalPage::Markdown(n - 1),
        }
    }

    /// Start a session for `item` with `markdown_pages` pages after the
    /// overview. An active session is torn down first without an
    /// [`ModalEvent::Ended`] notification.
    pub fn open(&mut self, item: impl Into<String>, markdown_pages: usize, host: &mut dyn ModalHost) {
        let item = item.into();
        if self.is_open() {
            tracing::debug!(previous = ?self.item, next = %item, "modal session replaced");
            self.release(host);
        }
        let prior_scroll = host.lock_scroll();
        let listener = host.add_key_listener(DismissKey::Escape);
        self.held = Some(Held {
            prior_scroll,
            listener,
        });
        self.pending_frame = Some(host.request_frame());
        self.phase = ModalPhase::Opening;
        self.page_index = 0;
        self.markdown_pages = markdown_pages;
        tracing::debug!(item = %item, pages = markdown_pages + 1, "modal opening");
        self.item = Some(item);
    }

    /// Frame callback. Ignores handles this session no longer waits for.
    pub fn on_frame(&mut self, handle: TaskHandle) {
        if self.phase != ModalPhase::Opening || self.pending_frame != Some(handle) {
            return;
        }
        self.pending_frame = None;
        self.phase = ModalPhase::Open;
        tracing::debug!(item = ?self.item, "modal open");
    }

    /// Leave the visible state and schedule teardown. Idempotent.
    pub fn close(&mut self, host: &mut dyn ModalHost) {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return;
        }
        if let Some(frame) = self.pending_frame.take() {
            host.cancel(frame);
        }
        self.pending_teardown = Some(host.set_timeout(self.close_delay));
        self.phase = ModalPhase::Closing;
        tracing::debug!(item = ?self.item, delay_ms = self.close_delay.as_millis(), "modal closing");
    }

    /// Timer callback. Completes teardown when `handle` is the pending one.
    pub fn on_timer(&mut self, handle: TaskHandle, host: &mut dyn ModalHost) -> Option<ModalEvent> {
        if self.phase != ModalPhase::Closing || self.pending_teardown != Some(handle) {
            return None;
        }
        self.pending_teardown = None;
        self.release(host);
        let item = self.item.take()?;
        tracing::debug!(item = %item, "modal closed");
        Some(ModalEvent::Ended { item })
    }

    pub fn handle_key(&mut self, key: DismissKey, host: &mut dyn ModalHost) {
        match key {
            DismissKey::Escape if self.phase == ModalPhase::Open => self.close(host),
            DismissKey::Escape => {}
        }
    }

    /// Advance one page, or close when already on the last page.
    pub fn next_page(&mut self, host: &mut dyn ModalHost) {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return;
        }
        if self.is_last_page() {
            self.close(host);
        } else {
            self.page_index = (self.page_index + 1).min(self.total_pages() - 1);
        }
    }

    pub fn prev_page(&mut self) {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return;
        }
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// The owner is going away: drop everything now, without notification.
    pub fn dispose(&mut self, host: &mut dyn ModalHost) {
        if self.is_open() {
            tracing::debug!(item = ?self.item, phase = ?self.phase, "modal disposed");
        }
        self.release(host);
        self.item = None;
    }

    /// Cancel pending callbacks and hand back held resources. Safe to call
    /// repeatedly; resources are only released while held.
    fn release(&mut self, host: &mut dyn ModalHost) {
        if let Some(frame) = self.pending_frame.take() {
            host.cancel(frame);
        }
        if let Some(timer) = self.pending_teardown.take() {
            host.cancel(timer);
        }
        if let Some(held) = self.held.take() {
            host.remove_key_listener(held.listener);
            host.restore_scroll(held.prior_scroll);
        }
        self.phase = ModalPhase::Closed;
        self.page_index = 0;
    }
}

#[cfg(test)]
mod tests;
