use std::time::Duration;

use crate::modal::{DismissKey, KeyListeners, ListenerId, ModalHost, Scheduler, TaskHandle};
use crate::ui::viewport::Viewport;

/// The model seen from the modal: scroll lock on the portfolio viewport,
/// the key listener registry and the loop's scheduler.
pub(super) struct ModalEnv<'a> {
    pub(super) scheduler: &'a mut Scheduler,
    pub(super) listeners: &'a mut KeyListeners,
    pub(super) background: &'a mut Viewport,
}

impl ModalHost for ModalEnv<'_> {
    fn lock_scroll(&mut self) -> bool {
        let prior = self.background.scroll_enabled();
        self.background.set_scroll_enabled(false);
        crate::perf::log_event("modal.scroll_lock", format!("prior={prior}"));
        prior
    }

    fn restore_scroll(&mut self, prior: bool) {
        self.background.set_scroll_enabled(prior);
        crate::perf::log_event("modal.scroll_restore", format!("enabled={prior}"));
    }

    fn add_key_listener(&mut self, key: DismissKey) -> ListenerId {
        self.listeners.add(key)
    }

    fn remove_key_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn request_frame(&mut self) -> TaskHandle {
        self.scheduler.request_frame()
    }

    fn set_timeout(&mut self, delay: Duration) -> TaskHandle {
        self.scheduler.set_timeout(delay)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.scheduler.cancel(handle);
    }
}
