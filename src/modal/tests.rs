use super::*;

/// Host that records every side effect and owns a real scheduler.
#[derive(Debug)]
struct RecordingHost {
    scroll_enabled: bool,
    listeners: KeyListeners,
    scheduler: Scheduler,
    locks: usize,
    restores: Vec<bool>,
    listener_removals: usize,
    cancels: usize,
}

impl RecordingHost {
    fn new(scroll_enabled: bool) -> Self {
        Self {
            scroll_enabled,
            listeners: KeyListeners::default(),
            scheduler: Scheduler::new(),
            locks: 0,
            restores: Vec::new(),
            listener_removals: 0,
            cancels: 0,
        }
    }

    fn draw(&mut self, modal: &mut PagedModal) {
        for handle in self.scheduler.frame_rendered() {
            modal.on_frame(handle);
        }
    }

    fn advance(&mut self, modal: &mut PagedModal, now_ms: u64) -> Vec<ModalEvent> {
        let mut events = Vec::new();
        for handle in self.scheduler.take_due(now_ms) {
            events.extend(modal.on_timer(handle, self));
        }
        events
    }
}

impl ModalHost for RecordingHost {
    fn lock_scroll(&mut self) -> bool {
        self.locks += 1;
        std::mem::replace(&mut self.scroll_enabled, false)
    }

    fn restore_scroll(&mut self, prior: bool) {
        self.restores.push(prior);
        self.scroll_enabled = prior;
    }

    fn add_key_listener(&mut self, key: DismissKey) -> ListenerId {
        self.listeners.add(key)
    }

    fn remove_key_listener(&mut self, id: ListenerId) {
        self.listener_removals += 1;
        self.listeners.remove(id);
    }

    fn request_frame(&mut self) -> TaskHandle {
        self.scheduler.request_frame()
    }

    fn set_timeout(&mut self, delay: Duration) -> TaskHandle {
        self.scheduler.set_timeout(delay)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.cancels += 1;
        self.scheduler.cancel(handle);
    }
}

fn opened(pages: usize, host: &mut RecordingHost) -> PagedModal {
    let mut modal = PagedModal::default();
    modal.open("item", pages, host);
    host.draw(&mut modal);
    modal
}

#[test]
fn test_open_becomes_visible_after_one_frame() {
    let mut host = RecordingHost::new(true);
    let mut modal = PagedModal::default();
    modal.open("item", 2, &mut host);
    assert_eq!(modal.phase(), ModalPhase::Opening);
    assert!(modal.is_open());
    assert!(!modal.is_visible());
    assert!(!host.scroll_enabled);
    assert!(host.listeners.is_listening(DismissKey::Escape));

    host.draw(&mut modal);
    assert_eq!(modal.phase(), ModalPhase::Open);
    assert!(modal.is_visible());
    assert_eq!(modal.current_page(), ModalPage::Overview);
}

#[test]
fn test_double_close_tears_down_once() {
    let mut host = RecordingHost::new(true);
    let mut modal = PagedModal::default();
    modal.open("item", 1, &mut host);
    modal.close(&mut host);
    modal.close(&mut host);
    assert_eq!(modal.phase(), ModalPhase::Closing);
    assert!(!host.scheduler.has_pending_frame());

    let events = host.advance(&mut modal, 200);
    assert_eq!(
        events,
        vec![ModalEvent::Ended {
            item: "item".to_string()
        }]
    );
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert_eq!(host.restores, vec![true]);
    assert_eq!(host.listener_removals, 1);
    assert!(host.listeners.is_empty());

    modal.close(&mut host);
    assert!(host.advance(&mut modal, 10_000).is_empty());
    assert_eq!(host.restores.len(), 1);
}

#[test]
fn test_teardown_waits_for_close_delay() {
    let mut host = RecordingHost::new(true);
    let mut modal = PagedModal::new(Duration::from_millis(300));
    modal.open("item", 0, &mut host);
    host.draw(&mut modal);
    host.scheduler.set_now(1_000);
    modal.close(&mut host);
    assert!(host.advance(&mut modal, 1_299).is_empty());
    assert_eq!(modal.phase(), ModalPhase::Closing);
    assert!(host.listeners.is_listening(DismissKey::Escape));
    assert_eq!(host.advance(&mut modal, 1_300).len(), 1);
    assert_eq!(modal.phase(), ModalPhase::Closed);
}

#[test]
fn test_next_page_total_pages_times_closes() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(3, &mut host);
    for _ in 0..modal.total_pages() {
        modal.next_page(&mut host);
    }
    assert_eq!(modal.phase(), ModalPhase::Closing);
    assert_eq!(modal.page_index(), 3);
    host.advance(&mut modal, 200);
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert!(host.scroll_enabled);
}

#[test]
fn test_next_page_on_single_page_item_closes() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(0, &mut host);
    assert!(modal.is_last_page());
    modal.next_page(&mut host);
    assert_eq!(modal.phase(), ModalPhase::Closing);
}

#[test]
fn test_prev_page_at_zero_is_noop() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(2, &mut host);
    modal.prev_page();
    assert_eq!(modal.page_index(), 0);
    assert_eq!(modal.phase(), ModalPhase::Open);
}

#[test]
fn test_pages_map_to_markdown_indices() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(2, &mut host);
    modal.next_page(&mut host);
    assert_eq!(modal.current_page(), ModalPage::Markdown(0));
    modal.next_page(&mut host);
    assert_eq!(modal.current_page(), ModalPage::Markdown(1));
    modal.prev_page();
    assert_eq!(modal.current_page(), ModalPage::Markdown(0));
}

#[test]
fn test_shrinking_page_count_clamps_page_index() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(3, &mut host);
    modal.next_page(&mut host);
    modal.next_page(&mut host);
    modal.next_page(&mut host);
    assert_eq!(modal.page_index(), 3);

    modal.set_page_count(1);
    assert_eq!(modal.total_pages(), 2);
    assert_eq!(modal.current_page(), ModalPage::Markdown(0));
    assert!(modal.is_last_page());

    modal.set_page_count(4);
    assert_eq!(modal.page_index(), 1);
    assert!(!modal.is_last_page());
}

#[test]
fn test_dispose_mid_closing_releases_once_and_ignores_timer() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(1, &mut host);
    modal.close(&mut host);
    modal.dispose(&mut host);
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert_eq!(host.restores, vec![true]);
    assert_eq!(host.listener_removals, 1);
    assert!(!host.scheduler.has_pending_timer());

    assert!(host.advance(&mut modal, 10_000).is_empty());
    modal.dispose(&mut host);
    assert_eq!(host.restores.len(), 1);
    assert_eq!(host.listener_removals, 1);
}

#[test]
fn test_stale_timer_handle_is_ignored() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(1, &mut host);
    modal.close(&mut host);
    let stale = host.scheduler.set_timeout(Duration::ZERO);
    assert_eq!(modal.on_timer(stale, &mut host), None);
    assert_eq!(modal.phase(), ModalPhase::Closing);
}

#[test]
fn test_prior_scroll_setting_restored_exactly() {
    for prior in [true, false] {
        let mut host = RecordingHost::new(prior);
        let mut modal = opened(0, &mut host);
        assert!(!host.scroll_enabled);
        modal.close(&mut host);
        host.advance(&mut modal, 200);
        assert_eq!(host.scroll_enabled, prior);
        assert_eq!(host.restores, vec![prior]);
    }
}

#[test]
fn test_close_while_opening_cancels_frame() {
    let mut host = RecordingHost::new(true);
    let mut modal = PagedModal::default();
    modal.open("item", 1, &mut host);
    modal.close(&mut host);
    host.draw(&mut modal);
    assert_eq!(modal.phase(), ModalPhase::Closing);
    assert!(!modal.is_visible());
}

#[test]
fn test_escape_only_closes_when_visible() {
    let mut host = RecordingHost::new(true);
    let mut modal = PagedModal::default();
    modal.open("item", 1, &mut host);
    modal.handle_key(DismissKey::Escape, &mut host);
    assert_eq!(modal.phase(), ModalPhase::Opening);

    host.draw(&mut modal);
    modal.handle_key(DismissKey::Escape, &mut host);
    assert_eq!(modal.phase(), ModalPhase::Closing);
}

#[test]
fn test_reopen_replaces_session_without_event() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(2, &mut host);
    modal.next_page(&mut host);
    modal.open("other", 4, &mut host);
    assert_eq!(modal.item(), Some("other"));
    assert_eq!(modal.page_index(), 0);
    assert_eq!(modal.total_pages(), 5);
    assert_eq!(host.listeners.len(), 1);
    assert_eq!(host.restores, vec![true]);
    assert!(!host.scroll_enabled);

    modal.close(&mut host);
    let events = host.advance(&mut modal, 200);
    assert_eq!(
        events,
        vec![ModalEvent::Ended {
            item: "other".to_string()
        }]
    );
    assert!(host.scroll_enabled);
}

#[test]
fn test_reopen_during_closing_drops_old_teardown() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(1, &mut host);
    modal.close(&mut host);
    modal.open("again", 1, &mut host);
    host.draw(&mut modal);
    assert!(host.advance(&mut modal, 10_000).is_empty());
    assert_eq!(modal.phase(), ModalPhase::Open);
}

#[test]
fn test_listener_never_registered_while_closed() {
    let mut host = RecordingHost::new(true);
    let mut modal = opened(0, &mut host);
    modal.close(&mut host);
    host.advance(&mut modal, 200);
    assert!(!modal.is_open());
    assert!(host.listeners.is_empty());
    assert_eq!(host.locks, 1);
    assert_eq!(host.cancels, 0);
}
