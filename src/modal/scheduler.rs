//! Deferred callbacks for the modal lifecycle.
//!
//! Everything runs on the event loop thread. A callback is just a
//! [`TaskHandle`]; the loop asks the scheduler which handles are due and
//! routes them back to whoever requested them. Cancelled handles are never
//! returned.

use std::time::Duration;

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Frame and timer callbacks keyed by handle.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    now_ms: u64,
    frames: Vec<TaskHandle>,
    timers: Vec<(TaskHandle, u64)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }

    /// Fire once, after the next frame has been drawn.
    pub fn request_frame(&mut self) -> TaskHandle {
        let handle = self.next_handle();
        self.frames.push(handle);
        handle
    }

    /// Fire once `delay` after the last time the loop reported.
    pub fn set_timeout(&mut self, delay: Duration) -> TaskHandle {
        let handle = self.next_handle();
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.timers
            .push((handle, self.now_ms.saturating_add(delay_ms)));
        handle
    }

    pub fn cancel(&mut self, handle: TaskHandle) {
        self.frames.retain(|h| *h != handle);
        self.timers.retain(|(h, _)| *h != handle);
    }

    /// Record the current loop time without collecting anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Collect frame callbacks after a completed draw.
    pub fn frame_rendered(&mut self) -> Vec<TaskHandle> {
        std::mem::take(&mut self.frames)
    }

    /// Collect timers whose deadline is at or before `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TaskHandle> {
        self.set_now(now_ms);
        let now = self.now_ms;
        let mut due: Vec<(TaskHandle, u64)> = Vec::new();
        self.timers.retain(|(handle, at)| {
            if *at <= now {
                due.push((*handle, *at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn has_pending_timer(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_only_after_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(1_000);
        let handle = scheduler.set_timeout(Duration::from_millis(200));
        assert!(scheduler.take_due(1_199).is_empty());
        assert_eq!(scheduler.take_due(1_200), vec![handle]);
        assert!(scheduler.take_due(5_000).is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.set_timeout(Duration::from_millis(10));
        scheduler.cancel(handle);
        assert!(!scheduler.has_pending_timer());
        assert!(scheduler.take_due(100).is_empty());
    }

    #[test]
    fn test_frame_callbacks_drain_once() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        scheduler.cancel(a);
        assert_eq!(scheduler.frame_rendered(), vec![b]);
        assert!(scheduler.frame_rendered().is_empty());
    }

    #[test]
    fn test_due_timers_come_back_earliest_first() {
        let mut scheduler = Scheduler::new();
        let late = scheduler.set_timeout(Duration::from_millis(50));
        let early = scheduler.set_timeout(Duration::from_millis(10));
        assert_eq!(scheduler.take_due(60), vec![early, late]);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(500);
        scheduler.set_now(100);
        let handle = scheduler.set_timeout(Duration::from_millis(10));
        assert!(scheduler.take_due(200).is_empty());
        assert_eq!(scheduler.take_due(510), vec![handle]);
    }
}
