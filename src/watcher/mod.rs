//! Catalog file watching for live reload.
//!
//! Uses the notify crate for cross-platform file system events. Events
//! arrive on notify's own thread and are drained without blocking by the
//! event loop, which passes in its clock so debouncing shares the loop's
//! time base.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the catalog file and reports debounced changes.
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debouncer: ChangeDebouncer,
}

impl std::fmt::Debug for CatalogWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWatcher")
            .field("target_path", &self.target_path)
            .field("watch_root", &self.watch_root)
            .finish_non_exhaustive()
    }
}

impl CatalogWatcher {
    /// Create a watcher for the catalog at `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the containing
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are absolute and canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        // Editors often replace the file, so watch the directory.
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debouncer: ChangeDebouncer::new(debounce),
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Drain pending events. Returns true once a change has settled.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let mut relevant = 0u32;
        let mut total = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "catalog watcher error");
                    crate::perf::log_event("watcher.error", format!("{err}"));
                }
            }
        }
        if total > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "total={total} relevant={relevant} target={}",
                    self.target_path.display()
                ),
            );
        }
        if relevant > 0 {
            self.debouncer.mark(now_ms);
        }
        self.debouncer.take_ready(now_ms)
    }

    pub const fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

/// Trailing-edge debounce: fires once `delay` after the last mark.
#[derive(Debug, Clone)]
struct ChangeDebouncer {
    delay_ms: u64,
    pending_since: Option<u64>,
}

impl ChangeDebouncer {
    fn new(delay: Duration) -> Self {
        Self {
            delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            pending_since: None,
        }
    }

    const fn mark(&mut self, now_ms: u64) {
        self.pending_since = Some(now_ms);
    }

    fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        if now_ms.saturating_sub(since) >= self.delay_ms {
            self.pending_since = None;
            return true;
        }
        false
    }

    const fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
