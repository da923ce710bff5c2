//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod host;
mod input;
mod model;
mod pages;
mod update;

pub use model::{Model, ToastLevel};
pub use pages::{Portfolio, item_links, item_plain_text, page_blocks, page_label, page_layout};
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::modal::DEFAULT_CLOSE_DELAY;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    catalog_path: Option<PathBuf>,
    watch_enabled: bool,
    close_delay: Duration,
    open_item: Option<String>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for a catalog file, or the bundled sample
    /// when `catalog_path` is `None`.
    pub const fn new(catalog_path: Option<PathBuf>) -> Self {
        Self {
            catalog_path,
            watch_enabled: false,
            close_delay: DEFAULT_CLOSE_DELAY,
            open_item: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable catalog watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Time the modal keeps rendering after a close request.
    #[must_use]
    pub const fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Open this production item as soon as the app starts.
    #[must_use]
    pub fn with_open_item(mut self, id: Option<String>) -> Self {
        self.open_item = id;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
