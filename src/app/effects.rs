use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::CatalogWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

impl App {
    pub(super) fn make_catalog_watcher(model: &Model) -> Option<notify::Result<CatalogWatcher>> {
        model
            .catalog_path
            .as_ref()
            .map(|path| CatalogWatcher::new(path, WATCH_DEBOUNCE))
    }

    /// Start watching, or explain why it is not possible.
    pub(super) fn start_watching(model: &mut Model, catalog_watcher: &mut Option<CatalogWatcher>) {
        match Self::make_catalog_watcher(model) {
            Some(Ok(watcher)) => {
                *catalog_watcher = Some(watcher);
                model.show_toast(ToastLevel::Info, "Watching catalog changes");
            }
            Some(Err(err)) => {
                model.watch_enabled = false;
                *catalog_watcher = None;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!(error = %err, "catalog watcher failed to start");
                crate::perf::log_event("watcher.error", format!("err={err}"));
            }
            None => {
                model.watch_enabled = false;
                *catalog_watcher = None;
                model.show_toast(ToastLevel::Info, "Bundled catalog cannot be watched");
            }
        }
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        catalog_watcher: &mut Option<CatalogWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    Self::start_watching(model, catalog_watcher);
                } else {
                    *catalog_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::CatalogChanged => {
                if model.catalog_path.is_none() {
                    if matches!(msg, Message::ForceReload) {
                        model.show_toast(ToastLevel::Info, "Bundled catalog has nothing to reload");
                    }
                } else if let Err(err) = model.reload_catalog() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    tracing::warn!(error = %format!("{err:#}"), "catalog reload failed");
                    crate::perf::log_event("reload.error", format!("err={err:#}"));
                } else if matches!(msg, Message::ForceReload) {
                    model.show_toast(ToastLevel::Info, "Reloaded");
                }
            }
            Message::OpenVisibleLinks => Self::open_visible_links(model),
            Message::SelectVisibleLink(index) => Self::follow_link_picker_index(model, *index),
            Message::FollowLink(url) => {
                model.link_picker_items.clear();
                Self::follow_resolved_link(model, url);
            }
            _ => {}
        }
    }

    fn open_visible_links(model: &mut Model) {
        let mut visible = model.visible_links();
        visible.truncate(9);

        match visible.len() {
            0 => model.show_toast(ToastLevel::Info, "No visible links"),
            1 => Self::follow_resolved_link(model, &visible[0].url),
            _ => {
                model.link_picker_items = visible;
                model.show_toast(ToastLevel::Info, "Select link: 1-9 (Esc to cancel)");
            }
        }
    }

    fn follow_link_picker_index(model: &mut Model, index: u8) {
        if index == 0 {
            return;
        }
        let idx = (index - 1) as usize;
        let Some(link) = model.link_picker_items.get(idx) else {
            return;
        };
        let url = link.url.clone();
        model.link_picker_items.clear();
        Self::follow_resolved_link(model, &url);
    }

    fn follow_resolved_link(model: &mut Model, url: &str) {
        match open_external_link(url) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {url}")),
            Err(err) => {
                tracing::warn!(url, error = %err, "failed to open link");
                model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
            }
        }
    }
}

fn open_external_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
}
