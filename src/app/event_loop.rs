use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::catalog::Catalog;
use crate::watcher::CatalogWatcher;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded, the terminal
    /// cannot be initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let load_scope = crate::perf::scope("app.load_catalog");
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::bundled()?,
        };
        drop(load_scope);
        tracing::info!(
            items = catalog.production.len(),
            path = ?self.catalog_path,
            "catalog loaded"
        );

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: folio requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);
        crate::perf::log_event(
            "init.layout",
            format!("terminal={}x{}", size.width, size.height),
        );

        let mut model = Model::new(catalog, self.catalog_path.clone(), (size.width, size.height))
            .with_close_delay(self.close_delay);
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        if let Some(id) = &self.open_item {
            if model.catalog.item(id).is_some() {
                model = update(model, Message::OpenItem(id.clone()));
            } else {
                model.show_toast(ToastLevel::Warning, format!("No production item '{id}'"));
            }
        }

        let result = execute!(stdout(), EnableMouseCapture)
            .map_err(anyhow::Error::from)
            .and_then(|()| Self::event_loop(&mut terminal, &mut model));

        // Release the scroll lock and pending callbacks even on error.
        model.with_modal(|modal, host| modal.dispose(host));

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Apply a message to the model and run its side effects.
    fn dispatch(model: &mut Model, catalog_watcher: &mut Option<CatalogWatcher>, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, catalog_watcher, &side_msg);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut catalog_watcher = None;
        if model.watch_enabled {
            Self::start_watching(model, &mut catalog_watcher);
        }
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = elapsed_ms(start);
            model.scheduler.set_now(now_ms);

            for handle in model.scheduler.take_due(now_ms) {
                crate::perf::log_event("modal.timer", format!("frame={frame_idx} {handle:?}"));
                Self::dispatch(model, &mut catalog_watcher, Message::ModalTimer(handle));
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && catalog_watcher
                    .as_mut()
                    .is_some_and(|watcher| watcher.poll(now_ms))
            {
                Self::dispatch(model, &mut catalog_watcher, Message::CatalogChanged);
                needs_render = true;
            }

            // Handle events
            let frame_pending = model.scheduler.has_pending_frame();
            let poll_ms = if needs_render || frame_pending {
                0
            } else if resize_debouncer.is_pending()
                || model.scheduler.has_pending_timer()
                || catalog_watcher
                    .as_ref()
                    .is_some_and(CatalogWatcher::is_pending)
            {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                loop {
                    // Refresh timestamp after poll wait so debouncers and
                    // timers use accurate times.
                    let event_ms = elapsed_ms(start);
                    model.scheduler.set_now(event_ms);
                    let msg =
                        Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        if matches!(msg, Message::Redraw) {
                            terminal.clear()?;
                        }
                        Self::dispatch(model, &mut catalog_watcher, msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                if drained > 1 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render || model.scheduler.has_pending_frame() {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} phase={:?}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.modal.phase()
                    ),
                );
                needs_render = false;

                // Frame callbacks run once the frame they waited for is on screen.
                for handle in model.scheduler.frame_rendered() {
                    Self::dispatch(model, &mut catalog_watcher, Message::ModalFrame(handle));
                    needs_render = true;
                }
            }
        }
        Ok(())
    }
}
