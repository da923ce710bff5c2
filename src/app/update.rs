use crate::app::Model;
use crate::modal::{DismissKey, ModalEvent, TaskHandle};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Portfolio navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to top of the portfolio
    GoToTop,
    /// Go to bottom of the portfolio
    GoToBottom,
    /// Select the previous production item
    SelectPrev,
    /// Select the next production item
    SelectNext,
    /// Select a production item by index
    SelectItem(usize),

    // Modal
    /// Open the selected production item
    OpenSelected,
    /// Open a production item by id
    OpenItem(String),
    /// Next modal page (closes on the last page)
    ModalNext,
    /// Previous modal page
    ModalPrev,
    /// Close the modal (button, backdrop)
    ModalClose,
    /// A registered dismiss key was pressed
    ModalDismiss(DismissKey),
    /// Frame callback requested by the modal
    ModalFrame(TaskHandle),
    /// Timer callback requested by the modal
    ModalTimer(TaskHandle),
    /// Scroll the modal body up
    ModalScrollUp(usize),
    /// Scroll the modal body down
    ModalScrollDown(usize),

    // Links
    /// Open visible-link picker (or follow directly when single link)
    OpenVisibleLinks,
    /// Follow numbered link in the picker
    SelectVisibleLink(u8),
    /// Close visible-link picker
    CancelVisibleLinkPicker,
    /// Open a link that was clicked
    FollowLink(String),

    // Catalog
    /// Toggle catalog watching
    ToggleWatch,
    /// Catalog file changed on disk
    CatalogChanged,
    /// Reload the catalog now
    ForceReload,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. The modal
/// only schedules callbacks through the model; nothing here touches the
/// terminal, the filesystem or the network.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),
        Message::SelectPrev => {
            model.selected = model.selected.saturating_sub(1);
            model.reveal_selected();
        }
        Message::SelectNext => {
            let last = model.catalog.production.len().saturating_sub(1);
            model.selected = (model.selected + 1).min(last);
            model.reveal_selected();
        }
        Message::SelectItem(idx) => {
            if idx < model.catalog.production.len() {
                model.selected = idx;
                model.reveal_selected();
            }
        }

        // Modal
        Message::OpenSelected => {
            if let Some(id) = model.selected_item().map(|item| item.id.clone()) {
                open_item(&mut model, &id);
            }
        }
        Message::OpenItem(id) => open_item(&mut model, &id),
        Message::ModalNext => {
            let before = model.modal.page_index();
            model.with_modal(|modal, host| modal.next_page(host));
            if model.modal.page_index() != before {
                model.refresh_modal_body(true);
            }
        }
        Message::ModalPrev => {
            let before = model.modal.page_index();
            model.modal.prev_page();
            if model.modal.page_index() != before {
                model.refresh_modal_body(true);
            }
        }
        Message::ModalClose => {
            model.with_modal(|modal, host| modal.close(host));
        }
        Message::ModalDismiss(key) => {
            model.with_modal(|modal, host| modal.handle_key(key, host));
        }
        Message::ModalFrame(handle) => model.modal.on_frame(handle),
        Message::ModalTimer(handle) => {
            if let Some(ModalEvent::Ended { item }) =
                model.with_modal(|modal, host| modal.on_timer(handle, host))
            {
                crate::perf::log_event("modal.ended", format!("item={item}"));
                model.modal_body = crate::document::PageLayout::default();
                model.link_picker_items.clear();
                if let Some(idx) = model.catalog.item_index(&item) {
                    model.selected = idx;
                }
                model.reveal_selected();
            }
        }
        Message::ModalScrollUp(n) => model.modal_viewport.scroll_up(n),
        Message::ModalScrollDown(n) => model.modal_viewport.scroll_down(n),

        // Links
        Message::CancelVisibleLinkPicker => model.link_picker_items.clear(),
        Message::OpenVisibleLinks
        | Message::SelectVisibleLink(_)
        | Message::FollowLink(_)
        | Message::CatalogChanged
        | Message::ForceReload
        | Message::Redraw => {}

        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.reflow_portfolio();
            if model.modal.is_open() {
                model.refresh_modal_body(false);
            }
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

/// Start a modal session for `id`. Unknown ids are ignored.
fn open_item(model: &mut Model, id: &str) {
    let Some(index) = model.catalog.item_index(id) else {
        tracing::debug!(id, "open requested for unknown item");
        return;
    };
    let pages = model.catalog.production[index].pages().len();
    model.selected = index;
    model.link_picker_items.clear();
    model.with_modal(|modal, host| modal.open(id, pages, host));
    model.refresh_modal_body(true);
}
