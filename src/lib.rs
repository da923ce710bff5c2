// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. catalog::CatalogError)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! A terminal portfolio viewer with a paged production showcase.
//!
//! Folio reads a JSON catalog (profile, skills, career, production items)
//! and shows it as one scrollable page. Production items open in a paged
//! detail modal: an overview page followed by the item's markdown pages.
//!
//! ## Architecture
//!
//! Folio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The modal lifecycle is a separate state machine driven by frame and
//! timer callbacks that the event loop delivers.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`catalog`]: Catalog schema and loading
//! - [`document`]: Markdown-subset rendering and line layout
//! - [`modal`]: Paged modal controller and its scheduler
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: Catalog file watching

pub mod app;
pub mod catalog;
pub mod config;
pub mod document;
pub mod modal;
pub mod perf;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::catalog::{Catalog, ProductionItem};
    pub use crate::document::{DisplayBlock, PageLayout};
    pub use crate::modal::{ModalHost, ModalPhase, PagedModal};
    pub use crate::ui::viewport::Viewport;
}
