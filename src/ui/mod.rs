//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - [`render`]: The portfolio page, the detail modal and the status bar

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::{link_picker_content_top, link_picker_rect};
pub use render::{ModalAreas, modal_areas, portfolio_area, portfolio_content_width, render};

/// Columns left blank on each side of the portfolio.
pub const PORTFOLIO_PADDING: u16 = 2;
/// Widest line the portfolio wraps to.
pub const MAX_CONTENT_WIDTH: u16 = 100;
/// Modal width at which the aside column is shown.
pub const ASIDE_MIN_WIDTH: u16 = 60;
pub const ASIDE_WIDTH: u16 = 24;
