//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible window over a list of
//! rendered lines and handles all scroll operations. Scrolling can be
//! switched off while something is layered on top (the detail modal locks
//! the portfolio behind it).

use std::ops::Range;

/// Manages the visible portion of a rendered page.
///
/// # Example
///
/// ```
/// use folio::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
///
/// vp.set_scroll_enabled(false);
/// vp.scroll_down(10);
/// assert_eq!(vp.offset(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
    scroll_enabled: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24, 0)
    }
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in columns
    /// * `height` - Height in lines
    /// * `total_lines` - Total lines in the content
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
            scroll_enabled: true,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Whether user scrolling currently moves the viewport.
    pub const fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub const fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    /// Get the range of visible lines, clamped to the content bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if self.total_lines == 0 || max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        if self.scroll_enabled {
            self.offset = self.offset.saturating_sub(n);
        }
    }

    pub fn scroll_down(&mut self, n: usize) {
        if self.scroll_enabled {
            self.offset = (self.offset + n).min(self.max_offset());
        }
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        if self.scroll_enabled {
            self.offset = 0;
        }
    }

    pub const fn go_to_bottom(&mut self) {
        if self.scroll_enabled {
            self.offset = self.max_offset();
        }
    }

    /// Scroll the minimum amount that puts `line` inside the window.
    pub fn reveal_line(&mut self, line: usize) {
        if !self.scroll_enabled {
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if self.height > 0 && line >= self.offset + self.height as usize {
            self.offset = (line + 1 - self.height as usize).min(self.max_offset());
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total number of lines (e.g. after a reload or re-layout).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_at_bottom() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.visible_range(), 76..100);
    }

    #[test]
    fn test_visible_range_with_short_content() {
        let vp = Viewport::new(80, 24, 10);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(10);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_half_page_down() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.half_page_down();
        assert_eq!(vp.offset(), 12);
    }

    #[test]
    fn test_locked_viewport_ignores_every_scroll() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(30);
        vp.set_scroll_enabled(false);
        vp.scroll_down(5);
        vp.scroll_up(5);
        vp.page_down();
        vp.go_to_top();
        vp.go_to_bottom();
        vp.reveal_line(90);
        assert_eq!(vp.offset(), 30);

        vp.set_scroll_enabled(true);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_reveal_line_scrolls_minimally() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.reveal_line(5);
        assert_eq!(vp.offset(), 0);
        vp.reveal_line(15);
        assert_eq!(vp.offset(), 6);
        vp.reveal_line(2);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_scroll_percent_short_content() {
        let vp = Viewport::new(80, 24, 10);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(50);
        vp.resize(80, 60);
        assert_eq!(vp.offset(), 40);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset_even_when_locked() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(80);
        vp.set_scroll_enabled(false);
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                scroll_amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(scroll_amount);

                let max = total_lines.saturating_sub(height as usize);
                prop_assert!(vp.offset() <= max);
            }

            #[test]
            fn visible_range_within_bounds(
                total_lines in 0..10000usize,
                height in 1..100u16,
                offset in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(offset);

                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
            }

            #[test]
            fn reveal_line_makes_line_visible(
                total_lines in 1..5000usize,
                height in 1..100u16,
                line_seed in 0..5000usize,
            ) {
                let line = line_seed % total_lines;
                let mut vp = Viewport::new(80, height, total_lines);
                vp.reveal_line(line);
                prop_assert!(vp.visible_range().contains(&line));
            }
        }
    }
}
