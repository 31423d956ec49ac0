//! Page-break policy and document finalization.
//!
//! The paginator owns the page list. Section renderers thread the vertical cursor
//! through their return values and ask [`Paginator::place`] where each block goes before
//! drawing it. A block that does not fit above the footer reserve moves, whole, to the
//! top of a new page; blocks are never split.

use tracing::{debug, warn};

use super::document::{Document, Page, Primitive};
use super::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// Cursor advancing within the current page.
    Accumulating,
    /// The last placement started a new page.
    Paginating,
}

/// Cursor position after a placement or a whole section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub y: f32,
    pub page_break: bool,
}

impl Advance {
    pub fn stay(y: f32) -> Self {
        Self {
            y,
            page_break: false,
        }
    }

    /// Continue from `self` to `next`, remembering whether either step broke a page.
    pub fn then(self, next: Advance) -> Advance {
        Advance {
            y: next.y,
            page_break: self.page_break || next.page_break,
        }
    }

    pub fn offset(self, dy: f32) -> Advance {
        Advance {
            y: self.y + dy,
            page_break: self.page_break,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// One based.
    pub number: usize,
    pub total: usize,
}

pub struct Paginator {
    config: LayoutConfig,
    pages: Vec<Page>,
    state: PaginationState,
}

impl Paginator {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            pages: vec![Page::new(0)],
            state: PaginationState::Accumulating,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Zero based index of the page being drawn.
    pub fn current_page(&self) -> usize {
        self.pages.len() - 1
    }

    /// Decide where a block of `height` starting at `y` is drawn.
    pub fn place(&mut self, y: f32, height: f32) -> Advance {
        let bottom = self.config.content_bottom();
        if y + height <= bottom {
            self.state = PaginationState::Accumulating;
            return Advance::stay(y);
        }

        if self.is_fresh_page(y) {
            warn!(
                "Block of {:.1}mm exceeds page capacity of {:.1}mm on page {}",
                height,
                bottom - y,
                self.current_page() + 1
            );
            self.state = PaginationState::Accumulating;
            return Advance::stay(y);
        }

        let top = self.break_page();
        debug!(
            "Block of {:.1}mm at y={:.1} does not fit, moved to page {}",
            height,
            y,
            self.current_page() + 1
        );
        if height > self.config.page_capacity() {
            warn!(
                "Block of {:.1}mm is taller than a page ({:.1}mm)",
                height,
                self.config.page_capacity()
            );
        }
        Advance {
            y: top,
            page_break: true,
        }
    }

    /// Start a new page unconditionally and return the first content y on it.
    pub fn break_page(&mut self) -> f32 {
        let index = self.pages.len();
        self.pages.push(Page::new(index));
        self.state = PaginationState::Paginating;
        self.config.content_top()
    }

    pub fn draw(&mut self, primitive: impl Into<Primitive>) {
        if let Some(page) = self.pages.last_mut() {
            page.body.push(primitive.into());
        }
    }

    pub fn draw_all<I, P>(&mut self, primitives: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<Primitive>,
    {
        for primitive in primitives {
            self.draw(primitive);
        }
    }

    /// Stamp every page now that the total is known and hand back the document.
    pub fn finish<F>(self, title: &str, theme: &str, mut decorate: F) -> Document
    where
        F: FnMut(PageInfo) -> Vec<Primitive>,
    {
        let total = self.pages.len();
        let mut pages = self.pages;
        for page in pages.iter_mut() {
            let info = PageInfo {
                number: page.number(),
                total,
            };
            page.decorations = decorate(info);
        }
        debug!("Finalized document '{}' with {} page(s)", title, total);

        Document {
            title: title.to_string(),
            theme: theme.to_string(),
            page_width: self.config.page_width(),
            page_height: self.config.page_height(),
            pages,
        }
    }

    fn is_fresh_page(&self, y: f32) -> bool {
        self.pages.last().map_or(true, |page| page.body.is_empty()) && y <= self.config.content_top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RectShape, Rgb};

    fn pager() -> Paginator {
        Paginator::new(LayoutConfig::default())
    }

    #[test]
    fn test_block_that_fits_stays() {
        let mut pager = pager();
        let advance = pager.place(100.0, 50.0);
        assert_eq!(advance, Advance::stay(100.0));
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.state(), PaginationState::Accumulating);
    }

    #[test]
    fn test_block_that_overflows_moves_to_new_page() {
        let mut pager = pager();
        pager.draw(RectShape::filled(20.0, 200.0, 10.0, 10.0, Rgb::BLACK));
        let bottom = pager.config().content_bottom();
        let advance = pager.place(bottom - 5.0, 10.0);
        assert!(advance.page_break);
        assert_eq!(advance.y, pager.config().content_top());
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.state(), PaginationState::Paginating);

        pager.place(advance.y, 10.0);
        assert_eq!(pager.state(), PaginationState::Accumulating);
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        let mut pager = pager();
        let bottom = pager.config().content_bottom();
        assert!(!pager.place(bottom - 10.0, 10.0).page_break);
    }

    #[test]
    fn test_oversized_block_on_fresh_page_is_not_pushed_again() {
        let mut pager = pager();
        let top = pager.break_page();
        let advance = pager.place(top, 10_000.0);
        assert!(!advance.page_break);
        assert_eq!(pager.page_count(), 2);
    }

    #[test]
    fn test_finish_stamps_true_page_count() {
        let mut pager = pager();
        pager.break_page();
        pager.break_page();
        let mut seen = Vec::new();
        let document = pager.finish("Report", "professional", |info| {
            seen.push((info.number, info.total));
            Vec::new()
        });
        assert_eq!(document.page_count(), 3);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_advance_then_keeps_break_flag() {
        let a = Advance {
            y: 10.0,
            page_break: true,
        };
        let b = a.then(Advance::stay(30.0));
        assert_eq!(b.y, 30.0);
        assert!(b.page_break);
    }
}
