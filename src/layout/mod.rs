pub mod document;
pub mod pagination;
pub mod text;

use serde::{Deserialize, Serialize};

pub use document::{
    Align, Bounds, CircleShape, Document, LineShape, Page, Primitive, RectShape, Rgb, Table,
    TableCell, TextRun,
};
pub use pagination::{Advance, PageInfo, PaginationState, Paginator};
pub use text::FontWeight;

#[derive(Serialize, Deserialize, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// Smallest top margin that still leaves room for the running header.
pub const MIN_TOP_MARGIN: f32 = 18.0;
/// Smallest footer reserve that still fits the footer rule and text.
pub const MIN_FOOTER_RESERVE: f32 = 12.0;

/// Page geometry and content limits for one report.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    /// Left and right margin.
    pub margin: f32,
    /// Where content resumes on a continuation page; never below `MIN_TOP_MARGIN`.
    pub top_margin: f32,
    /// Space kept free at the bottom of every page for the footer; never below
    /// `MIN_FOOTER_RESERVE`.
    pub footer_reserve: f32,
    /// Rows shown in the findings summary table.
    pub findings_table_limit: usize,
    pub description_max_lines: usize,
    pub solution_max_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 20.0,
            top_margin: 22.0,
            footer_reserve: 20.0,
            findings_table_limit: 10,
            description_max_lines: 6,
            solution_max_lines: 8,
        }
    }
}

impl LayoutConfig {
    pub fn page_width(&self) -> f32 {
        self.page_size.dimensions().0
    }

    pub fn page_height(&self) -> f32 {
        self.page_size.dimensions().1
    }

    pub fn content_width(&self) -> f32 {
        self.page_width() - 2.0 * self.margin
    }

    /// First body y on a continuation page.
    pub fn content_top(&self) -> f32 {
        self.top_margin.max(MIN_TOP_MARGIN)
    }

    /// Lowest y any body primitive may reach.
    pub fn content_bottom(&self) -> f32 {
        self.page_height() - self.footer_reserve.max(MIN_FOOTER_RESERVE)
    }

    /// Height available on a fresh continuation page.
    pub fn page_capacity(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_partial_yaml_uses_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("page_size: Letter\nmargin: 15").unwrap();
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.margin, 15.0);
        assert_eq!(config.findings_table_limit, 10);
        assert!((config.content_width() - 185.9).abs() < 1e-3);
    }

    #[test]
    fn test_small_margins_keep_room_for_decorations() {
        let config = LayoutConfig {
            top_margin: 5.0,
            footer_reserve: 5.0,
            ..Default::default()
        };
        assert_eq!(config.content_top(), MIN_TOP_MARGIN);
        assert_eq!(config.content_bottom(), 297.0 - MIN_FOOTER_RESERVE);

        let config = LayoutConfig {
            top_margin: 30.0,
            footer_reserve: 25.0,
            ..Default::default()
        };
        assert_eq!(config.content_top(), 30.0);
        assert_eq!(config.content_bottom(), 272.0);
    }
}
