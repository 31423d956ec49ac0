//! Section renderers.
//!
//! Every renderer has the shape `render(y, ctx, data, pager) -> Advance`: it receives the
//! cursor by value, lays its content out as one or more [`Block`]s of known height,
//! lets the paginator decide where each block lands and returns the cursor below the
//! last block. A block is never split across pages.

pub mod ai_analysis;
pub mod banner;
pub mod decorations;
pub mod details;
pub mod executive;
pub mod findings;
pub mod recommendations;
pub mod risk;
pub mod severity;
pub mod summary;

use crate::layout::text::{self, FontWeight};
use crate::layout::{
    Advance, LayoutConfig, LineShape, Paginator, Primitive, Rgb, Table, TableCell, TextRun,
};
use crate::theme::Theme;

/// Vertical space between sections.
pub const SECTION_GAP: f32 = 8.0;
pub const HEADING_HEIGHT: f32 = 10.0;
const HEADING_SIZE: f32 = 14.0;

pub const MUTED: Rgb = Rgb(107, 114, 128);
pub const BORDER: Rgb = Rgb(209, 213, 219);

pub const TABLE_ROW_HEIGHT: f32 = 7.0;
pub const TABLE_FONT_SIZE: f32 = 9.0;
/// Horizontal padding inside a table cell.
pub const CELL_PADDING: f32 = 2.0;

/// Resolved inputs shared by every renderer of one document.
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    pub theme: &'a Theme,
    pub layout: &'a LayoutConfig,
}

impl<'a> SectionContext<'a> {
    pub fn new(theme: &'a Theme, layout: &'a LayoutConfig) -> Self {
        Self { theme, layout }
    }

    pub fn left(&self) -> f32 {
        self.layout.margin
    }

    pub fn right(&self) -> f32 {
        self.layout.page_width() - self.layout.margin
    }

    pub fn width(&self) -> f32 {
        self.layout.content_width()
    }
}

/// Primitives laid out from y = 0 together with their total height.
#[derive(Debug, Default)]
pub struct Block {
    pub height: f32,
    pub primitives: Vec<Primitive>,
}

impl Block {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Append `other` below this block.
    pub fn stack(mut self, other: Block) -> Block {
        let offset = self.height;
        self.primitives
            .extend(other.primitives.into_iter().map(|mut p| {
                p.shift_y(offset);
                p
            }));
        self.height += other.height;
        self
    }

    /// Add empty space below the block.
    pub fn pad(mut self, dy: f32) -> Block {
        self.height += dy;
        self
    }

    /// Place on the page and draw; returns the cursor just below the block.
    pub fn draw(self, y: f32, pager: &mut Paginator) -> Advance {
        let placed = pager.place(y, self.height);
        for mut primitive in self.primitives {
            primitive.shift_y(placed.y);
            pager.draw(primitive);
        }
        placed.offset(self.height)
    }
}

/// Bold section title with an accent rule underneath.
pub fn heading(ctx: &SectionContext, title: &str) -> Block {
    let mut block = Block::new(HEADING_HEIGHT);
    block.push(TextRun::new(ctx.left(), 5.5, title, HEADING_SIZE, ctx.theme.dark).bold());
    block.push(LineShape {
        x1: ctx.left(),
        y1: 8.0,
        x2: ctx.left() + 30.0,
        y2: 8.0,
        color: ctx.theme.primary,
        width: 0.8,
    });
    block
}

/// Left-aligned wrapped paragraph; baseline of the first line sits one ascent below 0.
pub fn paragraph(
    lines: &[String],
    x: f32,
    size: f32,
    color: Rgb,
) -> Block {
    let mut block = Block::new(text::block_height(lines.len(), size));
    let mut baseline = text::ascent(size);
    for line in lines {
        block.push(TextRun::new(x, baseline, line.clone(), size, color));
        baseline += text::line_height(size);
    }
    block
}

pub fn table_column_text(text: &str, width: f32) -> String {
    text::truncate(text, width - 2.0 * CELL_PADDING, TABLE_FONT_SIZE)
}

/// Bold cells fit their column as well.
fn fit_cell(cell: TableCell, width: f32) -> TableCell {
    let weight = cell.weight.unwrap_or(FontWeight::Regular);
    let text = text::truncate_with(&cell.text, width - 2.0 * CELL_PADDING, TABLE_FONT_SIZE, weight);
    TableCell { text, ..cell }
}

fn table_block(
    ctx: &SectionContext,
    column_widths: &[f32],
    header: &[TableCell],
    rows: Vec<Vec<TableCell>>,
) -> Block {
    let fit = |row: Vec<TableCell>| -> Vec<TableCell> {
        row.into_iter()
            .zip(column_widths)
            .map(|(cell, width)| fit_cell(cell, *width))
            .collect()
    };
    let table = Table {
        x: ctx.left(),
        y: 0.0,
        column_widths: column_widths.to_vec(),
        row_height: TABLE_ROW_HEIGHT,
        font_size: TABLE_FONT_SIZE,
        header_fill: ctx.theme.primary,
        header_color: Rgb::WHITE,
        text_color: ctx.theme.dark,
        stripe_fill: Some(ctx.theme.light),
        header: fit(header.to_vec()),
        rows: rows.into_iter().map(fit).collect(),
    };
    let mut block = Block::new(table.height());
    block.push(table);
    block
}

/// Render a titled table, splitting it into page-sized tables between rows. The header
/// row repeats on every page and the title always travels with the first rows.
pub fn render_table(
    y: f32,
    ctx: &SectionContext,
    title: Option<&str>,
    column_widths: &[f32],
    header: &[TableCell],
    rows: Vec<Vec<TableCell>>,
    pager: &mut Paginator,
) -> Advance {
    let mut advance = Advance::stay(y);
    let mut lead = title.map(|t| heading(ctx, t));
    let mut remaining = rows.into_iter().peekable();

    loop {
        let lead_height = lead.as_ref().map_or(0.0, |b| b.height);
        let bottom = ctx.layout.content_bottom();
        let room_here = bottom - advance.y - lead_height;
        let room_fresh = ctx.layout.page_capacity() - lead_height;
        let fit_rows = |room: f32| ((room / TABLE_ROW_HEIGHT).floor() as isize - 1).max(0) as usize;

        let mut take = fit_rows(room_here);
        if take == 0 {
            take = fit_rows(room_fresh).max(1);
        }
        let chunk: Vec<_> = remaining.by_ref().take(take).collect();
        let block = match lead.take() {
            Some(lead) => lead.stack(table_block(ctx, column_widths, header, chunk)),
            None => table_block(ctx, column_widths, header, chunk),
        };
        advance = advance.then(block.draw(advance.y, pager));

        if remaining.peek().is_none() {
            return advance;
        }
    }
}

/// Label / value pair on one line, value truncated to the remaining width.
pub fn key_value(
    x: f32,
    baseline: f32,
    width: f32,
    key: &str,
    value: &str,
    size: f32,
    color: Rgb,
) -> [Primitive; 2] {
    const KEY_WIDTH: f32 = 28.0;
    [
        TextRun::new(x, baseline, format!("{key}:"), size, color)
            .bold()
            .into(),
        TextRun::new(
            x + KEY_WIDTH,
            baseline,
            text::truncate(value, width - KEY_WIDTH, size),
            size,
            color,
        )
        .into(),
    ]
}
