//! Drawing primitives and the page/document structure handed to exporters.
//!
//! Coordinates are millimetres from the top-left corner of a page. Text runs are
//! anchored at their baseline.

use serde::{Deserialize, Serialize};

use super::text::{self, FontWeight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub color: Rgb,
    pub weight: FontWeight,
    pub align: Align,
}

impl TextRun {
    pub fn new(x: f32, y: f32, text: impl Into<String>, size: f32, color: Rgb) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size,
            color,
            weight: FontWeight::Regular,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    /// Corner radius; `None` draws a sharp rectangle.
    pub radius: Option<f32>,
}

impl RectShape {
    pub fn filled(x: f32, y: f32, width: f32, height: f32, fill: Rgb) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
            radius: None,
        }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn stroked(mut self, stroke: Rgb) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Rgb,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleShape {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableCell {
    pub text: String,
    pub color: Option<Rgb>,
    pub weight: Option<FontWeight>,
}

impl TableCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub x: f32,
    pub y: f32,
    pub column_widths: Vec<f32>,
    pub row_height: f32,
    pub font_size: f32,
    pub header_fill: Rgb,
    pub header_color: Rgb,
    pub text_color: Rgb,
    /// Fill for every other body row.
    pub stripe_fill: Option<Rgb>,
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    pub fn height(&self) -> f32 {
        let header = if self.header.is_empty() { 0.0 } else { 1.0 };
        (header + self.rows.len() as f32) * self.row_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Text(TextRun),
    Rect(RectShape),
    Line(LineShape),
    Circle(CircleShape),
    Table(Table),
}

impl Primitive {
    /// Move vertically by `dy`.
    pub fn shift_y(&mut self, dy: f32) {
        match self {
            Primitive::Text(run) => run.y += dy,
            Primitive::Rect(rect) => rect.y += dy,
            Primitive::Line(line) => {
                line.y1 += dy;
                line.y2 += dy;
            }
            Primitive::Circle(circle) => circle.cy += dy,
            Primitive::Table(table) => table.y += dy,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Text(run) => {
                let width = text::text_width(&run.text, run.size, run.weight);
                let x = match run.align {
                    Align::Left => run.x,
                    Align::Center => run.x - width / 2.0,
                    Align::Right => run.x - width,
                };
                let ascent = text::ascent(run.size);
                Bounds {
                    x,
                    y: run.y - ascent,
                    width,
                    height: ascent + text::descent(run.size),
                }
            }
            Primitive::Rect(rect) => Bounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            },
            Primitive::Line(line) => Bounds {
                x: line.x1.min(line.x2),
                y: line.y1.min(line.y2),
                width: (line.x2 - line.x1).abs(),
                height: (line.y2 - line.y1).abs(),
            },
            Primitive::Circle(circle) => Bounds {
                x: circle.cx - circle.r,
                y: circle.cy - circle.r,
                width: circle.r * 2.0,
                height: circle.r * 2.0,
            },
            Primitive::Table(table) => Bounds {
                x: table.x,
                y: table.y,
                width: table.width(),
                height: table.height(),
            },
        }
    }
}

impl From<TextRun> for Primitive {
    fn from(run: TextRun) -> Self {
        Primitive::Text(run)
    }
}

impl From<RectShape> for Primitive {
    fn from(rect: RectShape) -> Self {
        Primitive::Rect(rect)
    }
}

impl From<LineShape> for Primitive {
    fn from(line: LineShape) -> Self {
        Primitive::Line(line)
    }
}

impl From<CircleShape> for Primitive {
    fn from(circle: CircleShape) -> Self {
        Primitive::Circle(circle)
    }
}

impl From<Table> for Primitive {
    fn from(table: Table) -> Self {
        Primitive::Table(table)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    /// Zero based.
    pub index: usize,
    pub body: Vec<Primitive>,
    /// Running header and footer, stamped once the page count is known.
    pub decorations: Vec<Primitive>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.body.iter().chain(self.decorations.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    pub theme: String,
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.pages.iter().flat_map(|page| {
            page.body.iter().filter_map(move |p| match p {
                Primitive::Table(table) => Some((page.number(), table)),
                _ => None,
            })
        })
    }

    /// True when any text run or table cell on any page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        let in_runs = self
            .pages
            .iter()
            .flat_map(|page| page.texts())
            .any(|run| run.text.contains(needle));
        in_runs
            || self.tables().any(|(_, table)| {
                table
                    .header
                    .iter()
                    .chain(table.rows.iter().flatten())
                    .any(|cell| cell.text.contains(needle))
            })
    }
}
