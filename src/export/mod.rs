pub mod to_csv_tables;
pub mod to_custom;
pub mod to_json;
pub mod to_outline;
pub mod to_svg;

/// Shared preparation of a finished document for the template based exporters.
pub mod renderer {
    use serde::Serialize;
    use serde_json::{json, Value};

    use crate::layout::text::{self, FontWeight, PT_TO_MM};
    use crate::layout::{Align, Document, Primitive, Rgb, Table};
    use crate::sections::CELL_PADDING;

    /// Vertical gap between pages when they are stacked into one canvas.
    pub const PAGE_GAP: f32 = 10.0;

    /// Flat, template friendly drawing operation in canvas millimetres.
    #[derive(Debug, Clone, Serialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum Shape {
        Rect {
            x: f32,
            y: f32,
            width: f32,
            height: f32,
            fill: Option<Rgb>,
            stroke: Option<Rgb>,
            radius: f32,
        },
        Line {
            x1: f32,
            y1: f32,
            x2: f32,
            y2: f32,
            color: Rgb,
            width: f32,
        },
        Circle {
            cx: f32,
            cy: f32,
            r: f32,
            fill: Option<Rgb>,
            stroke: Option<Rgb>,
        },
        Text {
            x: f32,
            y: f32,
            text: String,
            /// Font size converted to millimetres.
            size: f32,
            color: Rgb,
            bold: bool,
            align: Align,
        },
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct CanvasPage {
        pub number: usize,
        pub offset: f32,
        pub shapes: Vec<Shape>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct OutlinePage {
        pub number: usize,
        pub lines: Vec<String>,
        pub footer: String,
    }

    fn table_shapes(table: &Table, dy: f32, shapes: &mut Vec<Shape>) {
        let mut rows: Vec<(&[crate::layout::TableCell], bool)> = Vec::new();
        if !table.header.is_empty() {
            rows.push((table.header.as_slice(), true));
        }
        rows.extend(table.rows.iter().map(|row| (row.as_slice(), false)));

        for (index, (cells, is_header)) in rows.into_iter().enumerate() {
            let row_y = table.y + dy + index as f32 * table.row_height;
            let body_index = if table.header.is_empty() { index } else { index.saturating_sub(1) };
            let fill = if is_header {
                Some(table.header_fill)
            } else if body_index % 2 == 1 {
                table.stripe_fill
            } else {
                None
            };
            if fill.is_some() {
                shapes.push(Shape::Rect {
                    x: table.x,
                    y: row_y,
                    width: table.width(),
                    height: table.row_height,
                    fill,
                    stroke: None,
                    radius: 0.0,
                });
            }

            let baseline = row_y + table.row_height / 2.0 + text::ascent(table.font_size) / 2.0;
            let mut x = table.x;
            for (cell, width) in cells.iter().zip(&table.column_widths) {
                let color = match (cell.color, is_header) {
                    (Some(color), _) => color,
                    (None, true) => table.header_color,
                    (None, false) => table.text_color,
                };
                shapes.push(Shape::Text {
                    x: x + CELL_PADDING,
                    y: baseline,
                    text: cell.text.clone(),
                    size: table.font_size * PT_TO_MM,
                    color,
                    bold: is_header || cell.weight == Some(FontWeight::Bold),
                    align: Align::Left,
                });
                x += width;
            }
        }

        shapes.push(Shape::Rect {
            x: table.x,
            y: table.y + dy,
            width: table.width(),
            height: table.height(),
            fill: None,
            stroke: Some(table.header_fill),
            radius: 0.0,
        });
    }

    fn primitive_shapes(primitive: &Primitive, dy: f32, shapes: &mut Vec<Shape>) {
        match primitive {
            Primitive::Text(run) => shapes.push(Shape::Text {
                x: run.x,
                y: run.y + dy,
                text: run.text.clone(),
                size: run.size * PT_TO_MM,
                color: run.color,
                bold: run.weight == FontWeight::Bold,
                align: run.align,
            }),
            Primitive::Rect(rect) => shapes.push(Shape::Rect {
                x: rect.x,
                y: rect.y + dy,
                width: rect.width,
                height: rect.height,
                fill: rect.fill,
                stroke: rect.stroke,
                radius: rect.radius.unwrap_or(0.0),
            }),
            Primitive::Line(line) => shapes.push(Shape::Line {
                x1: line.x1,
                y1: line.y1 + dy,
                x2: line.x2,
                y2: line.y2 + dy,
                color: line.color,
                width: line.width,
            }),
            Primitive::Circle(circle) => shapes.push(Shape::Circle {
                cx: circle.cx,
                cy: circle.cy + dy,
                r: circle.r,
                fill: circle.fill,
                stroke: circle.stroke,
            }),
            Primitive::Table(table) => table_shapes(table, dy, shapes),
        }
    }

    /// Every page laid out below the previous one on a single canvas.
    pub fn canvas_pages(document: &Document) -> Vec<CanvasPage> {
        document
            .pages
            .iter()
            .map(|page| {
                let offset = page.index as f32 * (document.page_height + PAGE_GAP);
                let mut shapes = Vec::new();
                for primitive in page.primitives() {
                    primitive_shapes(primitive, offset, &mut shapes);
                }
                CanvasPage {
                    number: page.number(),
                    offset,
                    shapes,
                }
            })
            .collect()
    }

    pub fn canvas_height(document: &Document) -> f32 {
        let pages = document.page_count() as f32;
        pages * document.page_height + (pages - 1.0).max(0.0) * PAGE_GAP
    }

    /// Text of each page in reading order: top to bottom, then left to right. Table rows
    /// become one line with cells separated by `|`.
    pub fn outline_pages(document: &Document) -> Vec<OutlinePage> {
        document
            .pages
            .iter()
            .map(|page| {
                let mut entries: Vec<(f32, f32, String)> = Vec::new();
                for primitive in &page.body {
                    match primitive {
                        Primitive::Text(run) if !run.text.trim().is_empty() => {
                            entries.push((run.y, run.x, run.text.clone()))
                        }
                        Primitive::Table(table) => {
                            let rows = std::iter::once(&table.header)
                                .filter(|header| !header.is_empty())
                                .chain(table.rows.iter());
                            for (i, row) in rows.enumerate() {
                                let line = row
                                    .iter()
                                    .map(|cell| cell.text.as_str())
                                    .collect::<Vec<_>>()
                                    .join(" | ");
                                entries.push((table.y + i as f32 * table.row_height, table.x, line));
                            }
                        }
                        _ => {}
                    }
                }
                entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

                let footer = page
                    .decorations
                    .iter()
                    .filter_map(|p| match p {
                        Primitive::Text(run) => Some(run.text.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("  ");

                OutlinePage {
                    number: page.number(),
                    lines: entries.into_iter().map(|(_, _, line)| line).collect(),
                    footer,
                }
            })
            .collect()
    }

    /// Context handed to the outline and custom templates.
    pub fn create_standard_context(document: &Document) -> Value {
        json!({
            "title": document.title,
            "theme": document.theme,
            "page_count": document.page_count(),
            "page_width": document.page_width,
            "page_height": document.page_height,
            "pages": outline_pages(document),
            "tables": document
                .tables()
                .map(|(page, table)| json!({ "page": page, "header": table.header, "rows": table.rows }))
                .collect::<Vec<_>>(),
            "document": document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::renderer::*;
    use crate::layout::{Document, LayoutConfig, Paginator, Rgb, Table, TableCell, TextRun};

    fn document() -> Document {
        let mut pager = Paginator::new(LayoutConfig::default());
        pager.draw(TextRun::new(20.0, 60.0, "second", 10.0, Rgb::BLACK));
        pager.draw(TextRun::new(20.0, 40.0, "first", 10.0, Rgb::BLACK));
        pager.draw(Table {
            x: 20.0,
            y: 80.0,
            column_widths: vec![30.0, 30.0],
            row_height: 7.0,
            font_size: 9.0,
            header_fill: Rgb::BLACK,
            header_color: Rgb::WHITE,
            text_color: Rgb::BLACK,
            stripe_fill: Some(Rgb(240, 240, 240)),
            header: vec![TableCell::text("Key"), TableCell::text("Value")],
            rows: vec![
                vec![TableCell::text("a"), TableCell::text("1")],
                vec![TableCell::text("b"), TableCell::text("2")],
            ],
        });
        pager.break_page();
        pager.finish("Doc", "professional", |info| {
            vec![TextRun::new(20.0, 290.0, format!("Page {} of {}", info.number, info.total), 8.0, Rgb::BLACK).into()]
        })
    }

    #[test]
    fn test_outline_is_in_reading_order() {
        let pages = outline_pages(&document());
        assert_eq!(pages[0].lines, vec!["first", "second", "Key | Value", "a | 1", "b | 2"]);
        assert_eq!(pages[1].footer, "Page 2 of 2");
    }

    #[test]
    fn test_canvas_offsets_pages() {
        let document = document();
        let pages = canvas_pages(&document);
        assert_eq!(pages[1].offset, document.page_height + PAGE_GAP);
        assert_eq!(canvas_height(&document), 2.0 * document.page_height + PAGE_GAP);
    }
}
