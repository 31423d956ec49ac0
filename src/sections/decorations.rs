use crate::layout::{text, Align, LineShape, PageInfo, Primitive, TextRun};

use super::{SectionContext, MUTED};

/// Footer rule sits this far below the content area; the footer text follows it.
const FOOTER_RULE_GAP: f32 = 4.0;
const FOOTER_TEXT_GAP: f32 = 5.0;
/// Header rule sits this far above the first body line; the header text above it.
const HEADER_RULE_GAP: f32 = 5.0;
const HEADER_TEXT_GAP: f32 = 5.0;

/// Running footer for every page and a running header for continuation pages. Called
/// once per page after layout, when the total page count is known.
pub fn stamp(ctx: &SectionContext, title: &str, brand: &str, info: PageInfo) -> Vec<Primitive> {
    let line_y = ctx.layout.content_bottom() + FOOTER_RULE_GAP;
    let text_y = line_y + FOOTER_TEXT_GAP;
    let mut primitives: Vec<Primitive> = vec![
        LineShape {
            x1: ctx.left(),
            y1: line_y,
            x2: ctx.right(),
            y2: line_y,
            color: ctx.theme.primary,
            width: 0.5,
        }
        .into(),
        TextRun::new(ctx.left(), text_y, text::truncate(brand, ctx.width() / 2.0, 8.0), 8.0, MUTED).into(),
        TextRun::new(
            ctx.right(),
            text_y,
            format!("Page {} of {}", info.number, info.total),
            8.0,
            MUTED,
        )
        .align(Align::Right)
        .into(),
    ];

    if info.number > 1 {
        let rule_y = ctx.layout.content_top() - HEADER_RULE_GAP;
        primitives.push(
            TextRun::new(ctx.left(), rule_y - HEADER_TEXT_GAP, text::truncate(title, ctx.width(), 9.0), 9.0, ctx.theme.primary)
                .bold()
                .into(),
        );
        primitives.push(
            LineShape {
                x1: ctx.left(),
                y1: rule_y,
                x2: ctx.right(),
                y2: rule_y,
                color: ctx.theme.light,
                width: 0.3,
            }
            .into(),
        );
    }
    primitives
}
