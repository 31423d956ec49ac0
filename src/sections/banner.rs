use crate::layout::{text, Advance, Align, Paginator, RectShape, Rgb, TextRun};

use super::{Block, SectionContext, SECTION_GAP};

pub const BANNER_HEIGHT: f32 = 42.0;
const STRIPE_HEIGHT: f32 = 2.0;

pub struct Banner<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    /// Right-aligned line, usually the generation timestamp.
    pub meta: Option<&'a str>,
}

/// Full-bleed title banner in the theme's primary colour. Drawn at the top of the first page.
pub fn render(y: f32, ctx: &SectionContext, banner: &Banner, pager: &mut Paginator) -> Advance {
    let page_width = ctx.layout.page_width();
    let mut block = Block::new(BANNER_HEIGHT);
    block.push(RectShape::filled(0.0, 0.0, page_width, BANNER_HEIGHT - STRIPE_HEIGHT, ctx.theme.primary));
    block.push(RectShape::filled(
        0.0,
        BANNER_HEIGHT - STRIPE_HEIGHT,
        page_width,
        STRIPE_HEIGHT,
        ctx.theme.accent,
    ));

    let title = text::truncate_with(banner.title, ctx.width(), 22.0, text::FontWeight::Bold);
    block.push(TextRun::new(ctx.left(), 19.0, title, 22.0, Rgb::WHITE).bold());
    block.push(TextRun::new(
        ctx.left(),
        28.0,
        text::truncate(banner.subtitle, ctx.width(), 11.0),
        11.0,
        ctx.theme.light,
    ));
    if let Some(meta) = banner.meta {
        block.push(
            TextRun::new(ctx.right(), 35.0, meta, 9.0, ctx.theme.light).align(Align::Right),
        );
    }

    block.pad(SECTION_GAP).draw(y, pager)
}
