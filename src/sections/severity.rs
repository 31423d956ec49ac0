use crate::classify::{clamp_score, risk_tier, severity_color};
use crate::layout::{Advance, Align, Paginator, RectShape, Rgb, TextRun};
use crate::scan::{ScanSummary, Severity, SeverityCounts};

use super::{heading, Block, SectionContext, MUTED, SECTION_GAP};

const TILE_GAP: f32 = 4.0;
const TILE_HEIGHT: f32 = 24.0;
const METRICS_HEIGHT: f32 = 8.0;

/// One tile per severity, most urgent first, count and label centred.
pub fn tiles(ctx: &SectionContext, counts: &SeverityCounts) -> Block {
    let tile_width = (ctx.width() - TILE_GAP * (Severity::ALL.len() - 1) as f32) / Severity::ALL.len() as f32;
    let mut block = Block::new(TILE_HEIGHT);
    for (i, severity) in Severity::ALL.iter().enumerate() {
        let x = ctx.left() + i as f32 * (tile_width + TILE_GAP);
        let center = x + tile_width / 2.0;
        block.push(RectShape::filled(x, 0.0, tile_width, TILE_HEIGHT, severity_color(*severity)).rounded(2.0));
        block.push(
            TextRun::new(center, 12.0, counts.get(*severity).to_string(), 18.0, Rgb::WHITE)
                .bold()
                .align(Align::Center),
        );
        block.push(
            TextRun::new(center, 19.5, severity.label(), 9.0, Rgb::WHITE).align(Align::Center),
        );
    }
    block
}

pub fn render(
    y: f32,
    ctx: &SectionContext,
    title: &str,
    counts: &SeverityCounts,
    pager: &mut Paginator,
) -> Advance {
    heading(ctx, title)
        .stack(tiles(ctx, counts))
        .pad(SECTION_GAP / 2.0)
        .draw(y, pager)
}

/// Single line with the aggregate risk numbers, the level coloured by its tier.
pub fn render_metrics(
    y: f32,
    ctx: &SectionContext,
    summary: &ScanSummary,
    pager: &mut Paginator,
) -> Advance {
    let tier = risk_tier(summary.risk_score);
    let mut block = Block::new(METRICS_HEIGHT);
    block.push(TextRun::new(
        ctx.left(),
        4.5,
        format!(
            "Risk Score: {:.0}/100   Total Findings: {}   Risk Level:",
            clamp_score(summary.risk_score),
            summary.total_findings
        ),
        10.0,
        MUTED,
    ));
    block.push(TextRun::new(ctx.right(), 4.5, tier.label(), 10.0, tier.color).bold().align(Align::Right));
    block.pad(SECTION_GAP / 2.0).draw(y, pager)
}
