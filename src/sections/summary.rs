use crate::classify::{risk_tier, security_score};
use crate::layout::{text, Advance, Align, CircleShape, Paginator, RectShape, Rgb, TextRun};
use crate::scan::ScanRecord;

use super::{key_value, Block, SectionContext, BORDER, MUTED, SECTION_GAP};

const BOX_HEIGHT: f32 = 46.0;
const GAUGE_RADIUS: f32 = 14.0;
const BADGE_WIDTH: f32 = 42.0;
const BADGE_HEIGHT: f32 = 8.0;

/// Executive summary box: what was scanned, the security score gauge and the risk badge.
///
/// The gauge and the badge are both coloured from the clamped risk score so they can never
/// disagree with each other.
pub fn render(y: f32, ctx: &SectionContext, scan: &ScanRecord, pager: &mut Paginator) -> Advance {
    let tier = risk_tier(scan.summary.risk_score);
    let score = security_score(scan.summary.risk_score);
    let left = ctx.left();
    let gauge_x = ctx.right() - GAUGE_RADIUS - 10.0;
    let text_width = gauge_x - GAUGE_RADIUS - left - 12.0;

    let mut block = Block::new(BOX_HEIGHT);
    block.push(
        RectShape::filled(left, 0.0, ctx.width(), BOX_HEIGHT, ctx.theme.light)
            .stroked(BORDER)
            .rounded(3.0),
    );
    block.push(TextRun::new(left + 5.0, 8.0, "Executive Summary", 12.0, ctx.theme.dark).bold());

    let rows = [
        ("Target", scan.target.as_str()),
        ("Profile", scan.profile.as_str()),
        ("Status", scan.status.label()),
    ];
    for (i, (key, value)) in rows.iter().enumerate() {
        let baseline = 15.0 + i as f32 * 5.5;
        block.primitives.extend(key_value(
            left + 5.0,
            baseline,
            text_width,
            key,
            value,
            9.0,
            ctx.theme.dark,
        ));
    }

    block.push(RectShape::filled(left + 5.0, 32.0, BADGE_WIDTH, BADGE_HEIGHT, tier.color).rounded(2.0));
    block.push(
        TextRun::new(
            left + 5.0 + BADGE_WIDTH / 2.0,
            37.4,
            format!("{} RISK", tier.label()),
            8.0,
            Rgb::WHITE,
        )
        .bold()
        .align(Align::Center),
    );

    let gauge_y = 20.0;
    block.push(CircleShape {
        cx: gauge_x,
        cy: gauge_y,
        r: GAUGE_RADIUS,
        fill: Some(tier.color),
        stroke: Some(Rgb::WHITE),
    });
    block.push(
        TextRun::new(gauge_x, gauge_y + text::ascent(16.0) / 2.0, format!("{}%", score), 16.0, Rgb::WHITE)
            .bold()
            .align(Align::Center),
    );
    block.push(
        TextRun::new(gauge_x, 41.0, "Security Score", 8.0, MUTED).align(Align::Center),
    );

    block.pad(SECTION_GAP).draw(y, pager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HIGH_ORANGE;
    use crate::layout::{LayoutConfig, Primitive};
    use crate::scan::ScanSummary;
    use crate::theme::default_theme;

    #[test]
    fn test_gauge_and_badge_follow_risk_tier() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let mut pager = Paginator::new(layout);
        let scan = ScanRecord {
            target: "example.com".into(),
            summary: ScanSummary {
                risk_score: 72.0,
                ..Default::default()
            },
            ..Default::default()
        };

        render(60.0, &ctx, &scan, &mut pager);
        let document = pager.finish("t", "professional", |_| Vec::new());

        assert!(document.contains_text("28%"));
        assert!(document.contains_text("HIGH RISK"));
        let gauge = document.pages[0].body.iter().find_map(|p| match p {
            Primitive::Circle(c) => Some(c.clone()),
            _ => None,
        });
        assert_eq!(gauge.and_then(|c| c.fill), Some(HIGH_ORANGE));
    }
}
