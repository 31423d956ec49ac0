use crate::classify::{clamp_score, combined_risk_tier};
use crate::layout::{text, Advance, Paginator, RectShape, TextRun};
use crate::scan::ScanSummary;

use super::{paragraph, Block, SectionContext, BORDER, SECTION_GAP};

const BAR_WIDTH: f32 = 3.0;
const ASSESSMENT_SIZE: f32 = 9.0;
const ASSESSMENT_MAX_LINES: usize = 6;

/// Combined AI risk callout. Without an enhancement record nothing is drawn and the
/// cursor is returned untouched.
pub fn render(y: f32, ctx: &SectionContext, summary: &ScanSummary, pager: &mut Paginator) -> Advance {
    let Some(enhancement) = &summary.enhancement else {
        return Advance::stay(y);
    };

    let tier = combined_risk_tier(enhancement, summary.risk_score);
    let inner_x = ctx.left() + BAR_WIDTH + 4.0;
    let inner_width = ctx.right() - inner_x - 4.0;

    let mut header = Block::new(18.0);
    header.push(TextRun::new(inner_x, 7.0, "AI-Enhanced Risk Assessment", 11.0, ctx.theme.dark).bold());
    let combined = match enhancement.combined_risk_score {
        Some(score) => format!("Combined Risk: {:.0}/100 ({})", clamp_score(score), tier.label()),
        None => format!("Combined Risk: {}", tier.label()),
    };
    header.push(TextRun::new(inner_x, 13.0, combined, 9.0, tier.color).bold());
    header.push(TextRun::new(
        ctx.right() - 4.0 - text::text_width("AI Findings: 0000", 9.0, text::FontWeight::Regular),
        13.0,
        format!("AI Findings: {}", enhancement.ai_findings_count),
        9.0,
        ctx.theme.dark,
    ));

    let body = match enhancement.ai_risk_assessment.as_deref() {
        Some(assessment) if !assessment.trim().is_empty() => {
            let lines = text::wrap_capped(assessment, inner_width, ASSESSMENT_SIZE, ASSESSMENT_MAX_LINES);
            paragraph(&lines, inner_x, ASSESSMENT_SIZE, ctx.theme.dark)
        }
        _ => Block::new(0.0),
    };
    let content = header.stack(body).pad(4.0);

    let mut block = Block::new(0.0);
    block.push(RectShape::filled(ctx.left(), 0.0, ctx.width(), content.height, ctx.theme.light).stroked(BORDER));
    block.push(RectShape::filled(ctx.left(), 0.0, BAR_WIDTH, content.height, tier.color));
    block.stack(content).pad(SECTION_GAP).draw(y, pager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use crate::scan::{Enhancement, RiskLevel};
    use crate::theme::default_theme;

    #[test]
    fn test_absent_enhancement_leaves_cursor_unchanged() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let mut pager = Paginator::new(layout);
        let advance = render(123.0, &ctx, &ScanSummary::default(), &mut pager);
        assert_eq!(advance, Advance::stay(123.0));
        let document = pager.finish("t", "professional", |_| Vec::new());
        assert!(document.pages[0].body.is_empty());
    }

    #[test]
    fn test_callout_height_grows_with_assessment() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let summary = |assessment: &str| ScanSummary {
            enhancement: Some(Enhancement {
                ai_risk_assessment: Some(assessment.to_string()),
                ai_findings_count: 4,
                combined_risk_level: Some(RiskLevel::Critical),
                ..Default::default()
            }),
            ..Default::default()
        };

        let mut pager = Paginator::new(layout);
        let short = render(40.0, &ctx, &summary("Short."), &mut pager);
        let mut pager = Paginator::new(layout);
        let long = render(40.0, &ctx, &summary(&"exposed service ".repeat(60)), &mut pager);

        assert!(long.y > short.y);
        let document = pager.finish("t", "professional", |_| Vec::new());
        assert!(document.contains_text("CRITICAL"));
    }
}
