use crate::layout::{text, Advance, Paginator, TextRun};
use crate::scan::AiAnalysis;

use super::{findings, heading, paragraph, recommendations, Block, SectionContext, MUTED, SECTION_GAP};

const NARRATIVE_SIZE: f32 = 10.0;
const NARRATIVE_MAX_LINES: usize = 12;

/// Which optional parts of the AI block are drawn; they follow the report's own
/// findings and recommendations switches.
#[derive(Debug, Clone, Copy)]
pub struct AiSections {
    pub findings: bool,
    pub recommendations: bool,
}

impl Default for AiSections {
    fn default() -> Self {
        Self {
            findings: true,
            recommendations: true,
        }
    }
}

/// Secondary AI vulnerability analysis: narrative, its own finding cards and recommendations.
pub fn render(
    y: f32,
    ctx: &SectionContext,
    analysis: &AiAnalysis,
    parts: AiSections,
    pager: &mut Paginator,
) -> Advance {
    let mut intro = heading(ctx, "AI Vulnerability Analysis");
    if let Some(model) = analysis.model.as_deref() {
        let mut line = Block::new(6.0);
        line.push(TextRun::new(ctx.left(), 4.0, format!("Model: {}", model), 9.0, MUTED));
        intro = intro.stack(line);
    }
    if let Some(summary) = analysis.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        let lines = text::wrap_capped(summary, ctx.width(), NARRATIVE_SIZE, NARRATIVE_MAX_LINES);
        intro = intro.stack(paragraph(&lines, ctx.left(), NARRATIVE_SIZE, ctx.theme.dark));
    }
    let mut advance = intro.pad(SECTION_GAP / 2.0).draw(y, pager);

    if parts.findings && !analysis.findings.is_empty() {
        advance = advance.then(findings::render_cards(advance.y, ctx, "AI Findings", &analysis.findings, pager));
    }
    if parts.recommendations && !analysis.recommendations.is_empty() {
        advance = advance.then(recommendations::render(
            advance.y,
            ctx,
            "AI Recommendations",
            &analysis.recommendations,
            pager,
        ));
    }
    advance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use crate::scan::Finding;
    use crate::theme::default_theme;

    fn analysis() -> AiAnalysis {
        AiAnalysis {
            model: Some("scan-llm".into()),
            summary: Some("The host exposes an outdated SSH daemon.".into()),
            findings: vec![Finding {
                title: "Weak SSH key exchange".into(),
                severity: Some("medium".into()),
                ..Default::default()
            }],
            recommendations: vec!["Upgrade OpenSSH".into()],
        }
    }

    #[test]
    fn test_ai_block_renders_cards_and_recommendations() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let mut pager = Paginator::new(layout);
        let analysis = analysis();

        render(30.0, &ctx, &analysis, AiSections::default(), &mut pager);
        let document = pager.finish("t", "professional", |_| Vec::new());

        assert!(document.contains_text("Model: scan-llm"));
        assert!(document.contains_text("1. Weak SSH key exchange"));
        assert!(document.contains_text("Upgrade OpenSSH"));
    }

    #[test]
    fn test_ai_block_parts_can_be_left_out() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let mut pager = Paginator::new(layout);
        let parts = AiSections {
            findings: false,
            recommendations: false,
        };

        render(30.0, &ctx, &analysis(), parts, &mut pager);
        let document = pager.finish("t", "professional", |_| Vec::new());

        assert!(document.contains_text("The host exposes an outdated SSH daemon."));
        assert!(!document.contains_text("Weak SSH key exchange"));
        assert!(!document.contains_text("Upgrade OpenSSH"));
    }
}
