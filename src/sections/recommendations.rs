use crate::layout::{text, Advance, Paginator, TextRun};
use crate::scan::SeverityCounts;

use super::{heading, paragraph, Block, SectionContext, SECTION_GAP};

const ITEM_SIZE: f32 = 10.0;
const ITEM_GAP: f32 = 2.0;
const NUMBER_WIDTH: f32 = 8.0;
const ITEM_MAX_LINES: usize = 8;

/// Used when a scan carries no recommendation list of its own.
pub fn default_recommendations(counts: &SeverityCounts) -> Vec<String> {
    let mut items = Vec::new();
    if counts.critical > 0 {
        items.push(format!(
            "Remediate the {} critical finding(s) immediately and verify the fixes with a follow-up scan.",
            counts.critical
        ));
    }
    if counts.high > 0 {
        items.push(format!(
            "Schedule fixes for the {} high severity finding(s) within the next patch cycle.",
            counts.high
        ));
    }
    if counts.medium + counts.low > 0 {
        items.push(
            "Track medium and low severity findings in the backlog and address them during regular maintenance."
                .to_string(),
        );
    }
    items.push("Keep software and dependencies patched and re-scan after every significant change.".to_string());
    items.push("Run security scans on a regular schedule to catch regressions early.".to_string());
    items
}

/// Numbered item with a hanging indent.
fn item(ctx: &SectionContext, number: usize, recommendation: &str) -> Block {
    let text_x = ctx.left() + NUMBER_WIDTH;
    let lines = text::wrap_capped(recommendation, ctx.right() - text_x, ITEM_SIZE, ITEM_MAX_LINES);
    let mut block = paragraph(&lines, text_x, ITEM_SIZE, ctx.theme.dark);
    block.push(
        TextRun::new(ctx.left(), text::ascent(ITEM_SIZE), format!("{}.", number), ITEM_SIZE, ctx.theme.primary)
            .bold(),
    );
    block.pad(ITEM_GAP)
}

/// Titled numbered list; each item is placed on its own so a long list flows across pages.
pub fn render(
    y: f32,
    ctx: &SectionContext,
    title: &str,
    recommendations: &[String],
    pager: &mut Paginator,
) -> Advance {
    let mut lead = Some(heading(ctx, title).pad(2.0));
    let mut advance = Advance::stay(y);

    for (i, recommendation) in recommendations.iter().enumerate() {
        let entry = item(ctx, i + 1, recommendation);
        let block = match lead.take() {
            Some(lead) => lead.stack(entry),
            None => entry,
        };
        advance = advance.then(block.draw(advance.y, pager));
    }
    if let Some(lead) = lead {
        advance = advance.then(lead.draw(advance.y, pager));
    }
    advance.offset(SECTION_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use crate::theme::default_theme;

    #[test]
    fn test_defaults_mention_urgent_counts() {
        let counts = SeverityCounts {
            critical: 2,
            ..Default::default()
        };
        let items = default_recommendations(&counts);
        assert!(items[0].contains("2 critical"));
        assert_eq!(default_recommendations(&SeverityCounts::default()).len(), 2);
    }

    #[test]
    fn test_items_are_numbered_in_order() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let mut pager = Paginator::new(layout);
        let items = vec!["Patch OpenSSH".to_string(), "Close port 23".to_string()];
        render(40.0, &ctx, "Recommendations", &items, &mut pager);
        let document = pager.finish("t", "professional", |_| Vec::new());
        let texts: Vec<_> = document.pages[0].texts().map(|t| t.text.as_str()).collect();
        let first = texts.iter().position(|t| *t == "1.");
        let second = texts.iter().position(|t| *t == "2.");
        assert!(first.is_some() && second.is_some() && first < second);
        assert!(texts.contains(&"Close port 23"));
    }

    #[test]
    fn test_long_items_are_capped() {
        let layout = LayoutConfig::default();
        let ctx = SectionContext::new(default_theme(), &layout);
        let block = item(&ctx, 1, &"rotate credentials ".repeat(2000));
        assert!(block.height < layout.page_capacity());
        let lines = block
            .primitives
            .iter()
            .filter(|p| matches!(p, crate::layout::Primitive::Text(run) if run.text != "1."))
            .count();
        assert_eq!(lines, ITEM_MAX_LINES);
    }
}
