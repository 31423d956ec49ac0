//! Findings summary table and one detail card per finding.
//!
//! A card is measured and drawn as a single block, so its height is exactly the sum of
//! its parts: header bar, capped description, detail rows and the solution callout.

use crate::classify::{severity_color, LOW_GREEN};
use crate::layout::{text, Advance, Align, Paginator, RectShape, Rgb, TableCell, TextRun};
use crate::scan::Finding;

use super::{
    heading, key_value, paragraph, render_table, Block, SectionContext, BORDER, MUTED,
    SECTION_GAP,
};

const HEADER_BAR: f32 = 8.0;
const CARD_PADDING: f32 = 4.0;
const CARD_GAP: f32 = 4.0;
const BODY_SIZE: f32 = 9.0;
const DETAIL_ROW: f32 = 5.0;
const SOLUTION_FILL: Rgb = Rgb(240, 253, 244);

const INDEX_COLUMN: f32 = 10.0;
const SEVERITY_COLUMN: f32 = 24.0;
const COMPONENT_COLUMN: f32 = 48.0;

/// First `findings_table_limit` findings with the true total stated underneath.
pub fn render_table_section(
    y: f32,
    ctx: &SectionContext,
    findings: &[Finding],
    pager: &mut Paginator,
) -> Advance {
    if findings.is_empty() {
        let mut note = Block::new(8.0);
        note.push(TextRun::new(ctx.left(), 5.0, "No findings were reported for this scan.", 10.0, MUTED));
        return heading(ctx, "Findings Summary").stack(note).pad(SECTION_GAP).draw(y, pager);
    }

    let limit = ctx.layout.findings_table_limit.min(findings.len());
    let rows = findings
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, finding)| {
            let severity = finding.severity();
            vec![
                TableCell::text((i + 1).to_string()),
                TableCell::text(finding.title.as_str()),
                TableCell::text(severity.label())
                    .colored(severity_color(severity))
                    .bold(),
                TableCell::text(finding.affected_component.as_str()),
            ]
        })
        .collect();
    let title_column = ctx.width() - INDEX_COLUMN - SEVERITY_COLUMN - COMPONENT_COLUMN;

    let advance = render_table(
        y,
        ctx,
        Some("Findings Summary"),
        &[INDEX_COLUMN, title_column, SEVERITY_COLUMN, COMPONENT_COLUMN],
        &[
            TableCell::text("#"),
            TableCell::text("Title"),
            TableCell::text("Severity"),
            TableCell::text("Component"),
        ],
        rows,
        pager,
    );

    let mut note = Block::new(6.0);
    note.push(TextRun::new(
        ctx.left(),
        4.0,
        format!("Showing {} of {} findings", limit, findings.len()),
        8.0,
        MUTED,
    ));
    advance.then(note.pad(SECTION_GAP).draw(advance.y, pager))
}

/// Scanners report confidence as a fraction (0-1), on nmap's 0-10 scale or as a percentage.
fn confidence_percent(confidence: f64) -> f64 {
    let percent = if confidence <= 1.0 {
        confidence * 100.0
    } else if confidence <= 10.0 {
        confidence * 10.0
    } else {
        confidence
    };
    percent.clamp(0.0, 100.0)
}

fn detail_rows(finding: &Finding) -> Vec<(&'static str, String)> {
    let mut rows = vec![(
        "Component",
        if finding.affected_component.is_empty() {
            "N/A".to_string()
        } else {
            finding.affected_component.clone()
        },
    )];
    if let Some(confidence) = finding.confidence {
        rows.push(("Confidence", format!("{:.0}%", confidence_percent(confidence))));
    }
    if !finding.references.is_empty() {
        rows.push(("References", finding.references.join(", ")));
    }
    if !finding.cve_ids.is_empty() {
        rows.push(("CVE IDs", finding.cve_ids.join(", ")));
    }
    if let Some(service) = &finding.service {
        rows.push(("Service", service.clone()));
    }
    if let Some(impact) = &finding.impact {
        rows.push(("Impact", impact.clone()));
    }
    rows
}

fn solution_callout(ctx: &SectionContext, solution: &str) -> Block {
    let x = ctx.left() + CARD_PADDING;
    let width = ctx.width() - 2.0 * CARD_PADDING;
    let lines = text::wrap_capped(solution, width - 6.0, BODY_SIZE, ctx.layout.solution_max_lines);

    let mut title = Block::new(7.0);
    title.push(TextRun::new(x + 3.0, 5.0, "Recommended Solution", BODY_SIZE, LOW_GREEN).bold());
    let content = title
        .stack(paragraph(&lines, x + 3.0, BODY_SIZE, ctx.theme.dark))
        .pad(3.0);

    let mut callout = Block::new(0.0);
    callout.push(
        RectShape::filled(x, 0.0, width, content.height, SOLUTION_FILL)
            .stroked(LOW_GREEN)
            .rounded(2.0),
    );
    callout.stack(content)
}

/// One finding as a bordered card; `number` is its one based position.
pub fn card(ctx: &SectionContext, number: usize, finding: &Finding) -> Block {
    let severity = finding.severity();
    let left = ctx.left();
    let inner_x = left + CARD_PADDING;
    let inner_width = ctx.width() - 2.0 * CARD_PADDING;

    let mut header = Block::new(HEADER_BAR);
    header.push(RectShape::filled(left, 0.0, ctx.width(), HEADER_BAR, severity_color(severity)));
    header.push(
        TextRun::new(
            inner_x,
            5.6,
            text::truncate_with(
                &format!("{}. {}", number, finding.title),
                inner_width - 25.0,
                10.0,
                text::FontWeight::Bold,
            ),
            10.0,
            Rgb::WHITE,
        )
        .bold(),
    );
    header.push(
        TextRun::new(ctx.right() - CARD_PADDING, 5.6, severity.label().to_uppercase(), 8.0, Rgb::WHITE)
            .bold()
            .align(Align::Right),
    );

    let description = if finding.description.trim().is_empty() {
        "No description provided."
    } else {
        finding.description.as_str()
    };
    let lines = text::wrap_capped(description, inner_width, BODY_SIZE, ctx.layout.description_max_lines);

    let rows = detail_rows(finding);
    let mut details = Block::new(rows.len() as f32 * DETAIL_ROW);
    for (i, (key, value)) in rows.iter().enumerate() {
        details.primitives.extend(key_value(
            inner_x,
            i as f32 * DETAIL_ROW + 3.6,
            inner_width,
            key,
            value,
            8.5,
            ctx.theme.dark,
        ));
    }

    let mut content = header
        .pad(3.0)
        .stack(paragraph(&lines, inner_x, BODY_SIZE, ctx.theme.dark))
        .pad(2.5)
        .stack(details);
    if let Some(solution) = finding.solution.as_deref().filter(|s| !s.trim().is_empty()) {
        content = content.pad(1.0).stack(solution_callout(ctx, solution));
    }
    let content = content.pad(3.0);

    let mut card = Block::new(0.0);
    card.push(RectShape {
        x: left,
        y: 0.0,
        width: ctx.width(),
        height: content.height,
        fill: None,
        stroke: Some(BORDER),
        radius: None,
    });
    card.stack(content)
}

/// Titled run of finding cards. The title is kept on the same page as the first card.
pub fn render_cards(
    y: f32,
    ctx: &SectionContext,
    title: &str,
    findings: &[Finding],
    pager: &mut Paginator,
) -> Advance {
    let mut lead = Some(heading(ctx, title));
    let mut advance = Advance::stay(y);

    for (i, finding) in findings.iter().enumerate() {
        let card = card(ctx, i + 1, finding).pad(CARD_GAP);
        let block = match lead.take() {
            Some(lead) => lead.stack(card),
            None => card,
        };
        advance = advance.then(block.draw(advance.y, pager));
    }

    if let Some(lead) = lead {
        let mut note = Block::new(8.0);
        note.push(TextRun::new(ctx.left(), 5.0, "No findings to detail.", 10.0, MUTED));
        advance = advance.then(lead.stack(note).draw(advance.y, pager));
    }
    advance.offset(SECTION_GAP - CARD_GAP)
}
