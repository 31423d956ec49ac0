//! Sections specific to the multi-scan executive summary.

use crate::classify::{average_security_score, clamp_score, risk_tier, security_score};
use crate::layout::{Advance, Align, CircleShape, Paginator, RectShape, Rgb, TableCell, TextRun};
use crate::scan::{ScanRecord, SeverityCounts};
use tracing::warn;

use super::{key_value, render_table, Block, SectionContext, BORDER, MUTED, SECTION_GAP};

pub const GENERIC_RECOMMENDATIONS: [&str; 5] = [
    "Prioritise remediation of critical and high severity findings across all scanned assets.",
    "Establish a regular scanning schedule so new exposures are detected quickly.",
    "Keep operating systems, services and third-party dependencies patched and up to date.",
    "Review network exposure and close services that do not need to be publicly reachable.",
    "Track remediation progress and re-scan assets to confirm findings are resolved.",
];

const BOX_HEIGHT: f32 = 40.0;
const GAUGE_RADIUS: f32 = 13.0;

/// Aggregates over the completed scans of an executive summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutiveOverview {
    pub scan_count: usize,
    /// Sum of the tiles, so the box and the tiles always agree.
    pub total_findings: usize,
    pub counts: SeverityCounts,
    /// `None` when no scan is available to average.
    pub security_score: Option<u32>,
    pub mean_risk: Option<f64>,
}

impl ExecutiveOverview {
    pub fn from_scans(scans: &[&ScanRecord]) -> Self {
        let risks: Vec<f64> = scans.iter().map(|s| clamp_score(s.summary.risk_score)).collect();
        let mean_risk = (!risks.is_empty()).then(|| risks.iter().sum::<f64>() / risks.len() as f64);
        let counts: SeverityCounts = scans.iter().map(|s| s.severity_counts()).sum();
        let declared: usize = scans.iter().map(|s| s.summary.total_findings).sum();
        if declared != counts.total() {
            warn!(
                "Declared finding totals sum to {} but severity counts sum to {}, reporting {}",
                declared,
                counts.total(),
                counts.total()
            );
        }
        Self {
            scan_count: scans.len(),
            total_findings: counts.total(),
            counts,
            security_score: average_security_score(&risks),
            mean_risk,
        }
    }
}

pub fn render_overview(
    y: f32,
    ctx: &SectionContext,
    company_label: &str,
    overview: &ExecutiveOverview,
    pager: &mut Paginator,
) -> Advance {
    let left = ctx.left();
    let gauge_x = ctx.right() - GAUGE_RADIUS - 10.0;
    let value_width = gauge_x - GAUGE_RADIUS - left - 12.0;

    let mut block = Block::new(BOX_HEIGHT);
    block.push(
        RectShape::filled(left, 0.0, ctx.width(), BOX_HEIGHT, ctx.theme.light)
            .stroked(BORDER)
            .rounded(3.0),
    );
    block.push(TextRun::new(left + 5.0, 8.0, "Security Overview", 12.0, ctx.theme.dark).bold());

    let rows = [
        ("Organisation", company_label.to_string()),
        ("Scans", overview.scan_count.to_string()),
        ("Findings", overview.total_findings.to_string()),
    ];
    for (i, (key, value)) in rows.iter().enumerate() {
        block.primitives.extend(key_value(
            left + 5.0,
            16.0 + i as f32 * 6.0,
            value_width,
            key,
            value,
            9.5,
            ctx.theme.dark,
        ));
    }

    let (label, fill) = match (overview.security_score, overview.mean_risk) {
        (Some(score), Some(risk)) => (format!("{}%", score), risk_tier(risk).color),
        _ => ("N/A".to_string(), MUTED),
    };
    block.push(CircleShape {
        cx: gauge_x,
        cy: 18.0,
        r: GAUGE_RADIUS,
        fill: Some(fill),
        stroke: Some(Rgb::WHITE),
    });
    block.push(TextRun::new(gauge_x, 20.5, label, 15.0, Rgb::WHITE).bold().align(Align::Center));
    block.push(TextRun::new(gauge_x, 36.0, "Average Security Score", 8.0, MUTED).align(Align::Center));

    block.pad(SECTION_GAP).draw(y, pager)
}

/// One row per scan.
pub fn render_scan_table(
    y: f32,
    ctx: &SectionContext,
    scans: &[&ScanRecord],
    pager: &mut Paginator,
) -> Advance {
    let fixed = [24.0, 22.0, 18.0, 20.0, 22.0];
    let target = ctx.width() - fixed.iter().sum::<f32>();
    let rows = scans
        .iter()
        .map(|scan| {
            let tier = risk_tier(scan.summary.risk_score);
            vec![
                TableCell::text(scan.target.as_str()),
                TableCell::text(scan.profile.as_str()),
                TableCell::text(scan.status.label()),
                TableCell::text(scan.summary.total_findings.to_string()),
                TableCell::text(format!("{:.0}", clamp_score(scan.summary.risk_score)))
                    .colored(tier.color)
                    .bold(),
                TableCell::text(format!("{}%", security_score(scan.summary.risk_score))),
            ]
        })
        .collect();

    render_table(
        y,
        ctx,
        Some("Scan Results"),
        &[target, fixed[0], fixed[1], fixed[2], fixed[3], fixed[4]],
        &[
            TableCell::text("Target"),
            TableCell::text("Profile"),
            TableCell::text("Status"),
            TableCell::text("Findings"),
            TableCell::text("Risk"),
            TableCell::text("Score"),
        ],
        rows,
        pager,
    )
    .offset(SECTION_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanSummary;

    fn scan(risk: f64, total: usize) -> ScanRecord {
        ScanRecord {
            summary: ScanSummary {
                risk_score: risk,
                total_findings: total,
                severity_counts: Some(SeverityCounts {
                    medium: total,
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_overview_averages_risk() {
        let scans = [scan(10.0, 1), scan(50.0, 2), scan(90.0, 3)];
        let refs: Vec<_> = scans.iter().collect();
        let overview = ExecutiveOverview::from_scans(&refs);
        assert_eq!(overview.security_score, Some(50));
        assert_eq!(overview.total_findings, 6);
        assert_eq!(overview.counts.total(), 6);
    }

    #[test]
    fn test_overview_total_matches_tiles_when_summary_disagrees() {
        let mut inconsistent = scan(30.0, 5);
        inconsistent.summary.severity_counts = Some(SeverityCounts {
            high: 2,
            ..Default::default()
        });
        let mut undeclared = scan(30.0, 4);
        undeclared.summary.severity_counts = None;
        undeclared.findings = vec![crate::scan::Finding {
            severity: Some("low".into()),
            ..Default::default()
        }];

        let scans = [inconsistent, undeclared, scan(10.0, 3)];
        let refs: Vec<_> = scans.iter().collect();
        let overview = ExecutiveOverview::from_scans(&refs);
        assert_eq!(overview.total_findings, overview.counts.total());
        assert_eq!(overview.total_findings, 2 + 1 + 3);
    }

    #[test]
    fn test_overview_without_scans_has_no_score() {
        let overview = ExecutiveOverview::from_scans(&[]);
        assert_eq!(overview.security_score, None);
        assert_eq!(overview.counts.total(), 0);
    }
}
