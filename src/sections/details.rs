use chrono::{DateTime, Utc};

use crate::classify::clamp_score;
use crate::layout::{Advance, Paginator, TableCell};
use crate::scan::ScanRecord;

use super::{render_table, SectionContext, SECTION_GAP};

const KEY_COLUMN: f32 = 50.0;

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.round() >= 60.0 => {
            let total = s.round() as u64;
            format!("{}m {}s", total / 60, total % 60)
        }
        Some(s) => format!("{:.1}s", s),
        None => "N/A".to_string(),
    }
}

/// Key/value rows describing one scan.
pub fn rows(scan: &ScanRecord) -> Vec<(&'static str, String)> {
    let scanner = scan
        .summary
        .scanner
        .as_ref()
        .map(|s| match &s.version {
            Some(version) => format!("{} {}", s.name, version),
            None => s.name.clone(),
        })
        .unwrap_or_else(|| "N/A".to_string());

    vec![
        ("Scan ID", scan.id.clone()),
        ("Target", scan.target.clone()),
        ("Profile", scan.profile.clone()),
        ("Status", scan.status.label().to_string()),
        ("Scanner", scanner),
        ("Created", timestamp(scan.created_at)),
        ("Started", timestamp(scan.started_at)),
        ("Finished", timestamp(scan.finished_at)),
        ("Duration", duration(scan.duration_seconds())),
        ("Total Findings", scan.summary.total_findings.to_string()),
        (
            "Risk Score",
            format!("{:.0}/100", clamp_score(scan.summary.risk_score)),
        ),
    ]
}

pub fn render(y: f32, ctx: &SectionContext, scan: &ScanRecord, pager: &mut Paginator) -> Advance {
    let body = rows(scan)
        .into_iter()
        .map(|(key, value)| vec![TableCell::text(key).bold(), TableCell::text(value)])
        .collect();

    render_table(
        y,
        ctx,
        Some("Scan Details"),
        &[KEY_COLUMN, ctx.width() - KEY_COLUMN],
        &[TableCell::text("Property"), TableCell::text("Value")],
        body,
        pager,
    )
    .offset(SECTION_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_render_as_na() {
        let rows = rows(&ScanRecord::default());
        let scanner = rows.iter().find(|(k, _)| *k == "Scanner").map(|(_, v)| v.as_str());
        assert_eq!(scanner, Some("N/A"));
        let duration = rows.iter().find(|(k, _)| *k == "Duration").map(|(_, v)| v.as_str());
        assert_eq!(duration, Some("N/A"));
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(duration(Some(12.34)), "12.3s");
        assert_eq!(duration(Some(125.0)), "2m 5s");
        assert_eq!(duration(Some(119.6)), "2m 0s");
        assert_eq!(duration(Some(59.7)), "1m 0s");
        assert_eq!(duration(Some(60.4)), "1m 0s");
    }
}
