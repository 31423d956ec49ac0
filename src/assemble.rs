//! Report assemblers.
//!
//! Both entry points are pure orchestration: they pick the data each section needs, run the
//! section renderers in a fixed order while threading the cursor through, and finally let
//! the paginator stamp headers and footers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::layout::{Document, LayoutConfig, Paginator};
use crate::scan::ScanRecord;
use crate::sections::banner::{self, Banner};
use crate::sections::executive::{self, ExecutiveOverview, GENERIC_RECOMMENDATIONS};
use crate::sections::{
    ai_analysis, decorations, details, findings, recommendations, risk, severity, summary,
    SectionContext,
};
use crate::theme::Theme;

pub const DEFAULT_BRAND: &str = "Security Scan Report";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ReportOptions {
    /// Findings table and one card per finding.
    pub include_findings: bool,
    pub include_recommendations: bool,
    /// Overrides the banner title.
    pub title: Option<String>,
    /// Footer branding.
    pub company_label: Option<String>,
    /// Printed in the banner as is.
    pub generated_at: Option<String>,
    pub layout: LayoutConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_findings: true,
            include_recommendations: true,
            title: None,
            company_label: None,
            generated_at: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl ReportOptions {
    fn brand(&self) -> &str {
        self.company_label.as_deref().unwrap_or(DEFAULT_BRAND)
    }

    fn meta(&self) -> Option<String> {
        self.generated_at.as_ref().map(|at| format!("Generated {}", at))
    }
}

pub fn assemble_single_scan_report(scan: &ScanRecord, theme: &Theme, options: &ReportOptions) -> Document {
    info!("Assembling report for scan {} with theme {}", scan.id, theme.id);
    let layout = options.layout;
    let ctx = SectionContext::new(theme, &layout);
    let mut pager = Paginator::new(layout);
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| "Security Scan Report".to_string());
    let meta = options.meta();
    let counts = scan.severity_counts();

    let mut advance = banner::render(
        0.0,
        &ctx,
        &Banner {
            title: &title,
            subtitle: &scan.target,
            meta: meta.as_deref(),
        },
        &mut pager,
    );
    advance = advance.then(summary::render(advance.y, &ctx, scan, &mut pager));
    advance = advance.then(details::render(advance.y, &ctx, scan, &mut pager));
    advance = advance.then(severity::render(advance.y, &ctx, "Severity Distribution", &counts, &mut pager));
    advance = advance.then(severity::render_metrics(advance.y, &ctx, &scan.summary, &mut pager));
    advance = advance.then(risk::render(advance.y, &ctx, &scan.summary, &mut pager));

    if options.include_findings {
        advance = advance.then(findings::render_table_section(advance.y, &ctx, &scan.findings, &mut pager));
        if !scan.findings.is_empty() {
            advance = advance.then(findings::render_cards(
                advance.y,
                &ctx,
                "Detailed Findings",
                &scan.findings,
                &mut pager,
            ));
        }
    }

    if options.include_recommendations {
        let items = match &scan.recommendations {
            Some(items) if !items.is_empty() => items.clone(),
            _ => {
                debug!("Scan {} has no recommendations, using defaults", scan.id);
                recommendations::default_recommendations(&counts)
            }
        };
        advance = advance.then(recommendations::render(advance.y, &ctx, "Recommendations", &items, &mut pager));
    }

    if let Some(analysis) = &scan.ai_analysis {
        let parts = ai_analysis::AiSections {
            findings: options.include_findings,
            recommendations: options.include_recommendations,
        };
        advance = advance.then(ai_analysis::render(advance.y, &ctx, analysis, parts, &mut pager));
    }
    debug!("Scan {} laid out, page breaks: {}", scan.id, advance.page_break);

    let brand = options.brand().to_string();
    pager.finish(&title, theme.id, |info| decorations::stamp(&ctx, &title, &brand, info))
}

/// Rollup over every completed scan in `scans`; others are ignored.
pub fn assemble_executive_summary(
    scans: &[ScanRecord],
    company_label: &str,
    theme: &Theme,
    options: &ReportOptions,
) -> Document {
    let completed: Vec<&ScanRecord> = scans.iter().filter(|s| s.is_completed()).collect();
    info!(
        "Assembling executive summary for {} ({} of {} scans completed)",
        company_label,
        completed.len(),
        scans.len()
    );
    let layout = options.layout;
    let ctx = SectionContext::new(theme, &layout);
    let mut pager = Paginator::new(layout);
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| "Executive Security Summary".to_string());
    let meta = options.meta();
    let overview = ExecutiveOverview::from_scans(&completed);

    let mut advance = banner::render(
        0.0,
        &ctx,
        &Banner {
            title: &title,
            subtitle: company_label,
            meta: meta.as_deref(),
        },
        &mut pager,
    );
    advance = advance.then(executive::render_overview(advance.y, &ctx, company_label, &overview, &mut pager));
    advance = advance.then(severity::render(
        advance.y,
        &ctx,
        "Severity Distribution (All Scans)",
        &overview.counts,
        &mut pager,
    ));
    advance = advance.then(executive::render_scan_table(advance.y, &ctx, &completed, &mut pager));

    if options.include_recommendations {
        let items: Vec<String> = GENERIC_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
        advance = advance.then(recommendations::render(advance.y, &ctx, "Recommendations", &items, &mut pager));
    }
    debug!("Executive summary laid out, page breaks: {}", advance.page_break);

    let brand = options.company_label.as_deref().unwrap_or(company_label).to_string();
    pager.finish(&title, theme.id, |info| decorations::stamp(&ctx, &title, &brand, info))
}
