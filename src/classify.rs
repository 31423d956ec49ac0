//! Severity and risk classification.
//!
//! Values that can be derived more than one way (a severity from a free-form label,
//! per-severity counts for a scan, the combined risk tier) are resolved through a
//! [`FallbackChain`]: an ordered list of named strategies where the first one that
//! returns a value wins.

use tracing::{debug, warn};

use crate::layout::Rgb;
use crate::scan::{Enhancement, RiskLevel, ScanRecord, Severity, SeverityCounts};

pub const CRITICAL_RED: Rgb = Rgb(220, 38, 38);
pub const HIGH_ORANGE: Rgb = Rgb(234, 88, 12);
pub const MEDIUM_YELLOW: Rgb = Rgb(202, 138, 4);
pub const LOW_GREEN: Rgb = Rgb(22, 163, 74);
pub const INFO_SLATE: Rgb = Rgb(100, 116, 139);

pub struct Strategy<I: ?Sized + 'static, T: 'static> {
    pub name: &'static str,
    pub apply: fn(&I) -> Option<T>,
}

pub struct FallbackChain<I: ?Sized + 'static, T: 'static> {
    strategies: &'static [Strategy<I, T>],
}

impl<I: ?Sized + 'static, T: 'static> FallbackChain<I, T> {
    pub const fn new(strategies: &'static [Strategy<I, T>]) -> Self {
        Self { strategies }
    }

    /// First applicable strategy's result, tagged with the strategy name.
    pub fn resolve(&self, input: &I) -> Option<(&'static str, T)> {
        self.strategies
            .iter()
            .find_map(|strategy| (strategy.apply)(input).map(|value| (strategy.name, value)))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name).collect()
    }
}

//
// Severity
//

fn exact_label(label: &str) -> Option<Severity> {
    match label.trim().to_lowercase().as_str() {
        "critical" => Some(Severity::Critical),
        "high" => Some(Severity::High),
        "medium" => Some(Severity::Medium),
        "low" => Some(Severity::Low),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

fn alias_label(label: &str) -> Option<Severity> {
    match label.trim().to_lowercase().as_str() {
        "crit" | "urgent" => Some(Severity::Critical),
        "severe" | "important" => Some(Severity::High),
        "moderate" | "warning" | "warn" => Some(Severity::Medium),
        "minor" | "negligible" => Some(Severity::Low),
        "informational" | "information" | "note" | "none" => Some(Severity::Info),
        _ => None,
    }
}

/// CVSS v3 qualitative rating of a numeric label.
fn cvss_score(label: &str) -> Option<Severity> {
    let score: f64 = label.trim().parse().ok()?;
    if !(0.0..=10.0).contains(&score) {
        return None;
    }
    Some(match score {
        s if s >= 9.0 => Severity::Critical,
        s if s >= 7.0 => Severity::High,
        s if s >= 4.0 => Severity::Medium,
        s if s > 0.0 => Severity::Low,
        _ => Severity::Info,
    })
}

pub static SEVERITY_CHAIN: FallbackChain<str, Severity> = FallbackChain::new(&[
    Strategy {
        name: "exact_label",
        apply: exact_label,
    },
    Strategy {
        name: "alias_label",
        apply: alias_label,
    },
    Strategy {
        name: "cvss_score",
        apply: cvss_score,
    },
]);

/// Absent or unrecognised labels resolve to `Info`.
pub fn resolve_severity(label: Option<&str>) -> Severity {
    label
        .and_then(|label| SEVERITY_CHAIN.resolve(label))
        .map(|(_, severity)| severity)
        .unwrap_or(Severity::Info)
}

pub fn severity_color(severity: Severity) -> Rgb {
    match severity {
        Severity::Critical => CRITICAL_RED,
        Severity::High => HIGH_ORANGE,
        Severity::Medium => MEDIUM_YELLOW,
        Severity::Low => LOW_GREEN,
        Severity::Info => INFO_SLATE,
    }
}

pub fn severity_label_color(label: Option<&str>) -> Rgb {
    severity_color(resolve_severity(label))
}

//
// Risk
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTier {
    pub level: RiskLevel,
    pub color: Rgb,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        self.level.label()
    }
}

/// Clamp into [0, 100]; NaN counts as no risk.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

pub fn risk_tier(score: f64) -> RiskTier {
    let score = clamp_score(score);
    let level = if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    RiskTier {
        level,
        color: risk_level_color(level),
    }
}

pub fn risk_level_color(level: RiskLevel) -> Rgb {
    match level {
        RiskLevel::Critical => CRITICAL_RED,
        RiskLevel::High => HIGH_ORANGE,
        RiskLevel::Medium => MEDIUM_YELLOW,
        RiskLevel::Low | RiskLevel::Minimal => LOW_GREEN,
    }
}

/// `100 - risk`, rounded to whole percent.
pub fn security_score(risk_score: f64) -> u32 {
    (100.0 - clamp_score(risk_score).round()) as u32
}

/// Security score over the mean risk of several scans; `None` when there are none.
pub fn average_security_score(risk_scores: &[f64]) -> Option<u32> {
    if risk_scores.is_empty() {
        return None;
    }
    let mean = risk_scores.iter().map(|s| clamp_score(*s)).sum::<f64>() / risk_scores.len() as f64;
    Some(security_score(mean))
}

fn declared_combined_level(enhancement: &Enhancement) -> Option<RiskLevel> {
    enhancement.combined_risk_level
}

fn combined_score_tier(enhancement: &Enhancement) -> Option<RiskLevel> {
    enhancement.combined_risk_score.map(|s| risk_tier(s).level)
}

pub static COMBINED_RISK_CHAIN: FallbackChain<Enhancement, RiskLevel> = FallbackChain::new(&[
    Strategy {
        name: "declared_combined_level",
        apply: declared_combined_level,
    },
    Strategy {
        name: "combined_score_tier",
        apply: combined_score_tier,
    },
]);

/// Tier shown in the combined risk callout, falling back to the scan's own score.
pub fn combined_risk_tier(enhancement: &Enhancement, base_score: f64) -> RiskTier {
    match COMBINED_RISK_CHAIN.resolve(enhancement) {
        Some((_, level)) => RiskTier {
            level,
            color: risk_level_color(level),
        },
        None => risk_tier(base_score),
    }
}

//
// Severity counts
//

fn consistent_summary_counts(scan: &ScanRecord) -> Option<SeverityCounts> {
    let counts = scan.summary.severity_counts?;
    if counts.total() == scan.summary.total_findings {
        Some(counts)
    } else {
        warn!(
            "Scan {} severity counts sum to {} but total is {}",
            scan.id,
            counts.total(),
            scan.summary.total_findings
        );
        None
    }
}

fn finding_tally(scan: &ScanRecord) -> Option<SeverityCounts> {
    (!scan.findings.is_empty()).then(|| SeverityCounts::tally(&scan.findings))
}

fn declared_counts(scan: &ScanRecord) -> Option<SeverityCounts> {
    scan.summary.severity_counts
}

pub static SEVERITY_COUNT_CHAIN: FallbackChain<ScanRecord, SeverityCounts> =
    FallbackChain::new(&[
        Strategy {
            name: "consistent_summary_counts",
            apply: consistent_summary_counts,
        },
        Strategy {
            name: "finding_tally",
            apply: finding_tally,
        },
        Strategy {
            name: "declared_counts",
            apply: declared_counts,
        },
    ]);

pub fn severity_counts(scan: &ScanRecord) -> SeverityCounts {
    match SEVERITY_COUNT_CHAIN.resolve(scan) {
        Some((strategy, counts)) => {
            debug!("Severity counts for scan {} from {}", scan.id, strategy);
            counts
        }
        None => SeverityCounts::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Finding, ScanSummary};

    #[test]
    fn test_risk_tier_boundaries() {
        let labels: Vec<_> = [0.0, 39.0, 40.0, 59.0, 60.0, 79.0, 80.0, 100.0]
            .iter()
            .map(|s| risk_tier(*s).label())
            .collect();
        assert_eq!(
            labels,
            vec!["LOW", "LOW", "MEDIUM", "MEDIUM", "HIGH", "HIGH", "CRITICAL", "CRITICAL"]
        );
    }

    #[test]
    fn test_risk_tier_clamps_out_of_range() {
        assert_eq!(risk_tier(-25.0).level, RiskLevel::Low);
        assert_eq!(risk_tier(250.0).level, RiskLevel::Critical);
        assert_eq!(risk_tier(f64::NAN).level, RiskLevel::Low);
        assert_eq!(risk_tier(72.0).color, HIGH_ORANGE);
    }

    #[test]
    fn test_security_score() {
        assert_eq!(security_score(72.0), 28);
        assert_eq!(security_score(-5.0), 100);
        assert_eq!(security_score(130.0), 0);
        assert_eq!(average_security_score(&[10.0, 50.0, 90.0]), Some(50));
        assert_eq!(average_security_score(&[]), None);
    }

    #[test]
    fn test_severity_chain_order() {
        assert_eq!(
            SEVERITY_CHAIN.names(),
            vec!["exact_label", "alias_label", "cvss_score"]
        );
        assert_eq!(SEVERITY_CHAIN.resolve("HIGH"), Some(("exact_label", Severity::High)));
        assert_eq!(
            SEVERITY_CHAIN.resolve("moderate"),
            Some(("alias_label", Severity::Medium))
        );
        assert_eq!(SEVERITY_CHAIN.resolve("9.8"), Some(("cvss_score", Severity::Critical)));
        assert_eq!(SEVERITY_CHAIN.resolve("42"), None);
    }

    #[test]
    fn test_unknown_severity_uses_info_color() {
        assert_eq!(resolve_severity(None), Severity::Info);
        assert_eq!(resolve_severity(Some("bogus")), Severity::Info);
        assert_eq!(severity_label_color(Some("bogus")), severity_color(Severity::Info));
        assert_eq!(severity_label_color(None), INFO_SLATE);
    }

    fn finding(severity: &str) -> Finding {
        Finding {
            id: severity.to_string(),
            title: severity.to_string(),
            severity: Some(severity.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_prefer_consistent_summary() {
        let scan = ScanRecord {
            summary: ScanSummary {
                total_findings: 3,
                severity_counts: Some(SeverityCounts {
                    high: 3,
                    ..Default::default()
                }),
                ..Default::default()
            },
            findings: vec![finding("low")],
            ..Default::default()
        };
        assert_eq!(severity_counts(&scan).high, 3);
    }

    #[test]
    fn test_counts_fall_back_to_tally_when_summary_inconsistent() {
        let scan = ScanRecord {
            summary: ScanSummary {
                total_findings: 2,
                severity_counts: Some(SeverityCounts {
                    high: 5,
                    ..Default::default()
                }),
                ..Default::default()
            },
            findings: vec![finding("critical"), finding("low")],
            ..Default::default()
        };
        let counts = severity_counts(&scan);
        assert_eq!((counts.critical, counts.low, counts.high), (1, 1, 0));
    }

    #[test]
    fn test_counts_without_any_data_are_zero() {
        assert_eq!(severity_counts(&ScanRecord::default()).total(), 0);
    }

    #[test]
    fn test_combined_tier_fallbacks() {
        let declared = Enhancement {
            combined_risk_level: Some(RiskLevel::Critical),
            combined_risk_score: Some(10.0),
            ..Default::default()
        };
        assert_eq!(combined_risk_tier(&declared, 0.0).level, RiskLevel::Critical);

        let scored = Enhancement {
            combined_risk_score: Some(65.0),
            ..Default::default()
        };
        assert_eq!(combined_risk_tier(&scored, 0.0).level, RiskLevel::High);

        assert_eq!(
            combined_risk_tier(&Enhancement::default(), 45.0).level,
            RiskLevel::Medium
        );
    }
}
