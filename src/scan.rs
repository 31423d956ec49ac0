use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ## Structure
/// Scan records as delivered by the scan backend. The report engine only reads them.
///
/// ```text
/// ScanRecord
///   ├── id, target, profile, status
///   ├── created_at / started_at / finished_at
///   ├── summary: ScanSummary
///   │   ├── total_findings
///   │   ├── severity_counts: Option<SeverityCounts>
///   │   ├── risk_score / risk_level
///   │   ├── scanner: Option<ScannerInfo>
///   │   └── enhancement: Option<Enhancement>
///   ├── findings: Vec<Finding>
///   ├── recommendations: Option<Vec<String>>
///   └── ai_analysis: Option<AiAnalysis>
/// ```

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    Info,
}

impl Severity {
    /// Report order, most urgent first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "MINIMAL",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Running,
    #[default]
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ScanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScanStatus::Pending => "Pending",
            ScanStatus::Running => "Running",
            ScanStatus::Completed => "Completed",
            ScanStatus::Failed => "Failed",
            ScanStatus::Cancelled => "Cancelled",
            ScanStatus::Unknown => "Unknown",
        }
    }
}

/// One discovered issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    /// Raw label as reported by the scanner; resolved through `classify::resolve_severity`.
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "component", alias = "location")]
    pub affected_component: String,
    #[serde(default)]
    pub solution: Option<String>,
    /// Weakness classification ids, e.g. `CWE-79`.
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Vulnerability identifiers, e.g. `CVE-2023-1234`.
    #[serde(default, alias = "cve_references")]
    pub cve_ids: Vec<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        crate::classify::resolve_severity(self.severity.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: usize,
    #[serde(default)]
    pub high: usize,
    #[serde(default)]
    pub medium: usize,
    #[serde(default)]
    pub low: usize,
    #[serde(default)]
    pub info: usize,
}

impl SeverityCounts {
    pub fn tally<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            counts.increment(finding.severity());
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    pub fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

impl std::ops::Add for SeverityCounts {
    type Output = SeverityCounts;

    fn add(self, other: SeverityCounts) -> SeverityCounts {
        SeverityCounts {
            critical: self.critical + other.critical,
            high: self.high + other.high,
            medium: self.medium + other.medium,
            low: self.low + other.low,
            info: self.info + other.info,
        }
    }
}

impl std::iter::Sum for SeverityCounts {
    fn sum<I: Iterator<Item = SeverityCounts>>(iter: I) -> Self {
        iter.fold(SeverityCounts::default(), |acc, c| acc + c)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of a second, AI-assisted analysis pass merged into the summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enhancement {
    #[serde(default)]
    pub ai_risk_assessment: Option<String>,
    #[serde(default)]
    pub ai_findings_count: usize,
    #[serde(default)]
    pub combined_risk_score: Option<f64>,
    #[serde(default)]
    pub combined_risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    #[serde(default)]
    pub total_findings: usize,
    #[serde(default)]
    pub severity_counts: Option<SeverityCounts>,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub scanner: Option<ScannerInfo>,
    /// Seconds.
    #[serde(default)]
    pub scan_duration: Option<f64>,
    #[serde(default)]
    pub enhancement: Option<Enhancement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub target: String,
    #[serde(default, alias = "scan_profile")]
    pub profile: String,
    #[serde(default)]
    pub status: ScanStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "completed_at")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summary: ScanSummary,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
}

impl ScanRecord {
    pub fn is_completed(&self) -> bool {
        self.status == ScanStatus::Completed
    }

    /// Per-severity counts after the fallback chain in `classify::severity_counts`.
    pub fn severity_counts(&self) -> SeverityCounts {
        crate::classify::severity_counts(self)
    }

    /// Duration in seconds, preferring the reported value over the timestamps.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.summary.scan_duration.or_else(|| {
            let (start, end) = (self.started_at?, self.finished_at?);
            let millis = (end - start).num_milliseconds();
            (millis >= 0).then(|| millis as f64 / 1000.0)
        })
    }
}
