use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assemble::ReportOptions;
use crate::layout::LayoutConfig;

/// ## Structure
/// This module contains the data structures for the plan file.
///
/// ```text
/// Plan
///   ├── meta: Option<Meta>
///   ├── import: ImportConfig
///   │   └── profiles: Vec<ImportProfile>
///   │       └── filename: String            (.json, .yaml or .yml scan files)
///   └── reports: Vec<ReportProfileItem>
///       ├── kind: ReportKind
///       │   ├── SingleScan { scan: Option<String> }
///       │   └── ExecutiveSummary { company: String }
///       ├── template: Option<String>
///       ├── options: Option<ReportProfileOptions>
///       ├── layout: Option<LayoutConfig>
///       └── export: Vec<ExportProfileItem>
///           ├── filename: String
///           └── exporter: ExportFileType
///               ├── JSON
///               ├── SVG
///               ├── Outline
///               ├── TablesCSV
///               └── Custom(CustomExportProfile)
/// ```
///

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Plan {
    pub meta: Option<Meta>,
    pub import: ImportConfig,
    pub reports: Vec<ReportProfileItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Meta {
    pub name: Option<String>,
}

//
// Import configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ImportConfig {
    pub profiles: Vec<ImportProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImportProfile {
    pub filename: String,
}

//
// Report configuration
//

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ReportKind {
    /// One report per scan, or only the named scan.
    SingleScan { scan: Option<String> },
    ExecutiveSummary { company: String },
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReportProfileItem {
    pub kind: ReportKind,
    pub template: Option<String>,
    pub options: Option<ReportProfileOptions>,
    pub layout: Option<LayoutConfig>,
    pub export: Vec<ExportProfileItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ReportProfileOptions {
    pub include_findings: Option<bool>,
    pub include_recommendations: Option<bool>,
    pub title: Option<String>,
    pub company_label: Option<String>,
    pub generated_at: Option<String>,
}

impl ReportProfileItem {
    /// Engine options with unset values taken from the defaults.
    pub fn report_options(&self) -> ReportOptions {
        let defaults = ReportOptions::default();
        let options = self.options.clone().unwrap_or_default();
        ReportOptions {
            include_findings: options.include_findings.unwrap_or(defaults.include_findings),
            include_recommendations: options
                .include_recommendations
                .unwrap_or(defaults.include_recommendations),
            title: options.title,
            company_label: options.company_label,
            generated_at: options.generated_at,
            layout: self.layout.unwrap_or_default(),
        }
    }
}

//
// Export configuration
//

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExportProfileItem {
    pub filename: String,
    pub exporter: ExportFileType,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CustomExportProfile {
    pub template: String,
    pub partials: Option<HashMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum ExportFileType {
    JSON,
    SVG,
    Outline,
    TablesCSV,
    Custom(CustomExportProfile),
}

impl Default for Plan {
    fn default() -> Self {
        Plan {
            meta: Some(Meta {
                name: Some("Security reports".to_string()),
            }),
            import: ImportConfig {
                profiles: vec![ImportProfile {
                    filename: "scans/scan.json".to_string(),
                }],
            },
            reports: vec![ReportProfileItem {
                kind: ReportKind::SingleScan { scan: None },
                template: Some(crate::theme::DEFAULT_THEME.to_string()),
                options: None,
                layout: None,
                export: vec![
                    ExportProfileItem {
                        filename: "out/report.svg".to_string(),
                        exporter: ExportFileType::SVG,
                    },
                    ExportProfileItem {
                        filename: "out/report.txt".to_string(),
                        exporter: ExportFileType::Outline,
                    },
                ],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSize;

    #[test]
    fn test_serialization() {
        let yaml_str = serde_yaml::to_string(&Plan::default()).unwrap();
        assert!(yaml_str.contains("profiles"));
        assert!(yaml_str.contains("SingleScan"));
    }

    #[test]
    fn test_planfile_deserialization() {
        let yaml_str = r#"
meta:
  name: Quarterly
import:
  profiles:
    - filename: scans/web.json
    - filename: scans/db.yaml
reports:
  - kind: !SingleScan
      scan: scan-web-1
    template: modern
    options:
      include_recommendations: false
      title: Web perimeter
    layout:
      page_size: Letter
    export:
      - filename: out/web.svg
        exporter: SVG
      - filename: out/web.csv
        exporter: TablesCSV
  - kind: !ExecutiveSummary
      company: Acme Corp
    export:
      - filename: out/exec.json
        exporter: JSON
      - filename: out/exec.html
        exporter: !Custom
          template: templates/exec.hbs
          partials:
            row: templates/row.hbs
"#;

        let plan: Plan = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(plan.import.profiles.len(), 2);
        assert_eq!(plan.reports.len(), 2);

        let options = plan.reports[0].report_options();
        assert!(options.include_findings);
        assert!(!options.include_recommendations);
        assert_eq!(options.layout.page_size, PageSize::Letter);
        assert!(matches!(
            plan.reports[1].kind,
            ReportKind::ExecutiveSummary { ref company } if company == "Acme Corp"
        ));
        assert!(matches!(
            plan.reports[1].export[1].exporter,
            ExportFileType::Custom(_)
        ));
    }

    #[test]
    fn test_toml_plan_deserialization() {
        let toml_str = r#"
[import]
profiles = [{ filename = "scans/web.json" }]

[[reports]]
kind = { SingleScan = { scan = "scan-web-1" } }
template = "cyber"
export = [{ filename = "out/web.json", exporter = "JSON" }]

[[reports]]
kind = { SingleScan = {} }
export = [{ filename = "out/all.txt", exporter = "Outline" }]

[[reports]]
kind = { ExecutiveSummary = { company = "Acme Corp" } }
export = [{ filename = "out/exec.svg", exporter = "SVG" }]
"#;
        let plan: Plan = toml::from_str(toml_str).unwrap();
        assert_eq!(plan.reports.len(), 3);
        assert!(matches!(
            plan.reports[0].kind,
            ReportKind::SingleScan { scan: Some(ref id) } if id == "scan-web-1"
        ));
        assert!(matches!(plan.reports[1].kind, ReportKind::SingleScan { scan: None }));
        assert!(matches!(
            plan.reports[2].kind,
            ReportKind::ExecutiveSummary { ref company } if company == "Acme Corp"
        ));
    }
}
