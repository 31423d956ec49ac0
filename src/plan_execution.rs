use crate::assemble::{assemble_executive_summary, assemble_single_scan_report, ReportOptions};
use crate::errors::{PlanError, PlanResult};
use crate::layout::Document;
use crate::plan::{ExportFileType, ExportProfileItem, Plan, ReportKind, ReportProfileItem};
use crate::scan::ScanRecord;
use crate::theme::resolve_theme;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tracing::{debug, error, info, warn};

use anyhow::Result;

/// A scan file holds either one scan or a list of scans.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScanFile {
    Many(Vec<ScanRecord>),
    One(Box<ScanRecord>),
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("")
        .to_lowercase()
}

fn read(path: &Path) -> PlanResult<String> {
    std::fs::read_to_string(path).map_err(|source| PlanError::ReadFailed {
        path: path.display().to_string(),
        source,
    })
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> PlanError {
    PlanError::InvalidFormat {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Loads scans from a JSON or YAML file
pub fn load_scans(path: &Path) -> PlanResult<Vec<ScanRecord>> {
    let content = read(path)?;
    let file: ScanFile = match extension(path).as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| invalid(path, e))?,
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| invalid(path, e))?,
        other => {
            error!("Error: unsupported extension {}", other);
            return Err(PlanError::UnsupportedExtension {
                extension: other.to_string(),
                path: path.display().to_string(),
            });
        }
    };
    let scans = match file {
        ScanFile::Many(scans) => scans,
        ScanFile::One(scan) => vec![*scan],
    };
    debug!("Loaded {} scan(s) from {}", scans.len(), path.display());
    Ok(scans)
}

/// Loads a plan from a YAML or TOML file
pub fn load_plan(path: &Path) -> PlanResult<Plan> {
    let content = read(path)?;
    match extension(path).as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| invalid(path, e)),
        "toml" => toml::from_str(&content).map_err(|e| invalid(path, e)),
        other => Err(PlanError::UnsupportedExtension {
            extension: other.to_string(),
            path: path.display().to_string(),
        }),
    }
}

fn plan_dir(plan_file_path: &Path) -> PlanResult<&Path> {
    plan_file_path
        .parent()
        .ok_or_else(|| PlanError::MissingParent(plan_file_path.display().to_string()))
}

/// Loads every scan the plan imports, in import order
fn load_plan_scans(plan: &Plan, plan_file_path: &Path) -> PlanResult<Vec<ScanRecord>> {
    let parent_dir = plan_dir(plan_file_path)?;
    let mut scans = Vec::new();
    for profile in &plan.import.profiles {
        let import_file_path = parent_dir.join(&profile.filename);
        info!("Importing scans: {}", import_file_path.display());
        scans.extend(load_scans(&import_file_path)?);
    }
    if scans.is_empty() {
        return Err(PlanError::NoScans);
    }
    Ok(scans)
}

/// `out/report.svg` becomes `out/report-<suffix>.svg`
pub fn suffixed_filename(filename: &str, suffix: &str) -> String {
    let path = Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext),
        None => format!("{}-{}", stem, suffix),
    };
    path.with_file_name(name).to_string_lossy().to_string()
}

fn render_export(document: &Document, exporter: &ExportFileType) -> Result<String> {
    let output = match exporter {
        ExportFileType::JSON => crate::export::to_json::render(document),
        ExportFileType::SVG => crate::export::to_svg::render(document),
        ExportFileType::Outline => crate::export::to_outline::render(document),
        ExportFileType::TablesCSV => crate::export::to_csv_tables::render(document),
        ExportFileType::Custom(params) => crate::export::to_custom::render(document, params),
    }?;
    Ok(output)
}

/// Exports one document through every export profile of its report
fn export_document(
    document: &Document,
    profiles: &[ExportProfileItem],
    output_dir: &Path,
    suffix: Option<&str>,
) -> usize {
    let mut written = 0;
    for profile in profiles {
        let filename = match suffix {
            Some(suffix) => suffixed_filename(&profile.filename, suffix),
            None => profile.filename.clone(),
        };
        let target: PathBuf = output_dir.join(&filename);
        info!(
            "Exporting file: {} using exporter {:?}",
            target.display(),
            profile.exporter
        );

        match render_export(document, &profile.exporter) {
            Ok(output) => {
                if let Err(e) = crate::common::write_string_to_file(&target.to_string_lossy(), &output) {
                    error!("Failed to write to file {}: {}", target.display(), e);
                } else {
                    written += 1;
                }
            }
            Err(e) => error!("Failed to export file {}: {}", target.display(), e),
        }
    }
    written
}

fn report_options(report: &ReportProfileItem) -> ReportOptions {
    let mut options = report.report_options();
    if options.generated_at.is_none() {
        options.generated_at = Some(chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string());
    }
    options
}

/// Assembles and exports one report profile, returning the number of files written
fn run_report(report: &ReportProfileItem, scans: &[ScanRecord], output_dir: &Path) -> PlanResult<usize> {
    let theme = resolve_theme(report.template.as_deref());
    let options = report_options(report);

    match &report.kind {
        ReportKind::SingleScan { scan: Some(id) } => {
            let scan = scans
                .iter()
                .find(|s| &s.id == id)
                .ok_or_else(|| PlanError::ScanNotFound(id.clone()))?;
            let document = assemble_single_scan_report(scan, theme, &options);
            Ok(export_document(&document, &report.export, output_dir, None))
        }
        ReportKind::SingleScan { scan: None } => Ok(scans
            .iter()
            .map(|scan| {
                let document = assemble_single_scan_report(scan, theme, &options);
                export_document(&document, &report.export, output_dir, Some(&scan.id))
            })
            .sum()),
        ReportKind::ExecutiveSummary { company } => {
            let document = assemble_executive_summary(scans, company, theme, &options);
            Ok(export_document(&document, &report.export, output_dir, None))
        }
    }
}

/// Executes a single pass over the plan
fn run_plan(plan: &Plan, plan_file_path: &Path) -> Result<()> {
    let scans = load_plan_scans(plan, plan_file_path)?;
    let output_dir = plan_dir(plan_file_path)?;
    info!("Loaded {} scan(s), rendering {} report(s)", scans.len(), plan.reports.len());

    let mut written = 0;
    for report in &plan.reports {
        match run_report(report, &scans, output_dir) {
            Ok(count) => written += count,
            Err(e) => error!("Failed to render report {:?}: {}", report.kind, e),
        }
    }
    if written == 0 && !plan.reports.is_empty() {
        warn!("Plan produced no output files");
    }
    info!("Wrote {} file(s)", written);
    Ok(())
}

/// Main function to execute a plan, with optional file watching
pub fn execute_plan(plan: String, watch: bool) -> Result<()> {
    info!("Executing plan {}", plan);

    let plan_file_path = Path::new(&plan);
    let plan = load_plan(plan_file_path)?;

    debug!("Executing plan: {:?}", plan);
    run_plan(&plan, plan_file_path)?;

    if watch {
        watch_for_changes(plan, plan_file_path)?;
    }

    Ok(())
}

/// Sets up file watching for scan files to re-run the plan on changes
fn watch_for_changes(plan: Plan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let parent_dir = plan_dir(plan_file_path)?;

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for profile in &plan.import.profiles {
        watcher.watch(&parent_dir.join(&profile.filename), RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if let EventKind::Modify(_) = event.kind {
                    debug!("File modified {:?}", event.paths);
                    info!("Change detected, re-executing plan");
                    if let Err(e) = run_plan(&plan, plan_file_path) {
                        error!("Plan execution failed: {}", e);
                    }
                }
            }
            Ok(Err(e)) => error!("Watch error: {:?}", e),
            Err(e) => {
                error!("Watch channel closed: {:?}", e);
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_filename() {
        assert_eq!(suffixed_filename("out/report.svg", "scan-1"), "out/report-scan-1.svg");
        assert_eq!(suffixed_filename("report", "a"), "report-a");
    }

    #[test]
    fn test_load_scans_accepts_single_or_list() {
        let dir = tempfile::tempdir().unwrap();
        let one = dir.path().join("one.json");
        std::fs::write(&one, r#"{"id": "s1", "target": "a.example"}"#).unwrap();
        let many = dir.path().join("many.yaml");
        std::fs::write(&many, "- id: s2\n  target: b.example\n- id: s3\n  target: c.example\n").unwrap();

        assert_eq!(load_scans(&one).unwrap()[0].id, "s1");
        assert_eq!(load_scans(&many).unwrap().len(), 2);
    }

    #[test]
    fn test_load_scans_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.xml");
        std::fs::write(&path, "<scan/>").unwrap();
        let err = load_scans(&path).unwrap_err();
        assert!(matches!(err, PlanError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_missing_scan_id_is_not_found() {
        let report = ReportProfileItem {
            kind: ReportKind::SingleScan {
                scan: Some("nope".to_string()),
            },
            template: None,
            options: None,
            layout: None,
            export: Vec::new(),
        };
        let scans = vec![ScanRecord::default()];
        let err = run_report(&report, &scans, Path::new(".")).unwrap_err();
        assert!(err.is_not_found());
    }
}
