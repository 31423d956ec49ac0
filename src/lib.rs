pub mod assemble;
pub mod classify;
pub mod common;
pub mod errors;
pub mod export;
pub mod generate_commands;
pub mod layout;
pub mod plan;
pub mod plan_execution;
pub mod scan;
pub mod sections;
pub mod theme;

pub use assemble::{assemble_executive_summary, assemble_single_scan_report, ReportOptions};
pub use layout::{Document, LayoutConfig};
pub use scan::{Finding, ScanRecord, Severity};
pub use theme::{resolve_theme, Theme};
