//! Error types for the edges of the tool.
//!
//! Report assembly itself never fails: missing data falls back to documented defaults.
//! Errors only come from reading plans and scan files and from writing exports.
//!
//! # Error Categories
//!
//! - **PlanError**: reading and validating plan files and the scans they import
//! - **ExportError**: encoding a finished document into an output format
//!
//! # Examples
//!
//! ```rust
//! use scanreport::errors::{ExportError, PlanError};
//!
//! let err = PlanError::ScanNotFound("scan-42".to_string());
//! assert!(err.is_not_found());
//!
//! let err = ExportError::UnknownTemplate("pdf".to_string());
//! assert_eq!(err.error_code(), "UNKNOWN_TEMPLATE");
//! ```

pub mod export;
pub mod plan;

pub use export::ExportError;
pub use plan::PlanError;

/// Result type alias for plan operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Result type alias for exporters
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_result_alias() {
        let result: PlanResult<()> = Err(PlanError::NoScans);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_result_alias() {
        let result: ExportResult<String> = Err(ExportError::UnknownTemplate("x".to_string()));
        assert!(result.is_err());
    }
}
