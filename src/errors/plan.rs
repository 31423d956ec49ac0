//! Plan file and scan import errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// A plan or scan file could not be read
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        /// File that was being read
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File extension not recognised for the file's role
    #[error("Unsupported file extension '{extension}' for '{path}'")]
    UnsupportedExtension {
        /// Offending extension, empty when the file has none
        extension: String,
        /// File path
        path: String,
    },

    /// Plan or scan content could not be parsed
    #[error("Invalid format in '{path}': {reason}")]
    InvalidFormat {
        /// File path
        path: String,
        /// Parser message
        reason: String,
    },

    /// A report refers to a scan id that was not imported
    #[error("Scan '{0}' not found in imported scans")]
    ScanNotFound(String),

    /// The plan imports no scans at all
    #[error("Plan does not import any scans")]
    NoScans,

    /// Plan path has no parent directory to resolve imports against
    #[error("Plan path '{0}' has no parent directory")]
    MissingParent(String),
}

impl PlanError {
    /// Problems the plan author can fix by editing the plan or its inputs
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PlanError::UnsupportedExtension { .. }
                | PlanError::InvalidFormat { .. }
                | PlanError::ScanNotFound(_)
                | PlanError::NoScans
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanError::ScanNotFound(_))
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::ReadFailed { .. } | PlanError::MissingParent(_) => "IO_ERROR",
            PlanError::UnsupportedExtension { .. } | PlanError::InvalidFormat { .. } => {
                "VALIDATION_FAILED"
            }
            PlanError::ScanNotFound(_) => "NOT_FOUND",
            PlanError::NoScans => "NO_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_not_found() {
        let err = PlanError::ScanNotFound("scan-7".to_string());
        assert_eq!(err.to_string(), "Scan 'scan-7' not found in imported scans");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_read_failed_is_not_client_error() {
        let err = PlanError::ReadFailed {
            path: "plan.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("Failed to read 'plan.yaml'"));
        assert!(!err.is_client_error());
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = PlanError::UnsupportedExtension {
            extension: "xml".to_string(),
            path: "scan.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file extension 'xml' for 'scan.xml'"
        );
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
