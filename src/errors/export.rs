//! Document exporter errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Handlebars template failed to render
    #[error("Template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    /// A partial could not be registered
    #[error("Invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// A user supplied template or partial could not be read
    #[error("Failed to read template file '{path}': {source}")]
    TemplateRead {
        /// Template path
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Built-in template requested by name does not exist
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// JSON encoding failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed
    #[error("CSV encoding failed: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl ExportError {
    /// Errors caused by user supplied templates rather than by the tool
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            ExportError::Render(_)
                | ExportError::Template(_)
                | ExportError::TemplateRead { .. }
                | ExportError::UnknownTemplate(_)
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::Render(_) | ExportError::Template(_) => "TEMPLATE_ERROR",
            ExportError::TemplateRead { .. } => "IO_ERROR",
            ExportError::UnknownTemplate(_) => "UNKNOWN_TEMPLATE",
            ExportError::Json(_) | ExportError::Csv(_) => "ENCODING_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template() {
        let err = ExportError::UnknownTemplate("pdf".to_string());
        assert_eq!(err.to_string(), "Unknown template 'pdf'");
        assert!(err.is_template_error());
    }

    #[test]
    fn test_csv_error_is_encoding_failure() {
        let err = ExportError::Csv("short write".to_string());
        assert!(!err.is_template_error());
        assert_eq!(err.error_code(), "ENCODING_FAILED");
    }
}
