use std::fs;

use tracing::error;

use super::renderer::create_standard_context;
use crate::errors::{ExportError, ExportResult};
use crate::layout::Document;
use crate::plan::CustomExportProfile;

/// Render a user supplied handlebars template (and its partials) over the document.
pub fn render(document: &Document, params: &CustomExportProfile) -> ExportResult<String> {
    let mut handlebars = crate::common::get_handlebars();

    if let Some(partials) = &params.partials {
        for (name, partial) in partials {
            let partial_content = fs::read_to_string(partial).map_err(|source| {
                error!("Failed to read partial file '{}': {}", partial, source);
                ExportError::TemplateRead {
                    path: partial.clone(),
                    source,
                }
            })?;
            handlebars.register_partial(name, partial_content)?;
        }
    }

    let template_content =
        fs::read_to_string(&params.template).map_err(|source| ExportError::TemplateRead {
            path: params.template.clone(),
            source,
        })?;

    let res = handlebars.render_template(&template_content, &create_standard_context(document))?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, Paginator};
    use std::collections::HashMap;

    #[test]
    fn test_custom_template_with_partial() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("report.hbs");
        let partial = dir.path().join("page.hbs");
        fs::write(&template, "{{title}}:{{#each pages as |page|}}{{> page_line page}}{{/each}}").unwrap();
        fs::write(&partial, "[{{number}}]").unwrap();

        let mut pager = Paginator::new(LayoutConfig::default());
        pager.break_page();
        let document = pager.finish("Doc", "professional", |_| Vec::new());

        let params = CustomExportProfile {
            template: template.to_string_lossy().to_string(),
            partials: Some(HashMap::from([(
                "page_line".to_string(),
                partial.to_string_lossy().to_string(),
            )])),
        };
        assert_eq!(render(&document, &params).unwrap(), "Doc:[1][2]");
    }

    #[test]
    fn test_missing_template_is_reported() {
        let document = Paginator::new(LayoutConfig::default()).finish("Doc", "professional", |_| Vec::new());
        let params = CustomExportProfile {
            template: "/nonexistent/template.hbs".to_string(),
            partials: None,
        };
        let err = render(&document, &params).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
