use super::renderer::create_standard_context;
use crate::errors::ExportResult;
use crate::layout::Document;

/// Plain text outline of every page.
pub fn render(document: &Document) -> ExportResult<String> {
    let mut handlebars = crate::common::get_handlebars();
    handlebars.register_escape_fn(handlebars::no_escape);
    let res = handlebars.render_template(&get_template(), &create_standard_context(document))?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_outline.hbs").to_string()
}
