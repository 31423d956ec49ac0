use serde_json::json;

use super::renderer::{canvas_height, canvas_pages};
use crate::errors::ExportResult;
use crate::layout::Document;

/// All pages stacked vertically in one SVG, sized in millimetres.
pub fn render(document: &Document) -> ExportResult<String> {
    let handlebars = crate::common::get_handlebars();
    let res = handlebars.render_template(
        &get_template(),
        &json!({
            "title": document.title,
            "width": document.page_width,
            "height": canvas_height(document),
            "page_height": document.page_height,
            "pages": canvas_pages(document),
        }),
    )?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_svg.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Align, LayoutConfig, Paginator, RectShape, Rgb, TextRun};

    #[test]
    fn test_svg_contains_shapes_and_escaped_text() {
        let mut pager = Paginator::new(LayoutConfig::default());
        pager.draw(RectShape::filled(20.0, 20.0, 50.0, 10.0, Rgb(220, 38, 38)).rounded(2.0));
        pager.draw(TextRun::new(100.0, 40.0, "A & B", 10.0, Rgb::BLACK).align(Align::Center));
        pager.break_page();
        let document = pager.finish("Doc", "professional", |_| Vec::new());

        let svg = render(&document).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("fill=\"#dc2626\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("A &amp; B"));
        assert_eq!(svg.matches("class=\"page\"").count(), 2);
    }
}
