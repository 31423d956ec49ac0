use crate::errors::ExportResult;
use crate::layout::Document;

pub fn render(document: &Document) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, Paginator, Rgb, TextRun};

    #[test]
    fn test_primitives_are_tagged_by_kind() {
        let mut pager = Paginator::new(LayoutConfig::default());
        pager.draw(TextRun::new(20.0, 40.0, "Hello", 10.0, Rgb::BLACK));
        let document = pager.finish("Doc", "modern", |_| Vec::new());

        let value: serde_json::Value = serde_json::from_str(&render(&document).unwrap()).unwrap();
        assert_eq!(value["theme"], "modern");
        assert_eq!(value["pages"][0]["body"][0]["kind"], "text");
        assert_eq!(value["pages"][0]["body"][0]["text"], "Hello");
    }
}
