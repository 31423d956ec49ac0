use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &str) -> anyhow::Result<()> {
    let parent = Path::new(path)
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid path: no parent directory for '{}'", path))?;
    if !parent.as_os_str().is_empty() && !parent.exists() {
        info!("Creating path: {:?}", parent);
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_string_to_file(filename: &str, content: &str) -> anyhow::Result<()> {
    create_path_if_not_exists(filename)?;
    let mut file = File::create(Path::new(filename))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Handlebars registry with the helpers available to built-in and custom templates.
pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| {
        match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    });
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(isnull: |v: Value| v.is_null());
    handlebars.register_helper("isnull", Box::new(isnull));

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    handlebars.register_helper("stringeq", Box::new(stringeq));

    // [r, g, b] as serialized by `Rgb` to "#rrggbb"; anything else is "none".
    handlebars_helper!(rgb: |v: Value| {
        match v.as_array().map(|c| c.iter().filter_map(Value::as_u64).collect::<Vec<_>>()) {
            Some(c) if c.len() == 3 => format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2]),
            _ => "none".to_string(),
        }
    });
    handlebars.register_helper("rgb", Box::new(rgb));

    handlebars_helper!(mm: |v: f64| format!("{:.2}", v));
    handlebars.register_helper("mm", Box::new(mm));

    handlebars_helper!(add: |a: f64, b: f64| format!("{:.2}", a + b));
    handlebars.register_helper("add", Box::new(add));

    handlebars_helper!(text_anchor: |align: String| {
        match align.as_str() {
            "center" => "middle",
            "right" => "end",
            _ => "start",
        }
    });
    handlebars.register_helper("text_anchor", Box::new(text_anchor));

    handlebars
}
