use anyhow::{bail, Result};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use tracing::{error, info};

static SAMPLE_DIR: Dir = include_dir!("sample");

/// Built-in exporter template by name.
pub fn template_source(exporter: &str) -> Option<String> {
    match exporter {
        "svg" => Some(crate::export::to_svg::get_template()),
        "outline" => Some(crate::export::to_outline::get_template()),
        _ => None,
    }
}

pub fn generate_template(exporter: String) -> Result<()> {
    info!("Generating exporter template: {}", exporter);
    match template_source(&exporter.to_lowercase()) {
        Some(template) => {
            println!("{}", template);
            Ok(())
        }
        None => {
            error!("Unsupported exporter: {} - use svg, outline", exporter);
            bail!(crate::errors::ExportError::UnknownTemplate(exporter))
        }
    }
}

fn write_dir_contents(dir: &Dir, target_root: &Path) -> Result<()> {
    for file in dir.files() {
        let target_file_path = target_root.join(file.path());
        if let Some(parent) = target_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target_file_path, file.contents())?;
    }
    for sub_dir in dir.dirs() {
        write_dir_contents(sub_dir, target_root)?;
    }
    Ok(())
}

/// Writes the bundled sample plan and scans into `dir`.
pub fn generate_sample(dir: String) -> Result<()> {
    info!("Generating sample project in {:?}", dir);
    let target_path = Path::new(&dir);
    fs::create_dir_all(target_path)?;
    write_dir_contents(&SAMPLE_DIR, target_path)?;
    info!("Sample project generated successfully at: {:?}", dir);
    Ok(())
}
