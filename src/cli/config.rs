use std::path::Path;

use crate::error::Result;
use crate::settings::{settings_path, Settings};

pub fn run(settings: &Settings, path: Option<&Path>) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);
    let layout = settings.resolve_layout(None)?;

    println!(
        "Settings:   {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("Layout:     {}", settings.layout);
    println!("Skip rows:  {}", layout.header_rows);
    println!("Narration:  column {}", layout.narration_column);
    println!("Amount:     column {}", layout.amount_column);
    println!("Classifier: {} ({})", layout.classifier.key(), layout.classifier.name());
    println!("Max rows:   {}", settings.max_rows);
    match settings.output_dir() {
        Some(dir) => println!("Output dir: {}", dir.display()),
        None => println!("Output dir: (next to the statement)"),
    }
    Ok(())
}
