// Output formats for a rendered grid

use crate::page::{PageOptions, render_page};
use crate::render::Container;
use charcards_fetch::CharacterRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Html,
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Render the grid in the requested format.
///
/// HTML is built from the mounted cards, JSON and text from the records.
pub fn render_output(
    format: OutputFormat,
    container: &Container,
    records: &[CharacterRecord],
    options: &PageOptions,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Html => Ok(render_page(container, options)),
        OutputFormat::Json => render_json(records),
        OutputFormat::Text => Ok(render_text(records)),
    }
}

pub fn render_json(records: &[CharacterRecord]) -> Result<String, serde_json::Error> {
    let json_output = serde_json::json!({
        "characters": {
            "metadata": {
                "generator": "charcards",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "count": records.len(),
            "results": records
        }
    });

    serde_json::to_string_pretty(&json_output)
}

pub fn render_text(records: &[CharacterRecord]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Characters: {}\n\n", records.len()));

    let name_width = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let species_width = records
        .iter()
        .map(|r| r.species.chars().count())
        .max()
        .unwrap_or(0);

    for record in records {
        output.push_str(&format!(
            "  {:<name_width$}  {:<species_width$}  {}\n",
            record.name,
            record.species,
            record.image_url,
            name_width = name_width,
            species_width = species_width,
        ));
    }

    output
}

pub fn save_output(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
