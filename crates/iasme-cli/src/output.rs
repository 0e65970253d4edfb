//! Output artifact serialization.

use anyhow::{Context, Result};
use iasme_core::{CompanyRecord, OutputFormat, RenameMap};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Serialize a record, renaming top-level keys found in `map`.
///
/// Unmapped keys keep their name; nested objects are never renamed.
pub fn apply_rename_map(record: &CompanyRecord, map: Option<&RenameMap>) -> Result<Value> {
    let value = serde_json::to_value(record).context("failed to serialize record")?;
    let Some(map) = map else {
        return Ok(value);
    };

    let Value::Object(fields) = value else {
        return Ok(value);
    };
    let renamed: Map<String, Value> = fields
        .into_iter()
        .map(|(key, value)| match map.get(&key) {
            Some(mapped) => (mapped.clone(), value),
            None => (key, value),
        })
        .collect();
    Ok(Value::Object(renamed))
}

/// Render records in the requested format.
///
/// `Json` is a two-space indented array; `Jsonl` is one compact object per
/// line, each followed by a newline.
pub fn render_records(
    records: &[CompanyRecord],
    format: OutputFormat,
    map: Option<&RenameMap>,
) -> Result<String> {
    let values = records
        .iter()
        .map(|record| apply_rename_map(record, map))
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&values).context("failed to render JSON output")
        }
        OutputFormat::Jsonl => {
            let mut rendered = String::new();
            for value in &values {
                rendered.push_str(
                    &serde_json::to_string(value).context("failed to render JSONL output")?,
                );
                rendered.push('\n');
            }
            Ok(rendered)
        }
    }
}

/// Write records to `path`, creating parent directories as needed.
pub fn write_output(
    path: &Path,
    records: &[CompanyRecord],
    format: OutputFormat,
    map: Option<&RenameMap>,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    let rendered = render_records(records, format, map)?;
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = records.len(), "output_written");
    Ok(())
}
