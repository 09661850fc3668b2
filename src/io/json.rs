//! JSON export of fields and facility plans.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{field::{Field, FieldCell}, model::FacilityPlan};

#[derive(Serialize)]
struct FieldDocument<'a> {
    max_x: u32,
    max_y: u32,
    best_score: u64,
    worst_score: u64,
    cells: &'a [FieldCell],
}

impl<'a> From<&'a Field> for FieldDocument<'a> {
    fn from(field: &'a Field) -> Self {
        let (max_x, max_y) = field.bounds();
        Self { max_x, max_y, best_score: field.best_score(), worst_score: field.worst_score(), cells: field.cells() }
    }
}

/// Serialize the field (bounds, score range and cells) as pretty JSON.
pub fn field_json_string(field: &Field) -> Result<String> {
    serde_json::to_string_pretty(&FieldDocument::from(field))
        .context("[io::json] Failed to serialize field")
}

/// Write the field as JSON to `path`.
pub fn write_field_json(field: &Field, path: &Path) -> Result<()> {
    write_json(&FieldDocument::from(field), path)
}

/// Write a solved facility plan as JSON to `path`.
pub fn write_plan_json(plan: &FacilityPlan, path: &Path) -> Result<()> {
    write_json(plan, path)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::json] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("[io::json] Failed to write JSON to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
