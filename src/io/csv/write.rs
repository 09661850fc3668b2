//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::field::Field;

/// Build a `x, y, raw_score, normalized_score` frame from a field.
fn field_frame(field: &Field) -> Result<DataFrame> {
    let cells = field.cells();
    let df = DataFrame::new(vec![
        Series::new("x".into(), cells.iter().map(|c| c.x).collect::<Vec<u32>>()).into(),
        Series::new("y".into(), cells.iter().map(|c| c.y).collect::<Vec<u32>>()).into(),
        Series::new("raw_score".into(), cells.iter().map(|c| c.raw_score).collect::<Vec<u64>>()).into(),
        Series::new("normalized_score".into(), cells.iter().map(|c| c.normalized_score).collect::<Vec<f64>>()).into(),
    ])?;
    Ok(df)
}

/// Write the field cells to a CSV file.
pub fn write_field_csv(field: &Field, path: &Path) -> Result<()> {
    let mut df = field_frame(field)?;
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write the field cells to a CSV string.
pub fn field_csv_string(field: &Field) -> Result<String> {
    let mut df = field_frame(field)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(&mut df)
        .context("[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .context("[io::csv::write] CSV output is not valid UTF-8")
}
