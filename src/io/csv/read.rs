//! CSV reading operations.

use std::{fs, io::Cursor, path::Path};

use anyhow::{Context, Result, bail, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType}};

use crate::site::Site;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads sites from a headerless three-row CSV file at `path`.
///
/// Row 1 holds x-coordinates, row 2 y-coordinates and row 3 weights; each
/// column is one site. Further rows are ignored.
pub fn read_sites(path: &Path) -> Result<Vec<Site>> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    read_sites_bytes(&bytes)
        .with_context(|| format!("[io::csv::read] Failed to read sites from {}", path.display()))
}

/// Reads sites from CSV text.
pub fn read_sites_str(csv: &str) -> Result<Vec<Site>> {
    read_sites_bytes(csv.as_bytes())
}

/// Reads sites from CSV bytes, tolerating a UTF-8 byte-order mark.
pub fn read_sites_bytes(bytes: &[u8]) -> Result<Vec<Site>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("[io::csv::read] Failed to parse CSV")?;

    sites_from_frame(&df)
}

/// Convert a string-typed, headerless frame (one column per site) into sites.
fn sites_from_frame(df: &DataFrame) -> Result<Vec<Site>> {
    ensure!(df.height() >= 3, "[io::csv::read] Expected 3 rows (x, y, weight), found {}", df.height());

    let mut sites = Vec::with_capacity(df.width());
    for (i, column) in df.get_columns().iter().enumerate() {
        let column = column.cast(&DataType::String)?;
        let values = column.str()?;
        let fields: Vec<Option<&str>> = (0..3)
            .map(|row| values.get(row).map(str::trim).filter(|s| !s.is_empty()))
            .collect();

        match fields.as_slice() {
            // trailing separator
            [None, None, None] => continue,
            [Some(x), Some(y), Some(weight)] => sites.push(parse_site(i + 1, x, y, weight)?),
            _ => bail!("[io::csv::read] Column {} is incomplete; the x, y and weight rows must have equal length", i + 1),
        }
    }

    ensure!(!sites.is_empty(), "[io::csv::read] CSV contains no sites");
    Ok(sites)
}

fn parse_site(column: usize, x: &str, y: &str, weight: &str) -> Result<Site> {
    let parse = |row: &str, value: &str| -> Result<u32> {
        value.parse::<u32>()
            .with_context(|| format!("[io::csv::read] Column {column}: {row} value '{value}' is not a non-negative integer"))
    };

    Site::new(parse("x", x)?, parse("y", y)?, parse("weight", weight)?)
        .with_context(|| format!("[io::csv::read] Column {column} is not a valid site"))
}
