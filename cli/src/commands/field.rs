use std::path::Path;

use anyhow::Result;
use facloc::{Field, RenderOptions, io};

use crate::cli::{Cli, FieldArgs, OutputFormat};

pub fn run(cli: &Cli, args: &FieldArgs) -> Result<()> {
    if cli.verbose > 0 { eprintln!("[field] loading sites from {}", args.data.display()); }
    let sites = io::csv::read_sites(&args.data)?;
    if cli.verbose > 0 { eprintln!("[field] {} sites loaded", sites.len()); }

    let field = if args.zero_degenerate { Field::evaluate_or_zero(&sites)? } else { Field::evaluate(&sites)? };
    let (max_x, max_y) = field.bounds();
    if cli.verbose > 0 {
        eprintln!("[field] {} cells over [0, {max_x}] x [0, {max_y}], scores {}..{}",
            field.len(), field.best_score(), field.worst_score());
    }

    for cell in field.ranked().into_iter().take(args.top) {
        println!("({}, {}) raw={} normalized={:.4}", cell.x, cell.y, cell.raw_score, cell.normalized_score);
    }

    if let Some(out_path) = &args.output {
        super::ensure_writable(out_path, args.force)?;
        let format = args.format.unwrap_or_else(|| format_from_extension(out_path));
        if cli.verbose > 0 { eprintln!("[field] writing {format:?} to {}", out_path.display()); }

        match format {
            OutputFormat::Csv => io::csv::write_field_csv(&field, out_path)?,
            OutputFormat::Json => io::json::write_field_json(&field, out_path)?,
            OutputFormat::Svg => io::svg::write_heatmap(out_path, &field, &sites, &args.facilities, &RenderOptions::default())?,
        }
    }

    Ok(())
}

fn format_from_extension(path: &Path) -> OutputFormat {
    match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputFormat::Json,
        Some("svg") => OutputFormat::Svg,
        _ => OutputFormat::Csv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_from_extension(Path::new("out/field.JSON")), OutputFormat::Json);
        assert_eq!(format_from_extension(Path::new("heat.svg")), OutputFormat::Svg);
        assert_eq!(format_from_extension(Path::new("field.csv")), OutputFormat::Csv);
        assert_eq!(format_from_extension(Path::new("field")), OutputFormat::Csv);
    }
}
