//! Field heatmap rendering.

use std::{io::Write, path::Path};

use anyhow::Result;

use crate::{field::Field, io::svg::{DARK_COLOR, SvgWriter, heat_color}, site::Site};

/// Layout constants for the heatmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Distance between neighbouring cell centers.
    pub grid_size: f64,
    /// Circle radius of a cell.
    pub radius: f64,
    /// Empty border around the board.
    pub margin: f64,
    /// Print scores and weights inside the circles.
    pub labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { grid_size: 45.0, radius: 20.0, margin: 0.0, labels: true }
    }
}

impl RenderOptions {
    /// Board `(width, height)` for inclusive grid bounds.
    pub fn board_size(&self, (max_x, max_y): (u32, u32)) -> (f64, f64) {
        let extent = 2.0 * self.radius + 2.0 * self.margin;
        (max_x as f64 * self.grid_size + extent, max_y as f64 * self.grid_size + extent)
    }

    /// Center of grid point `(x, y)` on the board; y grows upward.
    pub fn center(&self, (x, y): (i64, i64), max_y: u32) -> (f64, f64) {
        let offset = self.margin + self.radius;
        (offset + self.grid_size * x as f64, offset + self.grid_size * (max_y as i64 - y) as f64)
    }
}

/// Render the heatmap of `field` with its sites and facility markers to `path`.
pub fn write_heatmap(path: &Path, field: &Field, sites: &[Site], facilities: &[(i64, i64)], options: &RenderOptions) -> Result<()> {
    let mut writer = SvgWriter::create(path)?;
    render(&mut writer, field, sites, facilities, options)
}

/// Render the heatmap into an SVG string.
pub fn heatmap_string(field: &Field, sites: &[Site], facilities: &[(i64, i64)], options: &RenderOptions) -> Result<String> {
    let mut writer = SvgWriter::buffer();
    render(&mut writer, field, sites, facilities, options)?;
    writer.into_string()
}

fn render<W: Write>(writer: &mut SvgWriter<W>, field: &Field, sites: &[Site], facilities: &[(i64, i64)], options: &RenderOptions) -> Result<()> {
    let bounds = field.bounds();
    let (width, height) = options.board_size(bounds);
    let center = |point: (i64, i64)| options.center(point, bounds.1);

    writer.write_header(width, height, DARK_COLOR)?;
    writer.write_styles()?;

    for cell in field.cells() {
        let (cx, cy) = center((cell.x as i64, cell.y as i64));
        writer.write_circle(cx, cy, options.radius, "cell", Some(heat_color(cell.normalized_score)))?;
        if options.labels {
            writer.write_label(cx, cy, &format!("{:.2}", cell.normalized_score))?;
        }
    }

    for site in sites {
        let (cx, cy) = center((site.x() as i64, site.y() as i64));
        writer.write_circle(cx, cy, options.radius, "site", None)?;
        if options.labels {
            writer.write_label(cx, cy, &site.weight().to_string())?;
        }
    }

    for &facility in facilities {
        let (cx, cy) = center(facility);
        writer.write_circle(cx, cy, options.radius, "facility", None)?;
    }

    writer.write_footer()
}
