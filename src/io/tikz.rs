//! TikZ diagrams of the site grid and facility locations.

use std::{collections::HashMap, fmt::Write as _, fs, path::Path};

use anyhow::{Context, Result};

use crate::site::Site;

const CIRCLE_RADIUS: f64 = 0.4;

/// Grid extent of a diagram: columns `0..width`, rows `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagramSize {
    pub width: u32,
    pub height: u32,
}

impl DiagramSize {
    /// Smallest extent covering every site.
    pub fn covering(sites: &[Site]) -> Self {
        let width = sites.iter().map(|site| site.x() + 1).max().unwrap_or(0);
        let height = sites.iter().map(|site| site.y() + 1).max().unwrap_or(0);
        Self { width, height }
    }
}

fn draw_circle(out: &mut String, x: i64, y: i64, color: &str) {
    let _ = writeln!(out, "\\draw[{color}] ({x},{y}) circle ({CIRCLE_RADIUS});");
}

fn shade_circle(out: &mut String, x: i64, y: i64, color: &str) {
    let _ = writeln!(out, "\\fill[{color}, opacity=0.4] ({x},{y}) circle ({CIRCLE_RADIUS});");
}

fn draw_text(out: &mut String, x: i64, y: i64, text: &str, color: &str) {
    let _ = writeln!(out, "\\draw[{color}] ({x},{y}) node {{{text}}};");
}

/// Build a `tikzpicture`: a gray circle per empty cell, a red circle with
/// its weight per site, then a green marker per facility.
pub fn tikz_diagram(sites: &[Site], facilities: &[(i64, i64)], size: DiagramSize) -> String {
    let by_cell: HashMap<(u32, u32), &Site> = sites.iter().rev().map(|site| (site.coords(), site)).collect();

    let mut out = String::from("\\begin{tikzpicture}[scale=0.5, font=\\tiny]\n");
    for x in 0..size.width {
        for y in 0..size.height {
            let (gx, gy) = (x as i64, y as i64);
            match by_cell.get(&(x, y)) {
                Some(site) => {
                    draw_circle(&mut out, gx, gy, "red");
                    draw_text(&mut out, gx, gy, &site.weight().to_string(), "red");
                }
                None => draw_circle(&mut out, gx, gy, "gray"),
            }
        }
    }

    out.push_str("\n% Facilities\n");
    for &(x, y) in facilities {
        shade_circle(&mut out, x, y, "green");
        draw_circle(&mut out, x, y, "green");
    }

    out.push_str("\\end{tikzpicture}");
    out
}

/// Write a diagram to `path`.
pub fn write_tikz(path: &Path, sites: &[Site], facilities: &[(i64, i64)], size: DiagramSize) -> Result<()> {
    fs::write(path, tikz_diagram(sites, facilities, size))
        .with_context(|| format!("[io::tikz] Failed to write {}", path.display()))
}
