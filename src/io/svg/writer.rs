//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

use crate::io::svg::Rgb;

/// Thin SVG emitter over any byte sink.
pub(crate) struct SvgWriter<W: Write> {
    writer: W,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl<W: Write> Write for SvgWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter<BufWriter<File>> {
    /// Create a new SVG writer to a file path
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl SvgWriter<Vec<u8>> {
    /// Create a string-backed SVG writer
    pub(crate) fn buffer() -> Self {
        Self { writer: Vec::new() }
    }

    /// Get the SVG string
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

impl<W: Write> SvgWriter<W> {
    /// Write the XML declaration, the opening <svg> tag and a background rect.
    pub(crate) fn write_header(&mut self, width: f64, height: f64, background: Rgb) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="{background}"/>"##)?;
        Ok(())
    }

    /// Write SVG styles for grid features.
    pub(crate) fn write_styles(&mut self) -> Result<()> {
        writeln!(self, r##"<defs>
<style>
    .cell {{ stroke: none; }}
    .site {{ fill: #a9a9a9; stroke: #d3d3d3; stroke-width: 1; }}
    .facility {{ fill: none; stroke: #ff0000; stroke-width: 2; }}
    .label {{ fill: #ffffff; font-family: sans-serif; font-size: 11px; text-anchor: middle; dominant-baseline: central; }}
</style>
</defs>"##)?;
        Ok(())
    }

    /// Write one circle with the given class and optional fill override.
    pub(crate) fn write_circle(&mut self, cx: f64, cy: f64, r: f64, class: &str, fill: Option<Rgb>) -> Result<()> {
        match fill {
            Some(fill) => writeln!(self, r#"<circle class="{class}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#)?,
            None => writeln!(self, r#"<circle class="{class}" cx="{cx}" cy="{cy}" r="{r}"/>"#)?,
        }
        Ok(())
    }

    /// Write a centered text label.
    pub(crate) fn write_label(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        writeln!(self, r#"<text class="label" x="{x}" y="{y}">{text}</text>"#)?;
        Ok(())
    }

    /// Write the closing </svg> tag and flush.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        self.flush()?;
        Ok(())
    }
}
