//! CPLEX LP text serialization.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

use crate::model::{LinearExpr, LinearProgram, ObjSense, Sense, VarKind, Variable};

/// Write `lp` in CPLEX LP format.
pub fn write_lp<W: Write>(lp: &LinearProgram, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "\\* {} *\\", lp.name())?;
    match lp.sense() {
        ObjSense::Minimize => writeln!(writer, "Minimize")?,
        ObjSense::Maximize => writeln!(writer, "Maximize")?,
    }
    writeln!(writer, "OBJ: {}", fmt_expr(lp, lp.objective()))?;

    writeln!(writer, "Subject To")?;
    for c in lp.constraints() {
        writeln!(writer, "{}: {} {} {}", c.name, fmt_expr(lp, &c.expr), fmt_sense(c.sense), fmt_num(c.rhs))?;
    }

    let bounds: Vec<String> = lp.variables().iter()
        .filter(|var| var.kind != VarKind::Binary)
        .filter_map(fmt_bounds)
        .collect();
    if !bounds.is_empty() {
        writeln!(writer, "Bounds")?;
        for line in bounds { writeln!(writer, "{line}")? }
    }

    write_section(writer, "Generals", lp.variables(), VarKind::Integer)?;
    write_section(writer, "Binaries", lp.variables(), VarKind::Binary)?;

    writeln!(writer, "End")
}

/// Render `lp` as an LP-format string.
pub fn to_lp_string(lp: &LinearProgram) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec<u8> cannot fail, and every fragment is valid UTF-8.
    let _ = write_lp(lp, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write `lp` to a file at `path`.
pub fn write_lp_file(lp: &LinearProgram, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[model::lp] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_lp(lp, &mut writer)
        .with_context(|| format!("[model::lp] Failed to write LP file {}", path.display()))?;
    writer.flush()
        .with_context(|| format!("[model::lp] Failed to flush {}", path.display()))
}

fn write_section<W: Write>(writer: &mut W, header: &str, variables: &[Variable], kind: VarKind) -> std::io::Result<()> {
    let names: Vec<&str> = variables.iter()
        .filter(|var| var.kind == kind)
        .map(|var| var.name.as_str())
        .collect();
    if names.is_empty() { return Ok(()) }

    writeln!(writer, "{header}")?;
    for name in names { writeln!(writer, "{name}")? }
    Ok(())
}

/// Bounds line for a non-binary variable; `None` when the LP default (`0 <= x`) applies.
fn fmt_bounds(var: &Variable) -> Option<String> {
    match (var.lower, var.upper) {
        (None, None) => Some(format!("{} free", var.name)),
        (None, Some(hi)) => Some(format!("-inf <= {} <= {}", var.name, fmt_num(hi))),
        (Some(lo), None) if lo == 0.0 => None,
        (Some(lo), None) => Some(format!("{} >= {}", var.name, fmt_num(lo))),
        (Some(lo), Some(hi)) if lo == hi => Some(format!("{} = {}", var.name, fmt_num(lo))),
        (Some(lo), Some(hi)) => Some(format!("{} <= {} <= {}", fmt_num(lo), var.name, fmt_num(hi))),
    }
}

fn fmt_sense(sense: Sense) -> &'static str {
    match sense {
        Sense::Le => "<=",
        Sense::Ge => ">=",
        Sense::Eq => "=",
    }
}

fn fmt_num(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value}")
    }
}

fn fmt_expr(lp: &LinearProgram, expr: &LinearExpr) -> String {
    let mut out = String::new();
    for (i, (var, coef)) in expr.terms().enumerate() {
        let sign = match (i, coef < 0.0) {
            (0, true) => "- ",
            (0, false) => "",
            (_, true) => " - ",
            (_, false) => " + ",
        };
        out.push_str(sign);
        if (coef.abs() - 1.0).abs() > 1e-12 {
            out.push_str(&fmt_num(coef.abs()));
            out.push(' ');
        }
        out.push_str(&lp.variable(var).name);
    }

    if expr.constant_term().abs() > 1e-12 || out.is_empty() {
        let c = expr.constant_term();
        match (out.is_empty(), c < 0.0) {
            (true, _) => out.push_str(&fmt_num(c)),
            (false, true) => out.push_str(&format!(" - {}", fmt_num(-c))),
            (false, false) => out.push_str(&format!(" + {}", fmt_num(c))),
        }
    }
    out
}
