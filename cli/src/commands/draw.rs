use anyhow::Result;
use facloc::io::{self, tikz::DiagramSize};

use crate::cli::{Cli, DrawArgs};

pub fn run(cli: &Cli, args: &DrawArgs) -> Result<()> {
    if cli.verbose > 0 { eprintln!("[draw] loading sites from {}", args.data.display()); }
    let sites = io::csv::read_sites(&args.data)?;

    let covering = DiagramSize::covering(&sites);
    let size = DiagramSize {
        width: args.width.unwrap_or(covering.width),
        height: args.height.unwrap_or(covering.height),
    };
    if cli.verbose > 0 { eprintln!("[draw] {} x {} grid, {} facilities", size.width, size.height, args.facilities.len()); }

    match &args.output {
        Some(out_path) => {
            super::ensure_writable(out_path, args.force)?;
            io::tikz::write_tikz(out_path, &sites, &args.facilities, size)?;
            if cli.verbose > 0 { eprintln!("[draw] wrote {}", out_path.display()); }
        }
        None => println!("{}", io::tikz::tikz_diagram(&sites, &args.facilities, size)),
    }

    Ok(())
}
