use std::path::PathBuf;

/// Weighted facility location CLI
#[derive(clap::Parser, Debug)]
#[command(name = "facloc", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the weighted-distance field and list the best cells
    Field(FieldArgs),

    /// Solve for the optimal facility location(s)
    Locate(LocateArgs),

    /// Print a TikZ diagram of the sites and facilities
    Draw(DrawArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Svg,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Mixed integer linear program
    Milp,
    /// Brute force over every grid cell
    Exhaustive,
}

#[derive(clap::Args, Debug)]
pub struct FieldArgs {
    /// Input site table (x row, y row, weight row)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Output file for the field
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format, defaults to the output file extension or csv
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of best cells to print
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Map a zero-width score range to all zeros instead of failing
    #[arg(long)]
    pub zero_degenerate: bool,

    /// Facility marker for the SVG heatmap, as X,Y (repeatable)
    #[arg(long = "facility", value_parser = parse_point)]
    pub facilities: Vec<(i64, i64)>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct LocateArgs {
    /// Input site table (x row, y row, weight row)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Number of facilities
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub facilities: u8,

    /// Solution method
    #[arg(short, long, value_enum, default_value_t = Method::Milp)]
    pub method: Method,

    /// Write the formulated model as a CPLEX LP file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub lp: Option<PathBuf>,

    /// Big-M constant of the two-facility model
    #[arg(long, default_value_t = facloc::model::DEFAULT_BIG_M)]
    pub big_m: f64,

    /// Write the solved plan as JSON
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct DrawArgs {
    /// Input site table (x row, y row, weight row)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Facility to mark, as X,Y (repeatable)
    #[arg(long = "facility", value_parser = parse_point)]
    pub facilities: Vec<(i64, i64)>,

    /// Number of grid columns, defaults to the site bounds
    #[arg(long)]
    pub width: Option<u32>,

    /// Number of grid rows, defaults to the site bounds
    #[arg(long)]
    pub height: Option<u32>,

    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Parse an `X,Y` grid point.
fn parse_point(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| v.trim().parse::<i64>().map_err(|e| format!("invalid coordinate '{v}': {e}"));
    Ok((parse(x)?, parse(y)?))
}
