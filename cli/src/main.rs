mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{draw, field, locate};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Field(args) => field::run(&cli, args),
        Commands::Locate(args) => locate::run(&cli, args),
        Commands::Draw(args) => draw::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
