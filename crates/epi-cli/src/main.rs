use std::error::Error;
use std::io::Write;

use clap::{Parser, Subcommand};
use commands::{
    compute::{self, ComputeArgs},
    duplicates::{self, DuplicatesArgs},
    matrices::{self, FourierArgs},
    project::{self, ProjectArgs},
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod input;

#[derive(Parser, Debug)]
#[command(
    name = "epistat",
    about = "Circuit and interaction coordinate epistasis for binary fitness landscapes"
)]
struct Cli {
    /// Log engine internals at debug level.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every circuit and interaction coordinate of a landscape.
    Compute(ComputeArgs),
    /// List the projections of a landscape onto sub-landscapes.
    Project(ProjectArgs),
    /// Print the twenty circuit coefficient rows.
    Circuits,
    /// Print a signed transform matrix.
    Fourier(FourierArgs),
    /// List circuit calculations that repeat an earlier one.
    Duplicates(DuplicatesArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Compute(args) => compute::run(&args, &mut out)?,
        Command::Project(args) => project::run(&args, &mut out)?,
        Command::Circuits => matrices::run_circuits(&mut out)?,
        Command::Fourier(args) => matrices::run_fourier(&args, &mut out)?,
        Command::Duplicates(args) => duplicates::run(&args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
