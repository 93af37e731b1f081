use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use epi_core::BINARY_BASE;
use epi_slice::enumerate_projections;

use crate::input::Landscape;

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Landscape file, JSON or CSV.
    #[arg(long)]
    pub input: PathBuf,
    /// Number of free species in each projection.
    #[arg(long)]
    pub order: usize,
    /// Number of species; inferred from the input length when absent.
    #[arg(long)]
    pub species: Option<usize>,
    /// Only backgrounds with every fixed species absent.
    #[arg(long)]
    pub standard_only: bool,
    /// Input rows follow the five-species experimental order.
    #[arg(long)]
    pub experimental_order: bool,
}

pub fn run(args: &ProjectArgs, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let mut landscape = Landscape::load(&args.input)?;
    if args.experimental_order {
        landscape = landscape.into_canonical_order()?;
    }
    let species = landscape.species(args.species)?;
    let set = enumerate_projections(
        &landscape.fitness,
        BINARY_BASE,
        species,
        args.order,
        args.standard_only,
    )?;
    for projection in &set {
        let values: Vec<String> = projection.values.iter().map(f64::to_string).collect();
        writeln!(out, "{} {}", projection.tag, values.join(" "))?;
    }
    Ok(())
}
