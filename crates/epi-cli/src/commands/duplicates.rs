use std::error::Error;
use std::io::Write;

use clap::Args;
use epi_engine::{duplicate_groups, duplicate_set, CIRCUIT_ORDER};

#[derive(Args, Debug)]
pub struct DuplicatesArgs {
    /// Number of species in the landscape.
    #[arg(long)]
    pub species: usize,
    /// Print each group with its kept calculation first.
    #[arg(long)]
    pub groups: bool,
}

pub fn run(args: &DuplicatesArgs, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    if args.groups {
        for group in duplicate_groups(args.species, CIRCUIT_ORDER)? {
            writeln!(out, "{}", group.join(" "))?;
        }
        return Ok(());
    }
    for tag in duplicate_set(args.species, CIRCUIT_ORDER)?.iter() {
        writeln!(out, "{tag}")?;
    }
    Ok(())
}
