use std::error::Error;
use std::io::Write;

use clap::Args;
use epi_fourier::{build_full, circuit_label, circuit_matrix, epistatic_masks, reduced_matrix};

#[derive(Args, Debug)]
pub struct FourierArgs {
    /// Rank of the transform.
    #[arg(long)]
    pub order: usize,
    /// Drop the rows without interaction.
    #[arg(long)]
    pub reduced: bool,
}

/// Prints the circuit matrix, one labelled row per circuit.
pub fn run_circuits(out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let matrix = circuit_matrix()?;
    for (row, coefficients) in matrix.row_iter().enumerate() {
        let cells: Vec<String> = coefficients.iter().map(|c| format!("{c:>2}")).collect();
        writeln!(out, "{} {}", circuit_label(row)?, cells.join(" "))?;
    }
    Ok(())
}

/// Prints a transform matrix, each row prefixed by its mask in binary.
pub fn run_fourier(args: &FourierArgs, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let (masks, matrix) = if args.reduced {
        (epistatic_masks(args.order), reduced_matrix(args.order)?.as_ref().clone())
    } else {
        let matrix = build_full(args.order)?;
        ((0..matrix.nrows()).collect(), matrix)
    };
    let width = args.order.max(1);
    for (mask, coefficients) in masks.iter().zip(matrix.row_iter()) {
        let cells: Vec<String> = coefficients.iter().map(|c| format!("{c:>2}")).collect();
        writeln!(out, "{mask:0width$b} {}", cells.join(" "))?;
    }
    Ok(())
}
