use epi_core::{
    check_species, circuit_tag, coordinate_tag, landscape_len, EpiError, ErrorInfo, BINARY_BASE,
};
use epi_fourier::{circuit_label, circuit_matrix, epistatic_masks, reduced_matrix};
use epi_slice::{enumerate_projections, ProjectionSet};
use tracing::debug;

use crate::duplicates::{duplicate_set, CIRCUIT_ORDER};
use crate::opts::ComputeOpts;
use crate::propagate::{apply_kernel, Kernel};
use crate::report::{EpistasisReport, ResultBlock};

/// Computes every circuit and interaction coordinate of a landscape.
///
/// `w` and `w_err` are estimates and standard errors, or low and high
/// endpoints when `opts.mode` is interval. Circuit results come first, then
/// coordinates for each order `3..=species`.
pub fn compute(
    w: &[f64],
    w_err: &[f64],
    species: usize,
    opts: &ComputeOpts,
) -> Result<EpistasisReport, EpiError> {
    check_landscape(w, w_err, species)?;
    if species < CIRCUIT_ORDER {
        return Err(EpiError::Domain(
            ErrorInfo::new("species-range", "too few species for order-3 epistasis")
                .with_context("species", species.to_string())
                .with_hint("provide at least three species"),
        ));
    }

    let mut report = EpistasisReport::new(species, opts.mode);
    report.append(compute_circuits(w, w_err, species, opts)?)?;
    for order in CIRCUIT_ORDER..=species {
        report.append(compute_coordinates(w, w_err, species, order, opts)?)?;
    }
    debug!(species, calculations = report.len(), mode = ?opts.mode, "epistasis computed");
    Ok(report)
}

/// Convenience form taking the interval flag directly.
pub fn compute_epistasis(
    w: &[f64],
    w_err: &[f64],
    species: usize,
    interval: bool,
) -> Result<EpistasisReport, EpiError> {
    let opts = if interval {
        ComputeOpts::interval()
    } else {
        ComputeOpts::default()
    };
    compute(w, w_err, species, &opts)
}

/// Applies all twenty circuits to every order-3 projection.
///
/// Tags are circuit-major. Calculations repeating an earlier one are dropped
/// when `opts.deduplicate` is set.
pub fn compute_circuits(
    w: &[f64],
    w_err: &[f64],
    species: usize,
    opts: &ComputeOpts,
) -> Result<ResultBlock, EpiError> {
    check_landscape(w, w_err, species)?;
    let (first, second) = paired_projections(w, w_err, species, CIRCUIT_ORDER)?;
    let matrix = circuit_matrix()?;
    let kernel = Kernel::new(matrix, opts.mode);
    let (results, errors) = apply_kernel(&kernel, &first, &second, opts.parallel)?;

    let mut tags = Vec::with_capacity(results.len());
    for row in 0..matrix.nrows() {
        let label = circuit_label(row)?;
        tags.extend(first.tags().map(|context| circuit_tag(label, context)));
    }
    let block = ResultBlock {
        results,
        errors,
        tags,
    };
    if !opts.deduplicate {
        return Ok(block);
    }

    let duplicates = duplicate_set(species, CIRCUIT_ORDER)?;
    let mut kept = ResultBlock::default();
    for ((result, error), tag) in block
        .results
        .into_iter()
        .zip(block.errors)
        .zip(block.tags)
    {
        if duplicates.contains(&tag) {
            continue;
        }
        kept.results.push(result);
        kept.errors.push(error);
        kept.tags.push(tag);
    }
    debug!(
        projections = first.len(),
        kept = kept.len(),
        duplicates = duplicates.len(),
        "circuits applied"
    );
    Ok(kept)
}

/// Applies the reduced transform of rank `order` to every order projection.
///
/// Tags are coordinate-major, one coordinate per non-singleton row mask.
pub fn compute_coordinates(
    w: &[f64],
    w_err: &[f64],
    species: usize,
    order: usize,
    opts: &ComputeOpts,
) -> Result<ResultBlock, EpiError> {
    check_landscape(w, w_err, species)?;
    let (first, second) = paired_projections(w, w_err, species, order)?;
    let matrix = reduced_matrix(order)?;
    let kernel = Kernel::new(&matrix, opts.mode);
    let (results, errors) = apply_kernel(&kernel, &first, &second, opts.parallel)?;

    let mut tags = Vec::with_capacity(results.len());
    for mask in epistatic_masks(order) {
        for context in first.tags() {
            tags.push(coordinate_tag(mask, order, context)?);
        }
    }
    debug!(
        order,
        projections = first.len(),
        coordinates = matrix.nrows(),
        "coordinates applied"
    );
    Ok(ResultBlock {
        results,
        errors,
        tags,
    })
}

fn paired_projections(
    w: &[f64],
    w_err: &[f64],
    species: usize,
    order: usize,
) -> Result<(ProjectionSet<f64>, ProjectionSet<f64>), EpiError> {
    let first = enumerate_projections(w, BINARY_BASE, species, order, false)?;
    let second = enumerate_projections(w_err, BINARY_BASE, species, order, false)?;
    Ok((first, second))
}

fn check_landscape(w: &[f64], w_err: &[f64], species: usize) -> Result<(), EpiError> {
    check_species(species)?;
    let expected = landscape_len(species)?;
    if w.len() != expected {
        return Err(EpiError::length_mismatch(
            "fitness-length",
            "fitness vector",
            expected,
            w.len(),
        ));
    }
    if w_err.len() != expected {
        return Err(EpiError::length_mismatch(
            "fitness-error-length",
            "fitness error vector",
            expected,
            w_err.len(),
        ));
    }
    Ok(())
}
