use epi_core::{EpiError, ErrorInfo};
use epi_fourier::split_pos_neg;
use epi_slice::{Projection, ProjectionSet};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::opts::UncertaintyMode;

/// Coefficient matrix prepared for one propagation rule.
#[derive(Debug, Clone)]
pub enum Kernel {
    /// `M` for the estimate and `M∘M` for the variances.
    StandardError {
        /// Coefficients applied to the estimates.
        coefficients: DMatrix<f64>,
        /// Squared coefficients applied to the variances.
        squared: DMatrix<f64>,
    },
    /// Non-negative and non-positive parts of `M`.
    Interval {
        /// Entries of `M` clamped below at zero.
        positive: DMatrix<f64>,
        /// Entries of `M` clamped above at zero.
        negative: DMatrix<f64>,
    },
}

impl Kernel {
    /// Prepares `matrix` for the given rule.
    pub fn new(matrix: &DMatrix<i32>, mode: UncertaintyMode) -> Self {
        match mode {
            UncertaintyMode::StandardError => Kernel::StandardError {
                coefficients: matrix.map(f64::from),
                squared: matrix.map(|c| f64::from(c * c)),
            },
            UncertaintyMode::Interval => {
                let (positive, negative) = split_pos_neg(matrix);
                Kernel::Interval {
                    positive: positive.map(f64::from),
                    negative: negative.map(f64::from),
                }
            }
        }
    }

    /// Number of formulas (matrix rows).
    pub fn rows(&self) -> usize {
        match self {
            Kernel::StandardError { coefficients, .. } => coefficients.nrows(),
            Kernel::Interval { positive, .. } => positive.nrows(),
        }
    }

    /// Number of inputs per formula (matrix columns).
    pub fn width(&self) -> usize {
        match self {
            Kernel::StandardError { coefficients, .. } => coefficients.ncols(),
            Kernel::Interval { positive, .. } => positive.ncols(),
        }
    }

    /// Applies every formula to one projection pair.
    ///
    /// `first`/`second` are estimate/error or low/high depending on the rule.
    pub fn apply(&self, first: &[f64], second: &[f64]) -> (DVector<f64>, DVector<f64>) {
        match self {
            Kernel::StandardError {
                coefficients,
                squared,
            } => {
                let estimate = DVector::from_column_slice(first);
                let variance = DVector::from_iterator(second.len(), second.iter().map(|e| e * e));
                (
                    coefficients * estimate,
                    (squared * variance).map(f64::sqrt),
                )
            }
            Kernel::Interval { positive, negative } => {
                let low = DVector::from_column_slice(first);
                let high = DVector::from_column_slice(second);
                (
                    positive * &low + negative * &high,
                    positive * &high + negative * &low,
                )
            }
        }
    }
}

/// Applies `kernel` to paired projections.
///
/// Outputs are formula-major: every projection for formula 0, then every
/// projection for formula 1, and so on, matching the tag order.
pub fn apply_kernel(
    kernel: &Kernel,
    first: &ProjectionSet<f64>,
    second: &ProjectionSet<f64>,
    parallel: bool,
) -> Result<(Vec<f64>, Vec<f64>), EpiError> {
    if first.len() != second.len() {
        return Err(EpiError::length_mismatch(
            "projection-count",
            "paired projection set",
            first.len(),
            second.len(),
        ));
    }
    if let Some(bad) = first
        .iter()
        .chain(second.iter())
        .find(|p| p.values.len() != kernel.width())
    {
        return Err(EpiError::Shape(
            ErrorInfo::new("projection-width", "projection does not match the matrix width")
                .with_context("tag", bad.tag.clone())
                .with_context("width", kernel.width().to_string())
                .with_context("len", bad.values.len().to_string()),
        ));
    }

    let apply = |(a, b): (&Projection<f64>, &Projection<f64>)| kernel.apply(&a.values, &b.values);
    let columns: Vec<(DVector<f64>, DVector<f64>)> = if parallel {
        first
            .as_slice()
            .par_iter()
            .zip(second.as_slice().par_iter())
            .map(apply)
            .collect()
    } else {
        first.iter().zip(second.iter()).map(apply).collect()
    };

    let total = kernel.rows() * columns.len();
    let mut results = Vec::with_capacity(total);
    let mut errors = Vec::with_capacity(total);
    for row in 0..kernel.rows() {
        for (value, spread) in &columns {
            results.push(value[row]);
            errors.push(spread[row]);
        }
    }
    Ok((results, errors))
}
