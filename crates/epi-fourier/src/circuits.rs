//! The twenty order-3 circuits `a..t`.
//!
//! Every circuit is a signed combination of the eight fitnesses of a
//! 3-species landscape, derived from the rows `u011, u101, u110, u111` of the
//! reduced order-3 transform matrix. The combinations go through a
//! cancelling sum, so the coefficients are computed once here in integers and
//! only then applied to data.

use std::sync::OnceLock;

use epi_core::{EpiError, ErrorInfo};
use itertools::Itertools;
use nalgebra::{DMatrix, RowDVector};
use tracing::debug;

use crate::transform::build_reduced;

/// Number of circuits.
pub const CIRCUIT_COUNT: usize = 20;

/// Number of fitnesses a circuit combines.
pub const CIRCUIT_WIDTH: usize = 8;

/// Row of the reduced order-3 matrix holding the full interaction `u111`.
const FULL_INTERACTION_ROW: usize = 3;

/// Signs combining the four reduced rows into circuits `m..t`.
const GROUP3_SIGNS: [[i32; 4]; 8] = [
    [-1, -1, -1, -1],
    [-1, -1, -1, 1],
    [1, 1, -1, -1],
    [1, 1, -1, 1],
    [1, -1, 1, -1],
    [1, -1, 1, 1],
    [-1, 1, 1, 1],
    [-1, 1, 1, -1],
];

/// Letter naming circuit `row` (`0 -> 'a'`).
pub fn circuit_label(row: usize) -> Result<char, EpiError> {
    if row >= CIRCUIT_COUNT {
        return Err(EpiError::Domain(
            ErrorInfo::new("circuit-row", "circuit row out of range")
                .with_context("row", row.to_string()),
        ));
    }
    Ok(char::from(b'a' + row as u8))
}

/// Inverse of [`circuit_label`].
pub fn circuit_row(label: char) -> Option<usize> {
    ('a'..='t')
        .contains(&label)
        .then(|| (label as u8 - b'a') as usize)
}

/// Builds the 20 × 8 circuit matrix, rows stacked `a..f`, `g..l`, `m..t`.
pub fn build_circuit_matrix() -> Result<DMatrix<i32>, EpiError> {
    let reduced = build_reduced(3)?;
    let rows: Vec<RowDVector<i32>> = pair_with_full_interaction(&reduced)?
        .into_iter()
        .chain(pair_two_way_rows(&reduced)?)
        .chain(signed_combinations(&reduced)?)
        .collect();
    Ok(DMatrix::from_rows(&rows))
}

/// Process-wide circuit matrix, built on first use.
pub fn circuit_matrix() -> Result<&'static DMatrix<i32>, EpiError> {
    static MATRIX: OnceLock<Result<DMatrix<i32>, EpiError>> = OnceLock::new();
    MATRIX
        .get_or_init(|| {
            debug!("building circuit matrix");
            build_circuit_matrix()
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Circuits `a..f`: each two-way row, last first, plus and minus `u111`.
fn pair_with_full_interaction(reduced: &DMatrix<i32>) -> Result<Vec<RowDVector<i32>>, EpiError> {
    let full = reduced.row(FULL_INTERACTION_ROW);
    let mut out = Vec::with_capacity(6);
    for idx in (0..FULL_INTERACTION_ROW).rev() {
        let row = reduced.row(idx);
        out.push(halve(&(&row + &full))?);
        out.push(halve(&(&row - &full))?);
    }
    Ok(out)
}

/// Circuits `g..l`: pairs of two-way rows in reverse combination order.
fn pair_two_way_rows(reduced: &DMatrix<i32>) -> Result<Vec<RowDVector<i32>>, EpiError> {
    let pairs: Vec<(usize, usize)> = (0..FULL_INTERACTION_ROW).tuple_combinations().collect();
    let mut out = Vec::with_capacity(6);
    for &(low, high) in pairs.iter().rev() {
        let (low, high) = (reduced.row(low), reduced.row(high));
        out.push(halve(&(&high + &low))?);
        out.push(halve(&(&high - &low))?);
    }
    Ok(out)
}

/// Circuits `m..t`: fixed signed sums of all four reduced rows.
fn signed_combinations(reduced: &DMatrix<i32>) -> Result<Vec<RowDVector<i32>>, EpiError> {
    let signs = DMatrix::from_fn(GROUP3_SIGNS.len(), 4, |r, c| GROUP3_SIGNS[r][c]);
    let combined = signs * reduced;
    combined
        .row_iter()
        .map(|row| halve(&row.into_owned()))
        .collect()
}

/// Divides every entry by two, refusing to round.
fn halve(row: &RowDVector<i32>) -> Result<RowDVector<i32>, EpiError> {
    if let Some(col) = row.iter().position(|value| value % 2 != 0) {
        return Err(EpiError::Arithmetic(
            ErrorInfo::new("inexact-halving", "circuit coefficient is odd before halving")
                .with_context("column", col.to_string())
                .with_context("value", row[col].to_string()),
        ));
    }
    Ok(row.map(|value| value / 2))
}
