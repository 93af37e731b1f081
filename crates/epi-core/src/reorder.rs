//! Conversion from the experimental measurement order to canonical bit order.
//!
//! Experiments on five species list their setups by the number of species
//! present (none, singles, pairs, …). The canonical order indexes setup
//! `b0 b1 b2 b3 b4` at position `0bb0b1b2b3b4`, with `b0` the most
//! significant bit.

use crate::errors::EpiError;

/// Canonical index for every experimental position of a 5-species run.
pub const DATA_TO_CANONICAL_PERM: [usize; 32] = [
    0b00000, 0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b11000, 0b10100, 0b10010, 0b10001,
    0b01100, 0b01010, 0b01001, 0b00110, 0b00101, 0b00011, 0b11100, 0b11010, 0b11001, 0b10110,
    0b10101, 0b10011, 0b01110, 0b01101, 0b01011, 0b00111, 0b11110, 0b11101, 0b11011, 0b10111,
    0b01111, 0b11111,
];

/// Moves experimental entry `i` to canonical position `DATA_TO_CANONICAL_PERM[i]`.
///
/// Works for flat vectors and for the rows of a table alike.
pub fn to_canonical_order<T: Clone>(items: &[T]) -> Result<Vec<T>, EpiError> {
    check_len(items.len())?;
    let mut slots: Vec<Option<T>> = vec![None; items.len()];
    for (item, &target) in items.iter().zip(DATA_TO_CANONICAL_PERM.iter()) {
        slots[target] = Some(item.clone());
    }
    Ok(slots.into_iter().flatten().collect())
}

/// Inverse of [`to_canonical_order`].
pub fn from_canonical_order<T: Clone>(items: &[T]) -> Result<Vec<T>, EpiError> {
    check_len(items.len())?;
    Ok(DATA_TO_CANONICAL_PERM
        .iter()
        .map(|&source| items[source].clone())
        .collect())
}

fn check_len(len: usize) -> Result<(), EpiError> {
    if len != DATA_TO_CANONICAL_PERM.len() {
        return Err(EpiError::length_mismatch(
            "reorder-length",
            "experimental table",
            DATA_TO_CANONICAL_PERM.len(),
            len,
        ));
    }
    Ok(())
}
