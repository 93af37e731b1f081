#![deny(missing_docs)]
#![doc = "Signed transform and circuit coefficient matrices for epistasis decomposition."]

/// The twenty order-3 circuit formulas.
pub mod circuits;
/// Positive/negative matrix split for interval arithmetic.
pub mod split;
/// Recursive construction of the interaction transform matrix.
pub mod transform;

pub use circuits::{
    build_circuit_matrix, circuit_label, circuit_matrix, circuit_row, CIRCUIT_COUNT,
    CIRCUIT_WIDTH,
};
pub use split::split_pos_neg;
pub use transform::{
    build_full, build_reduced, epistatic_masks, reduced_matrix, singleton_indices,
};
