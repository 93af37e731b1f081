#![deny(missing_docs)]
#![doc = "Core types for the epistasis toolkit: the error taxonomy, background contexts, \
the result tag codec and the experimental-order permutation."]

pub mod errors;
pub mod reorder;
pub mod tags;

pub use errors::{EpiError, ErrorInfo};
pub use reorder::{from_canonical_order, to_canonical_order, DATA_TO_CANONICAL_PERM};
pub use tags::{
    circuit_tag, coordinate_tag, format_context, is_singleton_mask, is_standard,
    modulate_context, Context, Tag, COORDINATE_LABEL,
};

/// Number of options per species (absent or present).
pub const BINARY_BASE: usize = 2;

/// Widest landscape, in species, accepted by the toolkit.
///
/// The engine materializes the reduced transform of rank `species` as dense
/// `f64` kernels, about 270 MB at this cap.
pub const MAX_SPECIES: usize = 12;

/// Number of measured setups for `species` binary species.
pub fn landscape_len(species: usize) -> Result<usize, EpiError> {
    check_species(species)?;
    Ok(1usize << species)
}

/// Recovers the species count from a landscape length.
pub fn species_from_len(len: usize) -> Result<usize, EpiError> {
    if !len.is_power_of_two() {
        return Err(EpiError::Shape(
            ErrorInfo::new("landscape-length", "landscape length is not a power of two")
                .with_context("len", len.to_string()),
        ));
    }
    let species = len.trailing_zeros() as usize;
    check_species(species)?;
    Ok(species)
}

/// Rejects species counts above [`MAX_SPECIES`].
pub fn check_species(species: usize) -> Result<(), EpiError> {
    if species > MAX_SPECIES {
        return Err(EpiError::Domain(
            ErrorInfo::new("species-range", "species count exceeds the supported maximum")
                .with_context("species", species.to_string())
                .with_context("max", MAX_SPECIES.to_string()),
        ));
    }
    Ok(())
}
