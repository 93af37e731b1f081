#![deny(missing_docs)]
#![doc = "Tensor views of fitness landscapes and enumeration of their low-order projections."]

/// Background enumeration and tagged projections.
pub mod enumerate;
/// Flat-vector tensor views.
pub mod tensor;

pub use enumerate::{
    background_contexts, enumerate_projections, enumerate_standard_projections, Projection,
    ProjectionSet, MAX_BASE,
};
pub use tensor::{Tensor, TensorProjector};
