use epi_core::{format_context, Context, EpiError, ErrorInfo, MAX_SPECIES};
use itertools::Itertools;

use crate::tensor::TensorProjector;

/// Largest base whose fixed values still print as one tag digit.
pub const MAX_BASE: usize = 10;

/// One low-order slice of a landscape.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<T> {
    /// Background assignment the slice was taken against.
    pub context: Context,
    /// Context tag, e.g. `AB1C0`.
    pub tag: String,
    /// Values over the free species in their own flat order.
    pub values: Vec<T>,
}

/// Ordered projections of one landscape at one order.
///
/// Ordering is background index-set first, then value assignment; circuit
/// and coordinate tags are zipped against it positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSet<T> {
    /// Extent of every axis.
    pub base: usize,
    /// Number of species in the source landscape.
    pub full_rank: usize,
    /// Number of free species per projection.
    pub proj_rank: usize,
    items: Vec<Projection<T>>,
}

impl<T> ProjectionSet<T> {
    /// Number of projections.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the set holds no projection.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over projections in enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Projection<T>> {
        self.items.iter()
    }

    /// Borrows the projections as a slice.
    pub fn as_slice(&self) -> &[Projection<T>] {
        &self.items
    }

    /// Context tags in enumeration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|p| p.tag.as_str())
    }
}

impl<T> IntoIterator for ProjectionSet<T> {
    type Item = Projection<T>;
    type IntoIter = std::vec::IntoIter<Projection<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ProjectionSet<T> {
    type Item = &'a Projection<T>;
    type IntoIter = std::slice::Iter<'a, Projection<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Lists every background context for an order-`proj_rank` slice.
///
/// Background index-sets come in lexicographic combination order; within
/// each, value assignments count up with the last fixed axis fastest. With
/// `standard_only` the all-zero assignment is the only one.
pub fn background_contexts(
    base: usize,
    full_rank: usize,
    proj_rank: usize,
    standard_only: bool,
) -> Result<Vec<Context>, EpiError> {
    check_geometry(base, full_rank, proj_rank)?;
    let fixed = full_rank - proj_rank;
    let assignments = if standard_only {
        vec![vec![0; fixed]]
    } else {
        value_assignments(base, fixed)
    };

    let mut contexts = Vec::new();
    for axes in (0..full_rank).combinations(fixed) {
        for values in &assignments {
            contexts.push(Context::from_pairs(
                axes.iter().copied().zip(values.iter().copied()),
            ));
        }
    }
    Ok(contexts)
}

/// Extracts every order-`proj_rank` projection of `w` with its tag.
pub fn enumerate_projections<T: Copy>(
    w: &[T],
    base: usize,
    full_rank: usize,
    proj_rank: usize,
    standard_only: bool,
) -> Result<ProjectionSet<T>, EpiError> {
    check_geometry(base, full_rank, proj_rank)?;
    let tensor_geometry = TensorProjector::new(base, full_rank)?;
    // Reject a mis-sized input before enumerating backgrounds.
    let tensor = tensor_geometry.reshape(w)?;
    let contexts = background_contexts(base, full_rank, proj_rank, standard_only)?;

    let items = contexts
        .into_iter()
        .map(|context| {
            let values = tensor.project(&context)?;
            let tag = format_context(&context, full_rank)?;
            Ok(Projection {
                context,
                tag,
                values,
            })
        })
        .collect::<Result<Vec<_>, EpiError>>()?;

    Ok(ProjectionSet {
        base,
        full_rank,
        proj_rank,
        items,
    })
}

/// Projections against all-absent backgrounds only.
pub fn enumerate_standard_projections<T: Copy>(
    w: &[T],
    base: usize,
    full_rank: usize,
    proj_rank: usize,
) -> Result<ProjectionSet<T>, EpiError> {
    enumerate_projections(w, base, full_rank, proj_rank, true)
}

fn value_assignments(base: usize, len: usize) -> Vec<Vec<usize>> {
    let count = base.pow(len as u32);
    (0..count)
        .map(|mut code| {
            let mut digits = vec![0; len];
            for digit in digits.iter_mut().rev() {
                *digit = code % base;
                code /= base;
            }
            digits
        })
        .collect()
}

fn check_geometry(base: usize, full_rank: usize, proj_rank: usize) -> Result<(), EpiError> {
    if !(2..=MAX_BASE).contains(&base) {
        return Err(EpiError::Domain(
            ErrorInfo::new("projection-base", "base must lie in 2..=10")
                .with_context("base", base.to_string()),
        ));
    }
    if proj_rank == 0 || proj_rank > full_rank || full_rank > MAX_SPECIES {
        return Err(EpiError::Domain(
            ErrorInfo::new("projection-rank", "projection order out of range")
                .with_context("full_rank", full_rank.to_string())
                .with_context("proj_rank", proj_rank.to_string())
                .with_hint(format!("require 0 < order <= species <= {MAX_SPECIES}")),
        ));
    }
    Ok(())
}
