//! Detection of circuit calculations that repeat each other.
//!
//! On landscapes wider than three species, a circuit applied against one
//! background can combine exactly the same fitnesses, with the same signs,
//! as another circuit against another background. Such repeats are found by
//! pushing the landscape *indices* through the projections: a calculation is
//! identified by its `(index, coefficient)` pairs, so equal signatures mean
//! equal results for every possible fitness vector.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, OnceLock};

use epi_core::{circuit_tag, landscape_len, EpiError, ErrorInfo, BINARY_BASE};
use epi_fourier::{circuit_label, circuit_matrix};
use epi_slice::enumerate_projections;
use tracing::debug;

/// Order of the sub-landscapes circuits are defined on.
pub const CIRCUIT_ORDER: usize = 3;

/// Groups of circuit tags that compute the same combination.
///
/// Tags appear in computation order (circuit-major, then projection), so the
/// first member of each group is the one kept. Only groups with at least two
/// members are returned.
pub fn duplicate_groups(species: usize, order: usize) -> Result<Vec<Vec<String>>, EpiError> {
    if order != CIRCUIT_ORDER {
        return Err(EpiError::Domain(
            ErrorInfo::new("duplicate-order", "duplicates are derived for circuits only")
                .with_context("order", order.to_string())
                .with_hint("circuits are defined on three-species sub-landscapes"),
        ));
    }
    let indices: Vec<usize> = (0..landscape_len(species)?).collect();
    let projections = enumerate_projections(&indices, BINARY_BASE, species, order, false)?;
    let circuits = circuit_matrix()?;

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut by_signature: HashMap<Vec<(usize, i32)>, usize> = HashMap::new();
    for (row, coefficients) in circuits.row_iter().enumerate() {
        let label = circuit_label(row)?;
        for projection in &projections {
            let signature: Vec<(usize, i32)> = projection
                .values
                .iter()
                .zip(coefficients.iter())
                .filter(|(_, coefficient)| **coefficient != 0)
                .map(|(&index, &coefficient)| (index, coefficient))
                .collect();
            let tag = circuit_tag(label, &projection.tag);
            match by_signature.entry(signature) {
                Entry::Occupied(slot) => groups[*slot.get()].push(tag),
                Entry::Vacant(slot) => {
                    slot.insert(groups.len());
                    groups.push(vec![tag]);
                }
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    Ok(groups)
}

/// Every tag that repeats an earlier calculation.
pub fn derive_duplicates(species: usize, order: usize) -> Result<BTreeSet<String>, EpiError> {
    Ok(duplicate_groups(species, order)?
        .into_iter()
        .flat_map(|group| group.into_iter().skip(1))
        .collect())
}

/// Memoized [`derive_duplicates`], one entry per `(species, order)`.
pub fn duplicate_set(species: usize, order: usize) -> Result<Arc<BTreeSet<String>>, EpiError> {
    static CACHE: OnceLock<Mutex<HashMap<(usize, usize), Arc<BTreeSet<String>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let key = (species, order);

    if let Some(set) = cache.lock().ok().and_then(|map| map.get(&key).cloned()) {
        return Ok(set);
    }
    let set = Arc::new(derive_duplicates(species, order)?);
    debug!(species, order, duplicates = set.len(), "derived circuit duplicates");
    if let Ok(mut map) = cache.lock() {
        map.entry(key).or_insert_with(|| Arc::clone(&set));
    }
    Ok(set)
}
