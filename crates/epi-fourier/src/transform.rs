use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use epi_core::{check_species, is_singleton_mask, EpiError};
use nalgebra::DMatrix;
use tracing::debug;

/// Row indices of `F_n` carrying no interaction: `0` and every `2^k`, ascending.
pub fn singleton_indices(n: usize) -> Vec<usize> {
    std::iter::once(0).chain((0..n).map(|k| 1usize << k)).collect()
}

/// Row masks kept by [`build_reduced`], ascending.
pub fn epistatic_masks(n: usize) -> Vec<usize> {
    (0..1usize << n).filter(|mask| !is_singleton_mask(*mask)).collect()
}

/// Builds the full `2^n × 2^n` signed transform matrix.
///
/// Entry `(j, i)` equals `(-1)^popcount(i & j)`. The matrix is filled by
/// block doubling, `F_n = [[F, F], [F, -F]]` with `F = F_{n-1}`, so every
/// entry is written once from an already computed quadrant.
pub fn build_full(n: usize) -> Result<DMatrix<i32>, EpiError> {
    check_species(n)?;
    let size = 1usize << n;
    let mut f = DMatrix::<i32>::zeros(size, size);
    f[(0, 0)] = 1;

    let mut quadrant = 1;
    while quadrant < size {
        for col in 0..quadrant {
            for row in 0..quadrant {
                let value = f[(row, col)];
                f[(row, col + quadrant)] = value;
                f[(row + quadrant, col)] = value;
                f[(row + quadrant, col + quadrant)] = -value;
            }
        }
        quadrant *= 2;
    }
    Ok(f)
}

/// Builds `F_n` without its `n + 1` singleton rows.
pub fn build_reduced(n: usize) -> Result<DMatrix<i32>, EpiError> {
    let full = build_full(n)?;
    let kept = epistatic_masks(n);
    Ok(DMatrix::from_fn(kept.len(), full.ncols(), |row, col| {
        full[(kept[row], col)]
    }))
}

/// Memoized [`build_reduced`] for the orders requested by the engine.
pub fn reduced_matrix(n: usize) -> Result<Arc<DMatrix<i32>>, EpiError> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<DMatrix<i32>>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(matrix) = cache.lock().ok().and_then(|map| map.get(&n).cloned()) {
        return Ok(matrix);
    }
    let matrix = Arc::new(build_reduced(n)?);
    debug!(order = n, rows = matrix.nrows(), "built reduced transform matrix");
    if let Ok(mut map) = cache.lock() {
        map.entry(n).or_insert_with(|| Arc::clone(&matrix));
    }
    Ok(matrix)
}
