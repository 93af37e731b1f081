use std::collections::BTreeSet;

use epi_core::reorder::{from_canonical_order, to_canonical_order, DATA_TO_CANONICAL_PERM};
use epi_core::EpiError;

#[test]
fn permutation_is_a_bijection() {
    let targets: BTreeSet<usize> = DATA_TO_CANONICAL_PERM.iter().copied().collect();
    assert_eq!(targets.len(), 32);
    assert_eq!(targets.iter().copied().max(), Some(31));
}

#[test]
fn experimental_order_groups_by_species_present() {
    let counts: Vec<u32> = DATA_TO_CANONICAL_PERM.iter().map(|i| i.count_ones()).collect();
    let mut sorted = counts.clone();
    sorted.sort_unstable();
    assert_eq!(counts, sorted);
}

#[test]
fn vector_moves_to_canonical_positions() {
    let experimental: Vec<usize> = (0..32).collect();
    let canonical = to_canonical_order(&experimental).unwrap();
    // The first single-species entry has species 1 (most significant bit).
    assert_eq!(canonical[0b10000], 1);
    assert_eq!(canonical[0b00001], 5);
    assert_eq!(canonical[31], 31);
    assert_eq!(from_canonical_order(&canonical).unwrap(), experimental);
}

#[test]
fn table_rows_follow_the_same_permutation() {
    let rows: Vec<(String, f64)> = (0..32).map(|i| (format!("setup{i}"), i as f64)).collect();
    let canonical = to_canonical_order(&rows).unwrap();
    assert_eq!(canonical[0b01000].0, "setup2");
}

#[test]
fn wrong_length_is_a_shape_error() {
    let short = vec![0.0; 16];
    assert!(matches!(to_canonical_order(&short), Err(EpiError::Shape(_))));
    assert!(matches!(from_canonical_order(&short), Err(EpiError::Shape(_))));
}
