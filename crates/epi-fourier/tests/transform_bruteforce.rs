use epi_fourier::{build_full, build_reduced, epistatic_masks, singleton_indices};
use nalgebra::DMatrix;
use proptest::prelude::*;

fn brute_force(n: usize) -> DMatrix<i32> {
    let size = 1usize << n;
    DMatrix::from_fn(size, size, |j, i| {
        if (i & j).count_ones() % 2 == 0 {
            1
        } else {
            -1
        }
    })
}

#[test]
fn full_matrix_matches_definition() {
    for n in [0, 1, 2, 3, 5, 7] {
        assert_eq!(build_full(n).unwrap(), brute_force(n), "order {n}");
    }
}

#[test]
fn singleton_indices_known_values() {
    assert_eq!(singleton_indices(0), vec![0]);
    assert_eq!(singleton_indices(1), vec![0, 1]);
    assert_eq!(singleton_indices(5), vec![0, 1, 2, 4, 8, 16]);
}

#[test]
fn reduced_order_two() {
    let expected = DMatrix::from_row_slice(1, 4, &[1, -1, -1, 1]);
    assert_eq!(build_reduced(2).unwrap(), expected);
}

#[test]
fn reduced_order_three() {
    let expected = DMatrix::from_row_slice(
        4,
        8,
        &[
            1, -1, -1, 1, 1, -1, -1, 1, //
            1, -1, 1, -1, -1, 1, -1, 1, //
            1, 1, -1, -1, -1, -1, 1, 1, //
            1, -1, -1, 1, -1, 1, 1, -1,
        ],
    );
    assert_eq!(build_reduced(3).unwrap(), expected);
    assert_eq!(epistatic_masks(3), vec![3, 5, 6, 7]);
}

#[test]
fn oversized_order_is_rejected() {
    assert!(build_full(epi_core::MAX_SPECIES + 1).is_err());
}

proptest! {
    #[test]
    fn reduced_drops_exactly_the_singleton_rows(n in 1usize..8) {
        let full = build_full(n).unwrap();
        let reduced = build_reduced(n).unwrap();
        let size = 1usize << n;
        prop_assert_eq!(reduced.nrows(), size - n - 1);
        prop_assert_eq!(reduced.ncols(), size);

        let singletons = singleton_indices(n);
        let kept: Vec<usize> = (0..size).filter(|j| !singletons.contains(j)).collect();
        for (row, &j) in kept.iter().enumerate() {
            prop_assert_eq!(reduced.row(row), full.row(j));
        }
    }

    #[test]
    fn entries_are_signs(n in 0usize..7) {
        let full = build_full(n).unwrap();
        prop_assert!(full.iter().all(|v| *v == 1 || *v == -1));
    }
}
