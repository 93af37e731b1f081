use nalgebra::DMatrix;

/// Splits `a` into its non-negative part `P` and non-positive part `N`.
///
/// `P + N == a` entrywise and the pair is unique. Interval propagation uses
/// `P` to carry an endpoint through and `N` to swap it with the other one.
pub fn split_pos_neg(a: &DMatrix<i32>) -> (DMatrix<i32>, DMatrix<i32>) {
    (a.map(|value| value.max(0)), a.map(|value| value.min(0)))
}
