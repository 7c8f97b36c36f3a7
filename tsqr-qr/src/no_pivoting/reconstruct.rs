use crate::householder::apply_householder_on_the_left;
use assert2::assert as fancy_assert;
use reborrow::*;
use tsqr_core::{ComplexField, Conj, MatMut};

/// Computes the workspace length required by [`explicit_q_in_place_unblocked`].
#[inline]
pub fn explicit_q_in_place_req(nrows: usize, ncols: usize, k: usize) -> usize {
    let _ = (nrows, k);
    Ord::max(1, ncols)
}

/// Overwrites `matrix` with the first `ncols` columns of the product of the first `k`
/// Householder reflectors it stores, as returned by
/// [`qr_in_place_unblocked`](super::compute::qr_in_place_unblocked).
///
/// # Panics
///
/// - Panics unless `nrows >= ncols >= k`.
/// - Panics if `householder_coeffs` holds fewer than `k` elements.
/// - Panics if `work` is shorter than [`explicit_q_in_place_req`].
#[track_caller]
pub fn explicit_q_in_place_unblocked<T: ComplexField>(
    mut matrix: MatMut<'_, T>,
    k: usize,
    householder_coeffs: &[T],
    work: &mut [T],
) {
    let m = matrix.nrows();
    let n = matrix.ncols();

    fancy_assert!(m >= n);
    fancy_assert!(n >= k);
    fancy_assert!(householder_coeffs.len() >= k);
    fancy_assert!(work.len() >= explicit_q_in_place_req(m, n, k));

    // columns past the last reflector start out as columns of the identity
    for j in k..n {
        matrix.rb_mut().col_mut(j).fill(T::zero());
        matrix.write(j, j, T::one());
    }

    for i in (0..k).rev() {
        let tau = householder_coeffs[i];

        if i + 1 < n {
            let (left, right) = matrix.rb_mut().split_at_col(i + 1);
            let essential = &left.into_const().col(i)[i + 1..];
            let ncols = right.ncols();
            apply_householder_on_the_left(
                right.submatrix(i, 0, m - i, ncols),
                essential,
                Conj::No,
                tau,
                work,
            );
        }

        let col = matrix.rb_mut().col_mut(i);
        for e in &mut col[i + 1..] {
            *e = -(tau * *e);
        }
        col[i] = T::one() - tau;
        col[..i].fill(T::zero());
    }
}
