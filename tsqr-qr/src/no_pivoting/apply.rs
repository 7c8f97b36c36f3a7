use crate::householder::{apply_householder_on_the_left, apply_householder_on_the_right};
use assert2::assert as fancy_assert;
use reborrow::*;
use tsqr_core::{ComplexField, Conj, MatMut, MatRef, Side, Transpose};

/// Computes the workspace length required by [`apply_q_unblocked`], for a target matrix with
/// dimensions `(nrows, ncols)`.
#[inline]
pub fn apply_q_req(side: Side, nrows: usize, ncols: usize, k: usize) -> usize {
    let _ = k;
    match side {
        Side::Left => Ord::max(1, ncols),
        Side::Right => Ord::max(1, nrows),
    }
}

/// Overwrites `matrix` with `op(Q) * matrix` or `matrix * op(Q)`, where `Q` is the product of the
/// first `k` Householder reflectors stored in `qr_factors` and `householder_coeffs`.
///
/// # Panics
///
/// - Panics if `qr_factors` doesn't have `matrix.nrows()` rows (left side) or `matrix.ncols()`
/// rows (right side).
/// - Panics if `k` exceeds the number of columns or rows of `qr_factors`, or the length of
/// `householder_coeffs`.
/// - Panics if `work` is shorter than [`apply_q_req`].
#[track_caller]
pub fn apply_q_unblocked<T: ComplexField>(
    side: Side,
    trans: Transpose,
    k: usize,
    qr_factors: MatRef<'_, T>,
    householder_coeffs: &[T],
    mut matrix: MatMut<'_, T>,
    work: &mut [T],
) {
    let m = matrix.nrows();
    let n = matrix.ncols();
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };

    fancy_assert!(qr_factors.nrows() == order);
    fancy_assert!(k <= qr_factors.ncols());
    fancy_assert!(k <= order);
    fancy_assert!(householder_coeffs.len() >= k);
    fancy_assert!(work.len() >= apply_q_req(side, m, n, k));

    // Q = H_0 H_1 ... H_{k-1}, so Q is applied starting from the last reflector, while its
    // (conjugate) transpose starts from the first one. The right side reverses both.
    let forward = matches!(
        (side, trans),
        (Side::Left, Transpose::Transpose | Transpose::ConjTranspose) | (Side::Right, Transpose::None)
    );
    // H^T = I - tau conj(v) conj(v)^H, H^H = I - conj(tau) v v^H
    let conj_essential = match trans {
        Transpose::Transpose => Conj::Yes,
        Transpose::None | Transpose::ConjTranspose => Conj::No,
    };

    for idx in 0..k {
        let i = if forward { idx } else { k - 1 - idx };
        let essential = &qr_factors.col(i)[i + 1..];
        let tau = match trans {
            Transpose::ConjTranspose => householder_coeffs[i].conj(),
            Transpose::None | Transpose::Transpose => householder_coeffs[i],
        };

        match side {
            Side::Left => apply_householder_on_the_left(
                matrix.rb_mut().submatrix(i, 0, m - i, n),
                essential,
                conj_essential,
                tau,
                work,
            ),
            Side::Right => apply_householder_on_the_right(
                matrix.rb_mut().submatrix(0, i, m, n - i),
                essential,
                conj_essential,
                tau,
                work,
            ),
        }
    }
}
