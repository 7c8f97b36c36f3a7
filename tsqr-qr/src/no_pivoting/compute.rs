use crate::householder::{apply_householder_on_the_left, make_householder_in_place};
use assert2::assert as fancy_assert;
use reborrow::*;
use tsqr_core::{ComplexField, Conj, MatMut};

/// Computes the workspace length required by [`qr_in_place_unblocked`].
#[inline]
pub fn qr_in_place_req(nrows: usize, ncols: usize) -> usize {
    let _ = nrows;
    Ord::max(1, ncols)
}

/// Computes the QR factorization of `matrix` in place, one column at a time.
///
/// On exit, the upper trapezoidal part of `matrix` holds `R`, the part below the diagonal holds
/// the essential parts of the Householder vectors, and `householder_coeffs` holds their
/// coefficients.
///
/// # Panics
///
/// - Panics if `householder_coeffs.len()` isn't `min(nrows, ncols)`.
/// - Panics if `work` is shorter than [`qr_in_place_req`].
#[track_caller]
pub fn qr_in_place_unblocked<T: ComplexField>(
    mut matrix: MatMut<'_, T>,
    householder_coeffs: &mut [T],
    work: &mut [T],
) {
    let m = matrix.nrows();
    let n = matrix.ncols();
    let size = Ord::min(m, n);

    fancy_assert!(householder_coeffs.len() == size);
    fancy_assert!(work.len() >= qr_in_place_req(m, n));

    for k in 0..size {
        let (left, right) = matrix.rb_mut().split_at_col(k + 1);
        let (head, essential) = left.col_mut(k)[k..].split_at_mut(1);

        let (tau, beta) = make_householder_in_place(essential, head[0]);
        head[0] = beta;
        householder_coeffs[k] = tau;

        if right.ncols() > 0 {
            let ncols = right.ncols();
            apply_householder_on_the_left(
                right.submatrix(k, 0, m - k, ncols),
                essential,
                Conj::No,
                tau.conj(),
                work,
            );
        }
    }
}
