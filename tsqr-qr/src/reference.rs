use crate::{
    no_pivoting::{apply, compute, reconstruct},
    RawQr, WorkSize,
};
use tsqr_core::{ComplexField, MatMut, MatRef, Side, Transpose};

/// Portable unblocked Householder QR, with the semantics of LAPACK's `?geqr2`, `?orm2r`/`?unm2r`
/// and `?org2r`/`?ung2r`.
///
/// The backend is stateless, and fails fast with a panic on any shape or workspace violation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HouseholderQr;

impl<T: ComplexField> RawQr<T> for HouseholderQr {
    #[inline]
    fn compute_qr_query(&self, nrows: usize, ncols: usize) -> WorkSize<T> {
        WorkSize::from_len(compute::qr_in_place_req(nrows, ncols))
    }

    #[track_caller]
    fn compute_qr(&self, matrix: MatMut<'_, T>, tau: &mut [T], work: &mut [T]) {
        log::trace!(
            target: "tsqr_qr",
            "householder qr of a {}x{} matrix (col_stride {})",
            matrix.nrows(),
            matrix.ncols(),
            matrix.col_stride(),
        );
        compute::qr_in_place_unblocked(matrix, tau, work);
    }

    #[inline]
    fn apply_q_factor_query(
        &self,
        side: Side,
        trans: Transpose,
        nrows: usize,
        ncols: usize,
        k: usize,
    ) -> WorkSize<T> {
        let _ = trans;
        WorkSize::from_len(apply::apply_q_req(side, nrows, ncols, k))
    }

    #[track_caller]
    fn apply_q_factor(
        &self,
        side: Side,
        trans: Transpose,
        k: usize,
        factors: MatRef<'_, T>,
        tau: &[T],
        c: MatMut<'_, T>,
        work: &mut [T],
    ) {
        log::trace!(
            target: "tsqr_qr",
            "applying {k} householder reflectors ({side:?}, {trans:?}) to a {}x{} matrix",
            c.nrows(),
            c.ncols(),
        );
        apply::apply_q_unblocked(side, trans, k, factors, tau, c, work);
    }

    #[inline]
    fn compute_explicit_q_query(&self, nrows: usize, ncols: usize, k: usize) -> WorkSize<T> {
        WorkSize::from_len(reconstruct::explicit_q_in_place_req(nrows, ncols, k))
    }

    #[track_caller]
    fn compute_explicit_q(&self, k: usize, matrix: MatMut<'_, T>, tau: &[T], work: &mut [T]) {
        log::trace!(
            target: "tsqr_qr",
            "forming explicit q factor of size {}x{} from {k} reflectors",
            matrix.nrows(),
            matrix.ncols(),
        );
        reconstruct::explicit_q_in_place_unblocked(matrix, k, tau, work);
    }
}
