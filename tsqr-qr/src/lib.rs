//! Local QR factorization capability.
//!
//! [`RawQr`] is the seam between the random matrix generator and whatever kernel library
//! actually performs the factorization. Every operation follows a two-phase protocol: a query
//! that reports the required workspace length as a [`WorkSize`], followed by the real
//! computation on caller-owned buffers and a workspace of at least that length.
//!
//! Orthogonal factors are stored implicitly, as in LAPACK's `?geqrf`: the `i`-th Householder
//! reflector is $H_i = I - \tau_i v_i v_i^H$, where $v_i$ has zeros above position `i`, an
//! implicit one at position `i`, and its remaining entries stored below the diagonal of column
//! `i` of the factored matrix. The orthogonal factor is $Q = H_0 H_1 \dots H_{k-1}$.
//!
//! [`HouseholderQr`] is a portable reference implementation.

#![warn(rust_2018_idioms)]
#![allow(clippy::too_many_arguments)]

use tsqr_core::{ComplexField, MatMut, MatRef, RealField, Side, Transpose};

pub mod householder;
pub mod no_pivoting;

mod reference;

pub use reference::HouseholderQr;

#[cfg(test)]
mod test_utils;

/// Workspace length reported by the query phase of a [`RawQr`] operation.
///
/// The length is expressed in the scalar type of the matrix elements, as LAPACK reports it in
/// `WORK(1)`. Use [`WorkSize::magnitude`] to compare sizes, since complex scalars are not
/// ordered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorkSize<T>(pub T);

impl<T: ComplexField> WorkSize<T> {
    /// Returns the workspace size representing `len` elements.
    #[inline]
    pub fn from_len(len: usize) -> Self {
        Self(T::from_real(T::Real::from_usize(len)))
    }

    /// Returns the magnitude of the reported size.
    #[inline]
    pub fn magnitude(self) -> T::Real {
        self.0.abs()
    }

    /// Returns the larger of the two magnitudes.
    #[inline]
    pub fn max_magnitude(self, other: Self) -> T::Real {
        let a = self.magnitude();
        let b = other.magnitude();
        if b > a {
            b
        } else {
            a
        }
    }
}

/// "Raw" local QR factorization interface.
///
/// Implementations may hold state (a device stream, a library handle), but must not retain any
/// of the caller's buffers between calls. Queries never touch caller memory, and return the same
/// size every time they are issued for the same shape.
///
/// Passing shapes that do not match the documented requirements, or a workspace shorter than the
/// corresponding query result, is a contract violation. Implementations are free to panic.
pub trait RawQr<T: ComplexField> {
    /// Workspace query for [`RawQr::compute_qr`].
    fn compute_qr_query(&self, nrows: usize, ncols: usize) -> WorkSize<T>;

    /// Computes the QR factorization of `matrix` in place.
    ///
    /// On exit, the upper triangle (or trapezoid) of `matrix` holds the `R` factor, and the part
    /// below the diagonal holds the Householder vectors. `tau` must have length
    /// `min(nrows, ncols)`, and receives the Householder coefficients.
    fn compute_qr(&self, matrix: MatMut<'_, T>, tau: &mut [T], work: &mut [T]);

    /// Workspace query for [`RawQr::apply_q_factor`], where `nrows` and `ncols` are the
    /// dimensions of the matrix the factor is applied to.
    fn apply_q_factor_query(
        &self,
        side: Side,
        trans: Transpose,
        nrows: usize,
        ncols: usize,
        k: usize,
    ) -> WorkSize<T>;

    /// Overwrites `c` with `op(Q) * c` if `side` is [`Side::Left`], or `c * op(Q)` if it is
    /// [`Side::Right`].
    ///
    /// `Q` is the product of the first `k` reflectors stored in `factors` and `tau`, as returned
    /// by [`RawQr::compute_qr`]. `factors` must have `c.nrows()` rows when applying from the left,
    /// and `c.ncols()` rows when applying from the right.
    fn apply_q_factor(
        &self,
        side: Side,
        trans: Transpose,
        k: usize,
        factors: MatRef<'_, T>,
        tau: &[T],
        c: MatMut<'_, T>,
        work: &mut [T],
    );

    /// Workspace query for [`RawQr::compute_explicit_q`].
    fn compute_explicit_q_query(&self, nrows: usize, ncols: usize, k: usize) -> WorkSize<T>;

    /// Overwrites `matrix` with the first `ncols` columns of the product of the first `k`
    /// reflectors it stores, as returned by [`RawQr::compute_qr`].
    ///
    /// Requires `nrows >= ncols >= k`.
    fn compute_explicit_q(&self, k: usize, matrix: MatMut<'_, T>, tau: &[T], work: &mut [T]);
}

impl<T: ComplexField, Q: RawQr<T> + ?Sized> RawQr<T> for &Q {
    #[inline]
    fn compute_qr_query(&self, nrows: usize, ncols: usize) -> WorkSize<T> {
        (**self).compute_qr_query(nrows, ncols)
    }

    #[inline]
    fn compute_qr(&self, matrix: MatMut<'_, T>, tau: &mut [T], work: &mut [T]) {
        (**self).compute_qr(matrix, tau, work)
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
        (**self).apply_q_factor_query(side, trans, nrows, ncols, k)
    }

    #[inline]
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
        (**self).apply_q_factor(side, trans, k, factors, tau, c, work)
    }

    #[inline]
    fn compute_explicit_q_query(&self, nrows: usize, ncols: usize, k: usize) -> WorkSize<T> {
        (**self).compute_explicit_q_query(nrows, ncols, k)
    }

    #[inline]
    fn compute_explicit_q(&self, k: usize, matrix: MatMut<'_, T>, tau: &[T], work: &mut [T]) {
        (**self).compute_explicit_q(k, matrix, tau, work)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsqr_core::c64;

    #[test]
    fn work_size_magnitude() {
        let a = WorkSize::<c64>(c64::new(0.0, -12.0));
        let b = WorkSize::<c64>::from_len(5);

        assert_eq!(b.0, c64::new(5.0, 0.0));
        assert_eq!(a.magnitude(), 12.0);
        assert_eq!(a.max_magnitude(b), 12.0);
        assert_eq!(b.max_magnitude(a), 12.0);
    }
}
