use crate::{
    cast::{checked_cast, CastError},
    source::ScalarSource,
};
use assert2::assert as fancy_assert;
use reborrow::*;
use tsqr_core::{ComplexField, Mat, MatMut, Side, Transpose};
use tsqr_qr::{RawQr, WorkSize};

/// Generator of random test matrices with prescribed spectral properties.
///
/// The generator borrows a [`ScalarSource`] for its samples and delegates every factorization to
/// a [`RawQr`] backend. Each operation sizes its workspace with the backend's queries, converts
/// the reported size with [`checked_cast`], and allocates it once.
#[derive(Debug)]
pub struct MatrixGenerator<'g, G: ?Sized, Q> {
    gen: &'g mut G,
    qr: Q,
}

impl<'g, G: ?Sized, Q> MatrixGenerator<'g, G, Q> {
    /// Creates a generator drawing its samples from `gen`, and factorizing with `qr`.
    #[inline]
    pub fn new(gen: &'g mut G, qr: Q) -> Self {
        Self { gen, qr }
    }

    /// Returns the factorization backend.
    #[inline]
    pub fn qr(&self) -> &Q {
        &self.qr
    }
}

fn alloc_workspace<T: ComplexField>(
    a: WorkSize<T>,
    b: WorkSize<T>,
) -> Result<Vec<T>, CastError> {
    let len: usize = checked_cast(a.max_magnitude(b))?;
    log::debug!(
        target: "tsqr_random",
        "queried workspace sizes {:?} and {:?}, allocating {len} elements",
        a.0,
        b.0,
    );
    Ok(vec![T::zero(); len])
}

impl<'g, G: ?Sized, Q> MatrixGenerator<'g, G, Q> {
    /// Fills `a` with samples, column by column.
    pub fn fill_random<T>(&mut self, mut a: MatMut<'_, T>)
    where
        G: ScalarSource<T>,
    {
        for j in 0..a.ncols() {
            for e in a.rb_mut().col_mut(j) {
                *e = self.gen.next_sample();
            }
        }
    }

    /// Overwrites `q` with a random matrix with orthonormal columns.
    ///
    /// The result is the explicit `Q` factor of a matrix filled by [`Self::fill_random`]. It is
    /// Haar distributed when the source produces standard normal samples.
    ///
    /// # Panics
    ///
    /// Panics if `q` has fewer rows than columns.
    #[track_caller]
    pub fn explicit_q<T: ComplexField>(&mut self, mut q: MatMut<'_, T>) -> Result<(), CastError>
    where
        G: ScalarSource<T>,
        Q: RawQr<T>,
    {
        let m = q.nrows();
        let n = q.ncols();
        fancy_assert!(m >= n);

        log::trace!(target: "tsqr_random", "explicit_q: {m}x{n}");
        self.fill_random(q.rb_mut());

        let mut work = alloc_workspace(
            self.qr.compute_qr_query(m, n),
            self.qr.compute_explicit_q_query(m, n, n),
        )?;
        let mut tau = vec![T::zero(); n];

        self.qr.compute_qr(q.rb_mut(), &mut tau, &mut work);
        self.qr.compute_explicit_q(n, q, &tau, &mut work);
        Ok(())
    }

    /// Overwrites `q` and `tau` with the implicit representation of a random orthogonal factor,
    /// as returned by [`RawQr::compute_qr`].
    ///
    /// # Panics
    ///
    /// Panics if `tau.len()` isn't `min(q.nrows(), q.ncols())`.
    #[track_caller]
    pub fn implicit_q<T: ComplexField>(
        &mut self,
        mut q: MatMut<'_, T>,
        tau: &mut [T],
    ) -> Result<(), CastError>
    where
        G: ScalarSource<T>,
        Q: RawQr<T>,
    {
        let m = q.nrows();
        let n = q.ncols();
        fancy_assert!(tau.len() == Ord::min(m, n));

        log::trace!(target: "tsqr_random", "implicit_q: {m}x{n}");
        self.fill_random(q.rb_mut());

        let size = self.qr.compute_qr_query(m, n);
        let mut work = alloc_workspace(size, size)?;
        self.qr.compute_qr(q, tau, &mut work);
        Ok(())
    }

    /// Overwrites `a` with `U * S * V^H`, where `S` holds `singular_values` on its diagonal, and
    /// `U`, `V` are random orthogonal factors drawn with [`Self::implicit_q`].
    ///
    /// The singular values of `a` are exactly the first `min(nrows, ncols)` entries of
    /// `singular_values`, up to rounding, provided they are non-negative.
    ///
    /// # Panics
    ///
    /// Panics if `singular_values` holds fewer than `a.ncols()` entries.
    #[track_caller]
    pub fn fill_random_svd<T: ComplexField>(
        &mut self,
        mut a: MatMut<'_, T>,
        singular_values: &[T::Real],
    ) -> Result<(), CastError>
    where
        G: ScalarSource<T>,
        Q: RawQr<T>,
    {
        let m = a.nrows();
        let n = a.ncols();
        let k = Ord::min(m, n);
        fancy_assert!(singular_values.len() >= n);

        log::trace!(target: "tsqr_random", "fill_random_svd: {m}x{n}");
        a.fill(T::zero());
        for (j, &s) in singular_values[..k].iter().enumerate() {
            a.write(j, j, T::from_real(s));
        }

        let mut u = Mat::<T>::zeros(m, n);
        let mut tau_u = vec![T::zero(); k];
        self.implicit_q(u.as_mut(), &mut tau_u)?;

        let mut v = Mat::<T>::zeros(n, n);
        let mut tau_v = vec![T::zero(); n];
        self.implicit_q(v.as_mut(), &mut tau_v)?;

        let mut work = alloc_workspace(
            self.qr.apply_q_factor_query(Side::Left, Transpose::None, m, n, k),
            self.qr.apply_q_factor_query(Side::Right, T::ADJOINT, m, n, n),
        )?;

        self.qr.apply_q_factor(
            Side::Left,
            Transpose::None,
            k,
            u.as_ref(),
            &tau_u,
            a.rb_mut(),
            &mut work,
        );
        self.qr.apply_q_factor(
            Side::Right,
            T::ADJOINT,
            n,
            v.as_ref(),
            &tau_v,
            a,
            &mut work,
        );
        Ok(())
    }

    /// Overwrites the square matrix `r` with a random upper triangular matrix whose singular
    /// values are `singular_values`.
    ///
    /// # Panics
    ///
    /// Panics if `r` isn't square, or if `singular_values` holds fewer than `r.ncols()` entries.
    #[track_caller]
    pub fn fill_random_r<T: ComplexField>(
        &mut self,
        mut r: MatMut<'_, T>,
        singular_values: &[T::Real],
    ) -> Result<(), CastError>
    where
        G: ScalarSource<T>,
        Q: RawQr<T>,
    {
        let n = r.ncols();
        fancy_assert!(r.nrows() == n);

        self.fill_random_svd(r.rb_mut(), singular_values)?;

        log::trace!(target: "tsqr_random", "fill_random_r: factoring {n}x{n} matrix");
        let size = self.qr.compute_qr_query(n, n);
        let mut work = alloc_workspace(size, size)?;
        let mut tau = vec![T::zero(); n];
        self.qr.compute_qr(r.rb_mut(), &mut tau, &mut work);

        for j in 0..n {
            let col = r.rb_mut().col_mut(j);
            col[j + 1..].fill(T::zero());
        }
        Ok(())
    }
}
