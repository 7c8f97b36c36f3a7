//! Elementary Householder reflector kernels.
//!
//! A reflector is described by its coefficient `tau` and its essential part, the entries of its
//! vector after the implicit leading one.

use assert2::assert as fancy_assert;
use reborrow::*;
use tsqr_core::{ComplexField, Conj, MatMut, RealField};

/// Turns `(head, essential)` into a Householder vector in place, as LAPACK's `?larfg`.
///
/// Returns `(tau, beta)` such that `(I - tau v v^H)^H (head, essential_in) = (beta, 0)`, where
/// `v = (1, essential_out)` and `beta` is real.
///
/// If the essential part is zero and `head` is real, `tau` is zero and the reflector is the
/// identity.
pub fn make_householder_in_place<T: ComplexField>(essential: &mut [T], head: T) -> (T, T) {
    let zero = T::Real::zero();

    let mut tail_squared_norm = zero;
    for &e in essential.iter() {
        tail_squared_norm = tail_squared_norm + e.abs2();
    }

    let (head_re, head_im) = head.into_real_imag();
    if tail_squared_norm == zero && head_im == zero {
        return (T::zero(), head);
    }

    let norm = (head.abs2() + tail_squared_norm).sqrt();
    let beta = if head_re >= zero { -norm } else { norm };
    let beta = T::from_real(beta);

    let tau = (beta - head) / beta;
    let inv = T::one() / (head - beta);
    for e in essential.iter_mut() {
        *e = *e * inv;
    }

    (tau, beta)
}

#[inline(always)]
fn elem<T: ComplexField>(e: T, conj: Conj) -> T {
    match conj {
        Conj::No => e,
        Conj::Yes => e.conj(),
    }
}

/// Overwrites `matrix` with `(I - tau u u^H) * matrix`, where `u = (1, essential)` if
/// `conj_essential` is [`Conj::No`], and `u = (1, conj(essential))` otherwise.
///
/// `work` must hold at least `matrix.ncols()` elements.
#[track_caller]
pub fn apply_householder_on_the_left<T: ComplexField>(
    mut matrix: MatMut<'_, T>,
    essential: &[T],
    conj_essential: Conj,
    tau: T,
    work: &mut [T],
) {
    fancy_assert!(matrix.nrows() == 1 + essential.len());
    let n = matrix.ncols();
    fancy_assert!(work.len() >= n);

    if tau == T::zero() {
        return;
    }

    // w = matrix^H u, stored conjugated so that w[j] = u^H matrix[:, j]
    let conj_dot = conj_essential.compose(Conj::Yes);
    let w = &mut work[..n];
    for (j, w) in w.iter_mut().enumerate() {
        let col = matrix.rb().col(j);
        let mut acc = col[0];
        for (&u, &c) in essential.iter().zip(&col[1..]) {
            acc = acc + elem(u, conj_dot) * c;
        }
        *w = acc;
    }

    for (j, &w) in w.iter().enumerate() {
        let factor = tau * w;
        let col = matrix.rb_mut().col_mut(j);
        col[0] = col[0] - factor;
        for (&u, c) in essential.iter().zip(&mut col[1..]) {
            *c = *c - factor * elem(u, conj_essential);
        }
    }
}

/// Overwrites `matrix` with `matrix * (I - tau u u^H)`, where `u = (1, essential)` if
/// `conj_essential` is [`Conj::No`], and `u = (1, conj(essential))` otherwise.
///
/// `work` must hold at least `matrix.nrows()` elements.
#[track_caller]
pub fn apply_householder_on_the_right<T: ComplexField>(
    mut matrix: MatMut<'_, T>,
    essential: &[T],
    conj_essential: Conj,
    tau: T,
    work: &mut [T],
) {
    fancy_assert!(matrix.ncols() == 1 + essential.len());
    let m = matrix.nrows();
    fancy_assert!(work.len() >= m);

    if tau == T::zero() {
        return;
    }

    // w = matrix u
    let w = &mut work[..m];
    w.copy_from_slice(matrix.rb().col(0));
    for (l, &u) in essential.iter().enumerate() {
        let u = elem(u, conj_essential);
        for (w, &c) in w.iter_mut().zip(matrix.rb().col(l + 1)) {
            *w = *w + c * u;
        }
    }

    let w = &*w;
    for (dst, &src) in matrix.rb_mut().col_mut(0).iter_mut().zip(w) {
        *dst = *dst - tau * src;
    }
    let conj_u = conj_essential.compose(Conj::Yes);
    for (l, &u) in essential.iter().enumerate() {
        let factor = tau * elem(u, conj_u);
        for (dst, &src) in matrix.rb_mut().col_mut(l + 1).iter_mut().zip(w) {
            *dst = *dst - src * factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;
    use tsqr_core::{c64, Mat};

    // explicit `I - tau u u^H`
    fn reflector(essential: &[c64], conj: Conj, tau: c64) -> Mat<c64> {
        let n = essential.len() + 1;
        let u = |i: usize| {
            if i == 0 {
                c64::one()
            } else {
                elem(essential[i - 1], conj)
            }
        };
        Mat::with_dims(n, n, |i, j| {
            let id = if i == j { c64::one() } else { c64::zero() };
            id - tau * u(i) * u(j).conj()
        })
    }

    #[test]
    fn annihilates_tail() {
        with_rng(|rng| {
            for n in [1, 2, 5] {
                let x: Vec<c64> = (0..n).map(|_| random_value(rng)).collect();
                let mut essential = x[1..].to_vec();
                let (tau, beta) = make_householder_in_place(&mut essential, x[0]);

                assert_approx_eq!(beta.imag(), 0.0);
                let h = reflector(&essential, Conj::No, tau);
                let y = matmul(adjoint(h.as_ref()).as_ref(), column(&x).as_ref());
                assert_approx_eq!(y[(0, 0)], beta);
                for i in 1..n {
                    assert_approx_eq!(y[(i, 0)], c64::zero());
                }
            }
        });
    }

    #[test]
    fn real_head_zero_tail_is_identity() {
        let mut essential = [0.0_f64; 3];
        let (tau, beta) = make_householder_in_place(&mut essential, -2.5);
        assert_eq!(tau, 0.0);
        assert_eq!(beta, -2.5);
    }

    #[test]
    fn apply_matches_explicit_reflector() {
        with_rng(|rng| {
            for conj in [Conj::No, Conj::Yes] {
                let (m, n) = (4, 3);
                let essential: Vec<c64> = (0..m - 1).map(|_| random_value(rng)).collect();
                let tau = random_value(rng);
                let c: Mat<c64> = random_mat(rng, m, n);
                let h = reflector(&essential, conj, tau);

                let mut left = c.clone();
                let mut work = vec![c64::zero(); n];
                apply_householder_on_the_left(left.as_mut(), &essential, conj, tau, &mut work);
                assert_mat_close(left.as_ref(), matmul(h.as_ref(), c.as_ref()).as_ref());

                let ct = adjoint(c.as_ref());
                let mut right = ct.clone();
                let mut work = vec![c64::zero(); n];
                apply_householder_on_the_right(right.as_mut(), &essential, conj, tau, &mut work);
                assert_mat_close(right.as_ref(), matmul(ct.as_ref(), h.as_ref()).as_ref());
            }
        });
    }
}
