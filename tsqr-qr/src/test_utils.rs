use rand::prelude::*;
use tsqr_core::{c64, ComplexField, Mat, MatRef};

pub trait TestField: ComplexField {
    fn random(rng: &mut StdRng) -> Self;
    fn dist(self, other: Self) -> f64;
}

impl TestField for f64 {
    fn random(rng: &mut StdRng) -> Self {
        rng.gen::<f64>() - 0.5
    }

    fn dist(self, other: Self) -> f64 {
        (self - other).abs()
    }
}

impl TestField for c64 {
    fn random(rng: &mut StdRng) -> Self {
        c64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
    }

    fn dist(self, other: Self) -> f64 {
        ComplexField::abs(self - other)
    }
}

pub fn with_rng<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    f(&mut StdRng::seed_from_u64(0))
}

pub fn random_value<T: TestField>(rng: &mut StdRng) -> T {
    T::random(rng)
}

pub fn random_mat<T: TestField>(rng: &mut StdRng, nrows: usize, ncols: usize) -> Mat<T> {
    Mat::with_dims(nrows, ncols, |_, _| T::random(rng))
}

pub fn identity<T: ComplexField>(n: usize) -> Mat<T> {
    Mat::with_dims(n, n, |i, j| if i == j { T::one() } else { T::zero() })
}

pub fn column<T: ComplexField>(values: &[T]) -> Mat<T> {
    Mat::with_dims(values.len(), 1, |i, _| values[i])
}

pub fn adjoint<T: ComplexField>(a: MatRef<'_, T>) -> Mat<T> {
    Mat::with_dims(a.ncols(), a.nrows(), |i, j| a.read(j, i).conj())
}

pub fn matmul<T: ComplexField>(a: MatRef<'_, T>, b: MatRef<'_, T>) -> Mat<T> {
    assert_eq!(a.ncols(), b.nrows());
    Mat::with_dims(a.nrows(), b.ncols(), |i, j| {
        let mut acc = T::zero();
        for l in 0..a.ncols() {
            acc = acc + a.read(i, l) * b.read(l, j);
        }
        acc
    })
}

#[track_caller]
pub fn assert_mat_close<T: TestField>(a: MatRef<'_, T>, b: MatRef<'_, T>) {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            let (x, y) = (a.read(i, j), b.read(i, j));
            assert!(x.dist(y) < 1e-10, "mismatch at ({i}, {j}): {x:?} != {y:?}");
        }
    }
}
