//! Sources of random scalars.

use core::f32::consts::FRAC_1_SQRT_2 as FRAC_1_SQRT_2_F32;
use core::f64::consts::FRAC_1_SQRT_2;
use rand::{distributions::Distribution, Rng};
use rand_distr::StandardNormal;
use tsqr_core::{c32, c64};

/// Stream of scalar samples, consumed one at a time by the matrix generator.
pub trait ScalarSource<T> {
    /// Returns the next sample, advancing the state of the source.
    fn next_sample(&mut self) -> T;
}

impl<T, F: FnMut() -> T> ScalarSource<T> for F {
    #[inline]
    fn next_sample(&mut self) -> T {
        self()
    }
}

/// Draws samples from a [`Distribution`] with the given random number generator.
#[derive(Clone, Debug)]
pub struct DistributionSource<D, R> {
    /// Distribution the samples are drawn from.
    pub dist: D,
    /// Random number generator driving the distribution.
    pub rng: R,
}

impl<D, R> DistributionSource<D, R> {
    /// Creates a source sampling `dist` with `rng`.
    #[inline]
    pub fn new(dist: D, rng: R) -> Self {
        Self { dist, rng }
    }
}

impl<T, D: Distribution<T>, R: Rng> ScalarSource<T> for DistributionSource<D, R> {
    #[inline]
    fn next_sample(&mut self) -> T {
        self.dist.sample(&mut self.rng)
    }
}

/// Scalar types that can be sampled from a standard normal distribution.
///
/// For complex types, the real and imaginary parts are independent normal variables with variance
/// `1/2`, so that the sample has unit variance.
pub trait SampleStandardNormal: Sized {
    /// Draws one standard normal sample using `rng`.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl SampleStandardNormal for f32 {
    #[inline]
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl SampleStandardNormal for f64 {
    #[inline]
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl SampleStandardNormal for c32 {
    #[inline]
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let re: f32 = rng.sample(StandardNormal);
        let im: f32 = rng.sample(StandardNormal);
        c32::new(re * FRAC_1_SQRT_2_F32, im * FRAC_1_SQRT_2_F32)
    }
}

impl SampleStandardNormal for c64 {
    #[inline]
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        c64::new(re * FRAC_1_SQRT_2, im * FRAC_1_SQRT_2)
    }
}

/// Draws standard normal samples with the given random number generator.
///
/// Filling a matrix with this source and orthogonalizing it yields a Haar distributed orthogonal
/// (or unitary) factor.
#[derive(Clone, Debug)]
pub struct StandardNormalSource<R> {
    /// Random number generator the samples are drawn with.
    pub rng: R,
}

impl<R> StandardNormalSource<R> {
    /// Creates a source drawing standard normal samples with `rng`.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<T: SampleStandardNormal, R: Rng> ScalarSource<T> for StandardNormalSource<R> {
    #[inline]
    fn next_sample(&mut self) -> T {
        T::sample_standard_normal(&mut self.rng)
    }
}
