//! Random test matrices with prescribed spectral properties.
//!
//! [`MatrixGenerator`] builds random matrices, random orthogonal (or unitary) factors in explicit
//! or implicit form, matrices with an exact singular value spectrum, and upper triangular
//! factors with an exact spectrum. Every factorization goes through a [`tsqr_qr::RawQr`] backend
//! chosen by the caller.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tsqr_core::Mat;
//! use tsqr_qr::HouseholderQr;
//! use tsqr_random::{MatrixGenerator, StandardNormalSource};
//!
//! let mut source = StandardNormalSource::new(StdRng::seed_from_u64(0));
//! let mut gen = MatrixGenerator::new(&mut source, HouseholderQr);
//!
//! let mut r = Mat::<f64>::zeros(4, 4);
//! gen.fill_random_r(r.as_mut(), &[4.0, 3.0, 2.0, 1.0]).unwrap();
//! assert_eq!(r[(3, 0)], 0.0);
//! ```

#![warn(rust_2018_idioms)]

mod cast;
mod generator;
pub mod source;

pub use cast::{checked_cast, CastError};
pub use generator::MatrixGenerator;
pub use source::{DistributionSource, SampleStandardNormal, ScalarSource, StandardNormalSource};
