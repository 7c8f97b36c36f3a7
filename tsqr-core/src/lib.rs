//! `tsqr` core module.
//!
//! This crate contains:
//! - the scalar field traits ([`ComplexField`], [`RealField`]),
//! - column-major matrix views ([`MatRef`], [`MatMut`]) and the owning [`Mat`],
//! - the [`Side`] and [`Transpose`] arguments shared by the factorization routines.

#![warn(rust_2018_idioms)]

use core::{
    fmt::Debug,
    ops::{Add, Div, Mul, Neg, Sub},
};
use num_complex::Complex;
use num_traits::NumCast;

mod mat;

pub use mat::{Mat, MatMut, MatRef};

/// Complex floating point number type, where the real and imaginary parts each occupy 32 bits.
#[allow(non_camel_case_types)]
pub type c32 = Complex<f32>;
/// Complex floating point number type, where the real and imaginary parts each occupy 64 bits.
#[allow(non_camel_case_types)]
pub type c64 = Complex<f64>;

/// Indicates whether the corresponding operand should be conjugated or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conj {
    /// Do not conjugate
    No,
    /// Do conjugate
    Yes,
}

impl Conj {
    /// Returns the conjugation that results from applying `self`, then `other`.
    #[inline]
    pub fn compose(self, other: Conj) -> Conj {
        if self == other {
            Conj::No
        } else {
            Conj::Yes
        }
    }
}

/// Side from which an orthogonal factor is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// `C <- op(Q) * C`
    Left,
    /// `C <- C * op(Q)`
    Right,
}

/// Operation applied to an orthogonal factor before it is multiplied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transpose {
    /// `op(Q) = Q`
    None,
    /// `op(Q) = Q^T`
    Transpose,
    /// `op(Q) = Q^H`
    ConjTranspose,
}

/// Trait that describes a complex number field.
///
/// Real numbers can also be seen as complex numbers, where the imaginary part is always zero.
pub trait ComplexField:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Send
    + Sync
    + Debug
    + 'static
{
    type Real: RealField;

    /// Operation that maps an orthogonal factor to its inverse.
    ///
    /// This is [`Transpose::Transpose`] for real fields, and [`Transpose::ConjTranspose`] for
    /// complex ones.
    const ADJOINT: Transpose;

    /// Returns a complex number whose real part is equal to `real`, and a zero imaginary part.
    fn from_real(real: Self::Real) -> Self;
    /// Returns the real and imaginary part.
    fn into_real_imag(self) -> (Self::Real, Self::Real);
    /// Returns the real part.
    #[inline(always)]
    fn real(self) -> Self::Real {
        self.into_real_imag().0
    }
    /// Returns the imaginary part.
    #[inline(always)]
    fn imag(self) -> Self::Real {
        self.into_real_imag().1
    }

    /// Returns the value representing `0.0`.
    fn zero() -> Self;
    /// Returns the value representing `1.0`.
    fn one() -> Self;

    /// Returns the conjugate of the number.
    fn conj(self) -> Self;

    /// Returns the input, scaled by `factor`.
    #[inline(always)]
    fn scale_real(self, factor: Self::Real) -> Self {
        self * Self::from_real(factor)
    }

    /// Returns the squared norm of the number.
    #[inline(always)]
    fn abs2(self) -> Self::Real {
        let (re, im) = self.into_real_imag();
        re * re + im * im
    }

    /// Returns the norm of the number.
    #[inline(always)]
    fn abs(self) -> Self::Real {
        self.abs2().sqrt()
    }
}

/// Trait that describes a real number field.
///
/// [`NumCast`] is required so that real magnitudes can be converted to and from the index types
/// used for buffer lengths.
pub trait RealField: ComplexField<Real = Self> + PartialOrd + NumCast {
    /// Returns the square root of the number.
    fn sqrt(self) -> Self;
    /// Returns the value closest to `n`.
    fn from_usize(n: usize) -> Self;
    /// Returns `true` if the number is NaN.
    fn is_nan(self) -> bool;
}

macro_rules! impl_real {
    ($ty: ty) => {
        impl RealField for $ty {
            #[inline(always)]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }

            #[inline(always)]
            fn from_usize(n: usize) -> Self {
                n as $ty
            }

            #[inline(always)]
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }
        }

        impl ComplexField for $ty {
            type Real = $ty;
            const ADJOINT: Transpose = Transpose::Transpose;

            #[inline(always)]
            fn from_real(real: Self::Real) -> Self {
                real
            }

            #[inline(always)]
            fn into_real_imag(self) -> (Self::Real, Self::Real) {
                (self, 0.0)
            }

            #[inline(always)]
            fn zero() -> Self {
                0.0
            }

            #[inline(always)]
            fn one() -> Self {
                1.0
            }

            #[inline(always)]
            fn conj(self) -> Self {
                self
            }

            #[inline(always)]
            fn abs2(self) -> Self::Real {
                self * self
            }

            #[inline(always)]
            fn abs(self) -> Self::Real {
                <$ty>::abs(self)
            }
        }
    };
}

macro_rules! impl_complex {
    ($ty: ty, $real: ty) => {
        impl ComplexField for $ty {
            type Real = $real;
            const ADJOINT: Transpose = Transpose::ConjTranspose;

            #[inline(always)]
            fn from_real(real: Self::Real) -> Self {
                Complex { re: real, im: 0.0 }
            }

            #[inline(always)]
            fn into_real_imag(self) -> (Self::Real, Self::Real) {
                (self.re, self.im)
            }

            #[inline(always)]
            fn zero() -> Self {
                Complex { re: 0.0, im: 0.0 }
            }

            #[inline(always)]
            fn one() -> Self {
                Complex { re: 1.0, im: 0.0 }
            }

            #[inline(always)]
            fn conj(self) -> Self {
                Complex {
                    re: self.re,
                    im: -self.im,
                }
            }

            #[inline(always)]
            fn scale_real(self, factor: Self::Real) -> Self {
                Complex {
                    re: self.re * factor,
                    im: self.im * factor,
                }
            }

            #[inline(always)]
            fn abs(self) -> Self::Real {
                self.re.hypot(self.im)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
impl_complex!(c32, f32);
impl_complex!(c64, f64);
