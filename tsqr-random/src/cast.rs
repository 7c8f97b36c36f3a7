use num_traits::{NumCast, PrimInt};
use thiserror::Error;
use tsqr_core::{ComplexField, RealField};

/// Error returned when a real magnitude can't be converted to an integer type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CastError {
    /// The value is outside the range of the target type, or is not a number.
    #[error("value is out of range for the target integer type")]
    OutOfRange,
    /// The value is negative and the target type is unsigned.
    #[error("negative value can't be converted to an unsigned integer type")]
    NegativeToUnsigned,
}

/// Converts `x` to the integer type `I`, truncating toward zero.
///
/// Fails with [`CastError::NegativeToUnsigned`] if `x` is negative and `I` is unsigned, and with
/// [`CastError::OutOfRange`] if `x` is not a number, lies outside `I::MIN..=I::MAX`, or doesn't
/// fit in `I` after truncation.
pub fn checked_cast<I: PrimInt, R: RealField>(x: R) -> Result<I, CastError> {
    let zero = <R as ComplexField>::zero();
    if x < zero && I::min_value() == I::zero() {
        return Err(CastError::NegativeToUnsigned);
    }

    if x.is_nan() {
        return Err(CastError::OutOfRange);
    }

    let lo: R = NumCast::from(I::min_value()).ok_or(CastError::OutOfRange)?;
    let hi: R = NumCast::from(I::max_value()).ok_or(CastError::OutOfRange)?;
    if x < lo || x > hi {
        return Err(CastError::OutOfRange);
    }

    // the bounds themselves may have been rounded away from zero
    <I as NumCast>::from(x).ok_or(CastError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_value_fits() {
        assert_eq!(checked_cast::<i32, f64>(i32::MAX as f64), Ok(i32::MAX));
        assert_eq!(checked_cast::<i32, f64>(i32::MIN as f64), Ok(i32::MIN));
        assert_eq!(checked_cast::<u8, f32>(255.0), Ok(255));
    }

    #[test]
    fn one_past_max_fails() {
        assert_eq!(
            checked_cast::<i32, f64>(i32::MAX as f64 + 1.0),
            Err(CastError::OutOfRange),
        );
        assert_eq!(
            checked_cast::<i32, f64>(i32::MIN as f64 - 1.0),
            Err(CastError::OutOfRange),
        );
        assert_eq!(checked_cast::<u8, f32>(256.0), Err(CastError::OutOfRange));
        // 2^31 is the closest f32 to i32::MAX
        assert_eq!(checked_cast::<i32, f32>(i32::MAX as f32), Err(CastError::OutOfRange));
    }

    #[test]
    fn negative_into_unsigned() {
        assert_eq!(checked_cast::<u32, f64>(-1.0), Err(CastError::NegativeToUnsigned));
        assert_eq!(checked_cast::<usize, f32>(-0.5), Err(CastError::NegativeToUnsigned));
        assert_eq!(checked_cast::<usize, f64>(-0.0), Ok(0));
    }

    #[test]
    fn not_a_number() {
        assert_eq!(checked_cast::<usize, f64>(f64::NAN), Err(CastError::OutOfRange));
        assert_eq!(checked_cast::<usize, f64>(f64::INFINITY), Err(CastError::OutOfRange));
        assert_eq!(checked_cast::<i64, f32>(f32::NEG_INFINITY), Err(CastError::OutOfRange));
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(checked_cast::<usize, f64>(3.7), Ok(3));
        assert_eq!(checked_cast::<i32, f64>(-3.7), Ok(-3));
        assert_eq!(checked_cast::<usize, f64>(1e300), Err(CastError::OutOfRange));
    }

    #[test]
    fn display() {
        assert_eq!(
            CastError::NegativeToUnsigned.to_string(),
            "negative value can't be converted to an unsigned integer type",
        );
    }
}
