//! Precision bookkeeping shared by the elementary functions and the gamma core.
//!
//! A precision `px` is a signed bit count. Non-negative values ask for the result
//! to be rounded to `px` significant bits; negative values are a sentinel meaning
//! "hand back the exact intermediate", used when a caller wants to defer the
//! final rounding.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Signed bit precision; negative means "do not truncate".
pub type Precision = i64;

/// Extra bits the gamma core carries above its working precision.
pub(crate) const GUARD_BITS: u64 = 16;

/// Returns `max(|px|, 1)`, the bit count a precision stands for.
pub fn magnitude(px: Precision) -> u64 {
    px.unsigned_abs().max(1)
}

/// Returns `e = bits(numer) - bits(denom)`, so that `2^(e-1) < |x| < 2^(e+1)`.
///
/// Zero has no meaningful magnitude; callers check for it first.
pub fn magnitude_bits(x: &BigRational) -> i64 {
    let numer_bits = i64::try_from(x.numer().bits()).unwrap_or(i64::MAX);
    let denom_bits = i64::try_from(x.denom().bits()).unwrap_or(i64::MAX);
    numer_bits - denom_bits
}

/// `2^exponent` as an exact rational.
pub fn pow2(exponent: i64) -> BigRational {
    let shift = shift_amount(exponent.unsigned_abs());
    if exponent >= 0 {
        BigRational::from_integer(BigInt::one() << shift)
    } else {
        BigRational::new(BigInt::one(), BigInt::one() << shift)
    }
}

/// Exact stop threshold `2^-|px|` for series evaluation.
pub fn epsilon(px: Precision) -> BigRational {
    pow2(-(px.unsigned_abs().min(i64::MAX as u64) as i64))
}

/// Divides and rounds half away from zero. `denom` must be positive.
pub fn rounded_div(numer: &BigInt, denom: &BigInt) -> BigInt {
    let (quotient, remainder) = numer.div_rem(denom);
    if (remainder.abs() << 1usize) >= *denom {
        if numer.is_negative() {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

/// Rounds `x` to the nearest multiple of `2^-bits` (`bits` may be negative).
pub fn round_to_grid(x: &BigRational, bits: i64) -> BigRational {
    let shift = shift_amount(bits.unsigned_abs());
    if bits >= 0 {
        let scaled = rounded_div(&(x.numer() << shift), x.denom());
        BigRational::new(scaled, BigInt::one() << shift)
    } else {
        let scaled = rounded_div(x.numer(), &(x.denom() << shift));
        BigRational::from_integer(scaled << shift)
    }
}

/// Rounds `x` to `width` significant bits. A width of zero is treated as one.
pub fn truncate_significant(x: &BigRational, width: u64) -> BigRational {
    if x.is_zero() {
        return x.clone();
    }
    let width = i64::try_from(width.max(1)).unwrap_or(i64::MAX);
    // |x| < 2^(e+1), so keeping `width - 1 - e` fractional bits keeps `width` significant ones.
    let grid = width.saturating_sub(1).saturating_sub(magnitude_bits(x));
    round_to_grid(x, grid)
}

/// Applies the final rounding step for a signed precision.
pub fn finish(x: BigRational, px: Precision) -> BigRational {
    if px < 0 {
        x
    } else {
        truncate_significant(&x, px.unsigned_abs())
    }
}

/// A bit count as a signed precision, saturating at `i64::MAX`.
pub(crate) fn to_precision(bits: u64) -> Precision {
    Precision::try_from(bits).unwrap_or(Precision::MAX)
}

pub(crate) fn shift_amount(bits: u64) -> usize {
    if bits > crate::error::MAX_SHIFT_BITS {
        crate::detected_would_exhaust_memory!("binary shift beyond supported range");
    }
    bits as usize
}
