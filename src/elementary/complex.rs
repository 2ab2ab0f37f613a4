//! Complex elementary functions over `Complex<BigRational>`.
//!
//! Results are rounded componentwise to a little more than `bits` significant
//! bits. Branch cuts follow the usual principal-value conventions. Functions
//! that pass through a logarithm return `None` when its argument is zero, which
//! marks a pole or an undefined point.

use num_bigint::BigInt;
use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::real;
pub use super::real::{atan2, hypot};
use crate::precision::{magnitude_bits, truncate_significant};

type C = Complex<BigRational>;

/// Headroom used by intermediate steps.
const INNER_BITS: u64 = 8;

fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn scale(z: &C, k: &BigRational) -> C {
    C::new(&z.re * k, &z.im * k)
}

fn times_i(z: C) -> C {
    C::new(-z.im, z.re)
}

fn times_minus_i(z: C) -> C {
    C::new(z.im, -z.re)
}

fn from_real(x: BigRational) -> C {
    C::new(x, BigRational::zero())
}

/// Extra bits needed to keep relative accuracy for components far below one.
fn tiny_extra(z: &C) -> u64 {
    [&z.re, &z.im]
        .into_iter()
        .filter(|part| !part.is_zero())
        .map(|part| magnitude_bits(part).min(0).unsigned_abs())
        .max()
        .unwrap_or(0)
}

fn truncated(z: C, bits: u64) -> C {
    C::new(
        truncate_significant(&z.re, bits + 2),
        truncate_significant(&z.im, bits + 2),
    )
}

fn checked_div(a: &C, b: &C) -> Option<C> {
    if b.is_zero() {
        return None;
    }
    Some(a / b)
}

pub fn abs(z: &C, bits: u64) -> BigRational {
    real::hypot(&z.re, &z.im, bits)
}

/// Principal argument in `(-pi, pi]`.
pub fn arg(z: &C, bits: u64) -> BigRational {
    real::atan2(&z.im, &z.re, bits)
}

/// Principal square root, with the real part non-negative.
pub fn sqrt(z: &C, bits: u64) -> C {
    if z.is_zero() {
        return C::zero();
    }
    let w = bits + INNER_BITS;
    if z.im.is_zero() {
        return if z.re.is_negative() {
            C::new(BigRational::zero(), real::sqrt(&z.re, bits))
        } else {
            from_real(real::sqrt(&z.re, bits))
        };
    }
    // Take the root of whichever of (r + |re|) avoids cancellation.
    let r = abs(z, w);
    let half = ratio(1, 2);
    let t = real::sqrt(&((&r + z.re.abs()) * &half), w);
    let other = &z.im.abs() / (&t * BigRational::from_integer(BigInt::from(2)));
    let sign = if z.im.is_negative() {
        -BigRational::one()
    } else {
        BigRational::one()
    };
    let root = if z.re.is_negative() {
        C::new(other, t * sign)
    } else {
        C::new(t, other * sign)
    };
    truncated(root, bits)
}

pub fn exp(z: &C, bits: u64) -> C {
    let w = bits + INNER_BITS;
    let magnitude = real::exp(&z.re, w);
    if z.im.is_zero() {
        return from_real(truncate_significant(&magnitude, bits + 2));
    }
    let (sin, cos) = real::sin_cos(&z.im, w);
    truncated(C::new(&magnitude * cos, magnitude * sin), bits)
}

/// `e^z - 1`, accurate for small `z`.
pub fn expm1(z: &C, bits: u64) -> C {
    if z.is_zero() {
        return C::zero();
    }
    // e^z - 1 = 2 * e^(z/2) * sinh(z/2)
    let w = bits + INNER_BITS + tiny_extra(z);
    let half = scale(z, &ratio(1, 2));
    let product = exp(&half, w) * sinh(&half, w);
    truncated(scale(&product, &ratio(2, 1)), bits)
}

/// Principal logarithm.
pub fn ln(z: &C, bits: u64) -> Option<C> {
    if z.is_zero() {
        return None;
    }
    let w = bits + INNER_BITS;
    let re = real::ln(&z.norm_sqr(), w + 1)? * ratio(1, 2);
    Some(truncated(C::new(re, arg(z, w)), bits))
}

/// `ln(1 + z)`, accurate for small `z`.
pub fn log1p(z: &C, bits: u64) -> Option<C> {
    let shifted = C::new(&z.re + BigRational::one(), z.im.clone());
    if shifted.is_zero() {
        return None;
    }
    if z.is_zero() {
        return Some(C::zero());
    }
    // |1 + z|^2 is formed exactly, so only the logarithm itself needs extra bits.
    let w = bits + INNER_BITS + tiny_extra(z);
    let re = real::ln(&shifted.norm_sqr(), w + 1)? * ratio(1, 2);
    let im = real::atan2(&shifted.im, &shifted.re, w);
    Some(truncated(C::new(re, im), bits))
}

pub fn log2(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let base = real::ln2(w);
    Some(truncated(scale(&ln(z, w)?, &base.recip()), bits))
}

pub fn log10(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let base = real::ln(&BigRational::from_integer(BigInt::from(10)), w)?;
    Some(truncated(scale(&ln(z, w)?, &base.recip()), bits))
}

/// Principal power `base^exponent = e^(exponent * ln base)`.
///
/// A zero base gives zero for exponents with positive real part and `None`
/// otherwise.
pub fn pow(base: &C, exponent: &C, bits: u64) -> Option<C> {
    if base.is_zero() {
        return exponent.re.is_positive().then(C::zero);
    }
    if exponent.is_zero() {
        return Some(C::one());
    }
    // The exponent scales the logarithm's absolute error.
    let growth = [&exponent.re, &exponent.im]
        .into_iter()
        .filter(|part| !part.is_zero())
        .map(|part| magnitude_bits(part).max(0).unsigned_abs())
        .max()
        .unwrap_or(0);
    let w = bits + INNER_BITS + growth;
    let logarithm = ln(base, w)?;
    Some(exp(&(exponent * logarithm), bits))
}

fn sin_cos(z: &C, bits: u64) -> (C, C) {
    let w = bits + INNER_BITS;
    let (s, c) = real::sin_cos(&z.re, w);
    let (sh, ch) = real::sinh_cosh(&z.im, w);
    let sin = C::new(&s * &ch, &c * &sh);
    let cos = C::new(c * ch, -(s * sh));
    (truncated(sin, bits), truncated(cos, bits))
}

pub fn sin(z: &C, bits: u64) -> C {
    sin_cos(z, bits).0
}

pub fn cos(z: &C, bits: u64) -> C {
    sin_cos(z, bits).1
}

pub fn tan(z: &C, bits: u64) -> Option<C> {
    let (sin, cos) = sin_cos(z, bits + INNER_BITS);
    Some(truncated(checked_div(&sin, &cos)?, bits))
}

/// `(sin(pi*z), cos(pi*z))` using the exact real-part reduction of
/// [`real::sin_cos_pi`].
pub fn sin_cos_pi(z: &C, bits: u64) -> (C, C) {
    let w = bits + INNER_BITS;
    let (s, c) = real::sin_cos_pi(&z.re, w);
    if z.im.is_zero() {
        return (from_real(s), from_real(c));
    }
    let scaled_im = real::pi(w + tiny_extra(z)) * &z.im;
    let (sh, ch) = real::sinh_cosh(&scaled_im, w);
    let sin = C::new(&s * &ch, &c * &sh);
    let cos = C::new(c * ch, -(s * sh));
    (truncated(sin, bits), truncated(cos, bits))
}

pub fn sin_pi(z: &C, bits: u64) -> C {
    sin_cos_pi(z, bits).0
}

fn sinh_cosh(z: &C, bits: u64) -> (C, C) {
    let w = bits + INNER_BITS;
    let (sh, ch) = real::sinh_cosh(&z.re, w);
    let (s, c) = real::sin_cos(&z.im, w);
    let sinh = C::new(&sh * &c, &ch * &s);
    let cosh = C::new(ch * c, sh * s);
    (truncated(sinh, bits), truncated(cosh, bits))
}

pub fn sinh(z: &C, bits: u64) -> C {
    sinh_cosh(z, bits).0
}

pub fn cosh(z: &C, bits: u64) -> C {
    sinh_cosh(z, bits).1
}

pub fn tanh(z: &C, bits: u64) -> Option<C> {
    let (sinh, cosh) = sinh_cosh(z, bits + INNER_BITS);
    Some(truncated(checked_div(&sinh, &cosh)?, bits))
}

/// `asin z = -i ln(iz + sqrt(1 - z^2))`.
pub fn asin(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let root = sqrt(&(C::one() - z * z), w);
    let inner = times_i(z.clone()) + root;
    Some(truncated(times_minus_i(ln(&inner, w)?), bits))
}

/// `acos z = pi/2 - asin z`.
pub fn acos(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let half_pi = real::pi(w) * ratio(1, 2);
    Some(truncated(from_real(half_pi) - asin(z, w)?, bits))
}

/// `atan z = (i/2) (ln(1 - iz) - ln(1 + iz))`; `None` at `z = ±i`.
pub fn atan(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let iz = times_i(z.clone());
    let difference = ln(&(C::one() - &iz), w)? - ln(&(C::one() + iz), w)?;
    Some(truncated(scale(&times_i(difference), &ratio(1, 2)), bits))
}

/// `asinh z = ln(z + sqrt(z^2 + 1))`, evaluated on the right half-plane and
/// mirrored by oddness.
pub fn asinh(z: &C, bits: u64) -> Option<C> {
    if z.re.is_negative() {
        return asinh(&-z, bits).map(|value| -value);
    }
    let w = bits + INNER_BITS;
    let root = sqrt(&(z * z + C::one()), w);
    Some(truncated(ln(&(z + root), w)?, bits))
}

/// `acosh z = ln(z + sqrt(z + 1) sqrt(z - 1))`.
pub fn acosh(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let product = sqrt(&(z + C::one()), w) * sqrt(&(z - C::one()), w);
    Some(truncated(ln(&(z + product), w)?, bits))
}

/// `atanh z = (ln(1 + z) - ln(1 - z)) / 2`; `None` at `z = ±1`.
pub fn atanh(z: &C, bits: u64) -> Option<C> {
    let w = bits + INNER_BITS;
    let difference = ln(&(C::one() + z), w)? - ln(&(C::one() - z), w)?;
    Some(truncated(scale(&difference, &ratio(1, 2)), bits))
}
