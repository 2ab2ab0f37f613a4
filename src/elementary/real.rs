//! Real elementary functions over exact rationals.
//!
//! Every function takes a bit precision and returns a dyadic rational. Results of
//! magnitude around one are accurate to about `2^-bits` absolutely; `exp` is
//! accurate to `bits` bits relatively, and functions that are linear near zero
//! (`sin`, `sinh`, `atan`, `sqrt`) carry extra bits for tiny arguments so their
//! relative accuracy holds there as well.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::fixed::{self, from_fixed, rescale, round_shift, to_fixed, GUARD_BITS};
use crate::precision::{magnitude_bits, pow2, rounded_div, shift_amount, truncate_significant};

/// Number of argument halvings before the exponential series is summed.
const HALVING_STEPS: u64 = 8;

/// `pi` to `bits` fractional bits.
pub fn pi(bits: u64) -> BigRational {
    let w = bits + GUARD_BITS;
    finish(&fixed::pi(w), w)
}

/// `ln 2` to `bits` fractional bits.
pub fn ln2(bits: u64) -> BigRational {
    let w = bits + GUARD_BITS;
    finish(&fixed::ln2(w), w)
}

/// `e^x` to `bits` significant bits.
///
/// Reduces `x = k*ln2 + r` with `|r| <= ln2/2`, sums the series for `r / 2^8`
/// and squares the result back up before scaling by `2^k`.
pub fn exp(x: &BigRational, bits: u64) -> BigRational {
    if x.is_zero() {
        return BigRational::one();
    }
    let ln2_estimate = from_fixed(fixed::ln2(64), 64);
    let k = (x / ln2_estimate).round().to_integer();
    let Some(k_shift) = k.to_i64() else {
        crate::detected_would_exhaust_memory!("exp argument beyond representable range");
    };

    let w = bits + GUARD_BITS + HALVING_STEPS;
    let wide = w + k.bits();
    let reduced = to_fixed(x, wide) - &k * fixed::ln2(wide);
    let halved = round_shift(&reduced, k.bits() + HALVING_STEPS);

    let mut value = fixed::exp_series(&halved, w);
    for _ in 0..HALVING_STEPS {
        value = fixed::mul(&value, &value, w);
    }

    finish(&value, w) * pow2(k_shift)
}

/// `ln |x|` to about `bits` fractional bits, or `None` when `x` is zero.
pub fn ln(x: &BigRational, bits: u64) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    // x = m * 2^k with m in (1/2, 2); ln m = 2*atanh((m-1)/(m+1)).
    let k = magnitude_bits(x);
    let shift = shift_amount(k.unsigned_abs());
    let numer = x.numer().abs();
    let denom = x.denom().clone();
    let (m_numer, m_denom) = if k >= 0 {
        (numer, denom << shift)
    } else {
        (numer << shift, denom)
    };

    let k_bits = u64::from(u64::BITS - k.unsigned_abs().leading_zeros());
    let w = bits + GUARD_BITS + k_bits;
    let t = rounded_div(
        &((&m_numer - &m_denom) << shift_amount(w)),
        &(&m_numer + &m_denom),
    );
    let mut total = fixed::atanh(&t, w) << 1usize;
    if k != 0 {
        total += fixed::ln2(w) * k;
    }
    Some(finish(&total, w))
}

/// `(sin x, cos x)` to about `bits` bits.
pub fn sin_cos(x: &BigRational, bits: u64) -> (BigRational, BigRational) {
    if x.is_zero() {
        return (BigRational::zero(), BigRational::one());
    }
    let pi_estimate = from_fixed(fixed::pi(64), 64);
    let two = BigRational::from_integer(BigInt::from(2));
    let quadrant = (x * two / pi_estimate).round().to_integer();

    let extra = if quadrant.is_zero() {
        magnitude_bits(x).min(0).unsigned_abs()
    } else {
        0
    };
    let w = bits + GUARD_BITS + extra;
    let wide = w + quadrant.bits() + 1;
    let half_pi = fixed::pi(wide) >> 1usize;
    let reduced = rescale(&(to_fixed(x, wide) - &quadrant * half_pi), wide, w);

    let (sin, cos) = fixed::sin_cos(&reduced, w);
    let (sin, cos) = rotate(&quadrant, sin, cos);
    (finish(&sin, w), finish(&cos, w))
}

pub fn sin(x: &BigRational, bits: u64) -> BigRational {
    sin_cos(x, bits).0
}

pub fn cos(x: &BigRational, bits: u64) -> BigRational {
    sin_cos(x, bits).1
}

/// `(sin(pi*x), cos(pi*x))` with the argument reduced exactly.
///
/// `x` is split as `2j + n/2 + r` with `|r| <= 1/4` in exact arithmetic, so
/// integers and half-integers give exact results and values near them keep full
/// relative accuracy.
pub fn sin_cos_pi(x: &BigRational, bits: u64) -> (BigRational, BigRational) {
    let two = BigRational::from_integer(BigInt::from(2));
    let y = x - &two * (x / &two).round();
    let half_turns = (&y * &two).round().to_integer();
    let r = y - BigRational::new(half_turns.clone(), BigInt::from(2));

    if r.is_zero() {
        let (sin, cos) = rotate(&half_turns, BigInt::zero(), BigInt::one());
        return (BigRational::from_integer(sin), BigRational::from_integer(cos));
    }

    let extra = magnitude_bits(&r).min(0).unsigned_abs();
    let w = bits + GUARD_BITS + extra;
    let theta = rounded_div(&(fixed::pi(w) * r.numer()), r.denom());
    let (sin, cos) = fixed::sin_cos(&theta, w);
    let (sin, cos) = rotate(&half_turns, sin, cos);
    (finish(&sin, w), finish(&cos, w))
}

pub fn sin_pi(x: &BigRational, bits: u64) -> BigRational {
    sin_cos_pi(x, bits).0
}

pub fn cos_pi(x: &BigRational, bits: u64) -> BigRational {
    sin_cos_pi(x, bits).1
}

/// `(sinh x, cosh x)` to about `bits` significant bits.
pub fn sinh_cosh(x: &BigRational, bits: u64) -> (BigRational, BigRational) {
    if x.is_zero() {
        return (BigRational::zero(), BigRational::one());
    }
    let extra = magnitude_bits(x).min(0).unsigned_abs();
    let e = exp(x, bits + extra + 4);
    let inverse = e.recip();
    let two = BigRational::from_integer(BigInt::from(2));
    let sinh = (&e - &inverse) / &two;
    let cosh = (e + inverse) / two;
    (
        truncate_significant(&sinh, bits + 4),
        truncate_significant(&cosh, bits + 4),
    )
}

pub fn sinh(x: &BigRational, bits: u64) -> BigRational {
    sinh_cosh(x, bits).0
}

pub fn cosh(x: &BigRational, bits: u64) -> BigRational {
    sinh_cosh(x, bits).1
}

/// `arctan x` to about `bits` bits.
pub fn atan(x: &BigRational, bits: u64) -> BigRational {
    if x.is_zero() {
        return BigRational::zero();
    }
    let extra = magnitude_bits(x).min(0).unsigned_abs();
    let w = bits + GUARD_BITS + extra;
    finish(&atan_fixed(x, w), w)
}

fn atan_fixed(x: &BigRational, w: u64) -> BigInt {
    if x.is_negative() {
        return -atan_fixed(&-x, w);
    }
    let one = BigRational::one();
    if *x > one {
        return (fixed::pi(w) >> 1usize) - atan_fixed(&x.recip(), w);
    }
    if *x > BigRational::new(BigInt::one(), BigInt::from(2)) {
        // atan x = pi/4 + atan((x-1)/(x+1)), and (x-1)/(x+1) lies in (-1/3, 0].
        let shifted = (x - &one) / (x + &one);
        return (fixed::pi(w) >> 2usize) + atan_fixed(&shifted, w);
    }
    fixed::atan_series(&to_fixed(x, w), w)
}

/// Principal value of `atan2(y, x)` in `(-pi, pi]`.
pub fn atan2(y: &BigRational, x: &BigRational, bits: u64) -> BigRational {
    if x.is_zero() {
        let half_pi = pi(bits + 1) / BigRational::from_integer(BigInt::from(2));
        return if y.is_positive() {
            half_pi
        } else if y.is_negative() {
            -half_pi
        } else {
            BigRational::zero()
        };
    }
    let base = atan(&(y / x), bits);
    if x.is_positive() {
        base
    } else if y.is_negative() {
        base - pi(bits)
    } else {
        base + pi(bits)
    }
}

/// `sqrt(x^2 + y^2)` to about `bits` significant bits.
pub fn hypot(x: &BigRational, y: &BigRational, bits: u64) -> BigRational {
    sqrt(&(x * x + y * y), bits)
}

/// `sqrt |x|` to about `bits` significant bits.
pub fn sqrt(x: &BigRational, bits: u64) -> BigRational {
    if x.is_zero() {
        return BigRational::zero();
    }
    let extra = (magnitude_bits(x).min(0).unsigned_abs() + 1) / 2;
    let w = bits + GUARD_BITS + extra;
    let scaled = (x.numer().abs() << shift_amount(2 * w)) / x.denom();
    finish(&scaled.sqrt(), w)
}

/// Maps `(sin r, cos r)` to `(sin, cos)` of `r + quadrant*pi/2`.
fn rotate(quadrant: &BigInt, sin: BigInt, cos: BigInt) -> (BigInt, BigInt) {
    match quadrant.mod_floor(&BigInt::from(4)).to_u8() {
        Some(1) => (cos, -sin),
        Some(2) => (-sin, -cos),
        Some(3) => (-cos, sin),
        _ => (sin, cos),
    }
}

/// Drops the guard bits of a scale-`w` kernel result.
fn finish(m: &BigInt, w: u64) -> BigRational {
    from_fixed(round_shift(m, GUARD_BITS), w - GUARD_BITS)
}
