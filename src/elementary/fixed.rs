//! Fixed-point series kernels.
//!
//! A fixed-point value at scale `w` is a `BigInt` `m` standing for `m / 2^w`.
//! Every kernel here works at a caller-chosen scale that already includes guard
//! bits; each primitive operation loses at most one unit in the last place, and
//! products truncate toward zero so that geometric series terms shrink to exactly
//! zero regardless of sign.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::precision::{rounded_div, shift_amount};

/// Guard bits carried by every kernel on top of the requested precision.
pub(crate) const GUARD_BITS: u64 = 32;

/// `1.0` at scale `w`.
pub(crate) fn one(w: u64) -> BigInt {
    BigInt::one() << shift_amount(w)
}

/// Rounds `x * 2^w` to the nearest integer.
pub(crate) fn to_fixed(x: &BigRational, w: u64) -> BigInt {
    rounded_div(&(x.numer() << shift_amount(w)), x.denom())
}

/// Interprets `m` at scale `w` as an exact rational.
pub(crate) fn from_fixed(m: BigInt, w: u64) -> BigRational {
    BigRational::new(m, one(w))
}

/// Drops `bits` low bits with rounding to nearest.
pub(crate) fn round_shift(m: &BigInt, bits: u64) -> BigInt {
    if bits == 0 {
        return m.clone();
    }
    rounded_div(m, &one(bits))
}

/// Product of two scale-`w` values, truncated toward zero.
pub(crate) fn mul(a: &BigInt, b: &BigInt, w: u64) -> BigInt {
    let product = a * b;
    let shift = shift_amount(w);
    if product.is_negative() {
        -((-product) >> shift)
    } else {
        product >> shift
    }
}

/// Re-expresses a scale-`from` value at the coarser scale `to`.
pub(crate) fn rescale(m: &BigInt, from: u64, to: u64) -> BigInt {
    round_shift(m, from.saturating_sub(to))
}

/// `pi` at scale `w` via Machin's formula: pi = 16*arctan(1/5) - 4*arctan(1/239).
pub(crate) fn pi(w: u64) -> BigInt {
    let wide = w + 16;
    let value = arctan_recip(5, wide) * 16u32 - arctan_recip(239, wide) * 4u32;
    round_shift(&value, 16)
}

/// `ln 2` at scale `w` via ln 2 = 2*atanh(1/3).
pub(crate) fn ln2(w: u64) -> BigInt {
    let wide = w + 16;
    round_shift(&(atanh_recip(3, wide) << 1usize), 16)
}

/// arctan(1/k) = sum_{i>=0} (-1)^i / ((2i+1) * k^(2i+1)).
fn arctan_recip(k: u64, w: u64) -> BigInt {
    let k_squared = BigInt::from(k) * BigInt::from(k);
    let mut power = one(w) / k;
    let mut sum = BigInt::zero();
    let mut i = 0u64;
    while !power.is_zero() {
        let term = &power / (2 * i + 1);
        if i % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power /= &k_squared;
        i += 1;
    }
    sum
}

/// atanh(1/k) = sum_{i>=0} 1 / ((2i+1) * k^(2i+1)).
fn atanh_recip(k: u64, w: u64) -> BigInt {
    let k_squared = BigInt::from(k) * BigInt::from(k);
    let mut power = one(w) / k;
    let mut sum = BigInt::zero();
    let mut i = 0u64;
    while !power.is_zero() {
        sum += &power / (2 * i + 1);
        power /= &k_squared;
        i += 1;
    }
    sum
}

/// atanh(t) for |t| <= 1/3 at scale `w`.
pub(crate) fn atanh(t: &BigInt, w: u64) -> BigInt {
    let t_squared = mul(t, t, w);
    let mut power = t.clone();
    let mut sum = t.clone();
    for i in 1..=w {
        power = mul(&power, &t_squared, w);
        if power.is_zero() {
            break;
        }
        sum += &power / (2 * i + 1);
    }
    sum
}

/// arctan(t) for |t| <= 1/2 at scale `w`.
pub(crate) fn atan_series(t: &BigInt, w: u64) -> BigInt {
    let t_squared = mul(t, t, w);
    let mut power = t.clone();
    let mut sum = t.clone();
    for i in 1..=w {
        power = -mul(&power, &t_squared, w);
        if power.is_zero() {
            break;
        }
        sum += &power / (2 * i + 1);
    }
    sum
}

/// exp(t) for |t| well below 1 at scale `w`.
pub(crate) fn exp_series(t: &BigInt, w: u64) -> BigInt {
    let mut term = one(w);
    let mut sum = term.clone();
    for i in 1..=w {
        term = mul(&term, t, w) / i;
        if term.is_zero() {
            break;
        }
        sum += &term;
    }
    sum
}

/// (sin(theta), cos(theta)) for |theta| <= pi/4 at scale `w`.
pub(crate) fn sin_cos(theta: &BigInt, w: u64) -> (BigInt, BigInt) {
    let theta_squared = mul(theta, theta, w);

    let mut term = theta.clone();
    let mut sin = term.clone();
    for k in 1..=w {
        term = -mul(&term, &theta_squared, w) / ((2 * k) * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        sin += &term;
    }

    let mut term = one(w);
    let mut cos = term.clone();
    for k in 1..=w {
        term = -mul(&term, &theta_squared, w) / ((2 * k - 1) * (2 * k));
        if term.is_zero() {
            break;
        }
        cos += &term;
    }

    (sin, cos)
}
