//! Stirling's asymptotic series for lnΓ.
//!
//! For `|Re(u)|` at or above the walk threshold,
//!
//! ```text
//! lnΓ(u) ≈ (u - 1/2) ln u - u + ln(2π)/2 + Σ B(2k) / (2k (2k-1) u^(2k-1))
//! ```
//!
//! The partial sum and the running power of `u` are rounded to the working width
//! after every term to keep the rationals' denominators from growing. The loop
//! runs over even indices up to the working width and stops at the first term
//! below `2^-bits`, after adding it. Since the series is asymptotic it also stops,
//! without adding, at the first term larger than its predecessor; the partial sum
//! at that point is returned as is.

use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;

use crate::argument::GammaArgument;
use crate::bernoulli::BernoulliCache;
use crate::elementary::real;
use crate::precision::{epsilon, magnitude, magnitude_bits, to_precision, Precision, GUARD_BITS};

/// Evaluates the series at `u`, rounding the result to `px` significant bits,
/// or returning the unrounded sum when `px` is negative.
///
/// Returns `None` only for `u = 0`.
pub fn stirling_ln_gamma<A: GammaArgument>(
    u: &A,
    px: Precision,
    bernoulli: &BernoulliCache,
    debug: bool,
) -> Option<A> {
    let bits = magnitude(px);
    let growth = magnitude_bits(&u.magnitude_squared()).max(0).unsigned_abs() / 2;
    let w = bits + GUARD_BITS + growth;

    let two = BigRational::from_integer(BigInt::from(2));
    let ln_u = u.ln(w)?;
    let half = A::from_ratio(two.recip());
    let half_ln_two_pi = real::ln(&(real::pi(w + 2) * &two), w)? / &two;
    let leading = (u.clone() - half) * ln_u - u.clone() + A::from_ratio(half_ln_two_pi);
    let mut sum = leading.truncated(w);

    let u_squared = (u.clone() * u.clone()).truncated(w);
    let mut power = u.truncated(w);
    let threshold = epsilon(to_precision(bits));
    let epsilon_squared = &threshold * &threshold;
    let mut previous_size: Option<BigRational> = None;

    for i in (2..=bits).step_by(2) {
        let Ok(index) = usize::try_from(i) else {
            break;
        };
        let coefficient = bernoulli.get(index)
            / BigRational::from_integer(BigInt::from(i) * BigInt::from(i - 1));
        let term = A::from_ratio(coefficient.clone()) / power.clone();
        let size = term.magnitude_squared();
        if previous_size.as_ref().is_some_and(|last| size > *last) {
            if debug {
                debug!(index = i, "series diverging, keeping partial sum");
            }
            break;
        }

        sum = (sum + term.clone()).truncated(w);
        if debug {
            debug!(
                index = i,
                coefficient = %coefficient,
                term = ?term.approx(),
                sum = ?sum.approx(),
                "stirling term"
            );
        }
        if size < epsilon_squared {
            break;
        }
        previous_size = Some(size);
        power = (power * u_squared.clone()).truncated(w);
    }

    Some(if px < 0 { sum } else { sum.truncated(bits) })
}
