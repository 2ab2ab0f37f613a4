//! The gamma engine.
//!
//! Finite arguments are handled in two regimes:
//! - `Re(z) < 0`: reflection. lnΓ uses
//!   `lnΓ(z) = ln π - ln(-z) - lnΓ(-z) - ln sin(πz)`, so the recursive call sees
//!   a positive real part; Γ uses `Γ(z) = π / (sin(πz) Γ(1 - z))` directly so
//!   that no branch of the complex logarithm leaks into the sign.
//! - `Re(z) >= 0`: the argument is walked upward, `v *= u; u += 1`, until
//!   `|Re(u)|` reaches the walk threshold, and `lnΓ(z) = stirling(u) - ln v`.
//!   Γ is `exp(lnΓ)`.
//!
//! Poles surface as `None` from the internal evaluators: a zero argument makes
//! `v` vanish, and a non-positive integer makes `sin(πz)` exactly zero because
//! its argument reduction is exact.

use std::f64::consts::{LN_2, PI};
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;
use tracing::debug;

use crate::argument::GammaArgument;
use crate::bernoulli::BernoulliCache;
use crate::config::GammaConfig;
use crate::dispatch::GammaFunction;
use crate::elementary::real;
use crate::error::GammaError;
use crate::precision::{magnitude_bits, to_precision, Precision, GUARD_BITS};
use crate::stirling::stirling_ln_gamma;

/// Owns the configuration and the Bernoulli cache shared by every evaluation.
#[derive(Debug, Default)]
pub struct GammaEngine {
    config: GammaConfig,
    bernoulli: BernoulliCache,
}

impl GammaEngine {
    pub fn new(config: GammaConfig) -> Result<Self, GammaError> {
        config.validate()?;
        Ok(Self {
            config,
            bernoulli: BernoulliCache::new(),
        })
    }

    /// Process-wide engine with the default configuration, created on first use.
    pub fn shared() -> &'static GammaEngine {
        static SHARED: OnceLock<GammaEngine> = OnceLock::new();
        SHARED.get_or_init(GammaEngine::default)
    }

    pub fn config(&self) -> &GammaConfig {
        &self.config
    }

    pub fn bernoulli(&self) -> &BernoulliCache {
        &self.bernoulli
    }

    pub fn bernoulli_number(&self, n: usize) -> BigRational {
        self.bernoulli.get(n)
    }

    /// Stirling series at `u`; see [`stirling_ln_gamma`].
    pub fn stirling_ln_gamma<A: GammaArgument>(
        &self,
        u: &A,
        px: Precision,
        debug: bool,
    ) -> Option<A> {
        stirling_ln_gamma(u, px, &self.bernoulli, debug)
    }

    pub fn ln_gamma<T: GammaFunction>(&self, z: &T, px: Precision) -> T {
        z.ln_gamma(self, px, false)
    }

    /// Like [`ln_gamma`](Self::ln_gamma), also emitting `debug` events for the
    /// shifted argument and every series term.
    pub fn ln_gamma_debug<T: GammaFunction>(&self, z: &T, px: Precision) -> T {
        z.ln_gamma(self, px, true)
    }

    pub fn gamma<T: GammaFunction>(&self, z: &T, px: Precision) -> T {
        z.gamma(self, px)
    }

    /// [`ln_gamma`](Self::ln_gamma) at the configured default precision.
    pub fn ln_gamma_default<T: GammaFunction>(&self, z: &T) -> T {
        self.ln_gamma(z, self.config.default_precision)
    }

    /// [`gamma`](Self::gamma) at the configured default precision.
    pub fn gamma_default<T: GammaFunction>(&self, z: &T) -> T {
        self.gamma(z, self.config.default_precision)
    }

    /// lnΓ of a finite argument to `bits` significant bits, or `None` at a pole.
    pub(crate) fn ln_gamma_finite<A: GammaArgument>(
        &self,
        z: &A,
        bits: u64,
        debug: bool,
    ) -> Option<A> {
        if z.real().is_negative() {
            return self.reflected_ln_gamma(z, bits, debug);
        }
        let w = bits + GUARD_BITS;
        let (u, v) = walk(z, self.config.walk_threshold(bits), w);
        if debug {
            debug!(u = ?u.approx(), v = ?v.approx(), bits, "argument shifted");
        }
        let series = self.stirling_ln_gamma(&u, -to_precision(w), debug)?;
        let correction = v.ln(w)?;
        Some((series - correction).truncated(bits))
    }

    fn reflected_ln_gamma<A: GammaArgument>(&self, z: &A, bits: u64, debug: bool) -> Option<A> {
        let w = bits + GUARD_BITS;
        let negated = -z.clone();
        let mirrored = self.ln_gamma_finite(&negated, w, debug)?;
        if debug {
            debug!(value = ?mirrored.approx(), "reflected argument evaluated");
        }
        let ln_sine = z.sin_pi(w).ln(w)?;
        let ln_pi = A::from_ratio(real::ln(&real::pi(w), w)?);
        let ln_negated = negated.ln(w)?;
        Some((ln_pi - ln_negated - mirrored - ln_sine).truncated(bits))
    }

    /// Γ of a finite argument to `bits` significant bits, or `None` at a pole.
    ///
    /// The binary exponent of the result is estimated from lnΓ first; values
    /// outside `range` come back as [`Scaled::Overflow`] or [`Scaled::Underflow`]
    /// without being materialised.
    pub(crate) fn gamma_finite<A: GammaArgument>(
        &self,
        z: &A,
        bits: u64,
        range: ExponentRange,
    ) -> Option<Scaled<A>> {
        let w = bits + GUARD_BITS;
        if z.real().is_negative() {
            let sine = z.sin_pi(w);
            if sine.is_zero() {
                return None;
            }
            let mirrored = A::one() - z.clone();
            let logarithm = self.ln_gamma_finite(&mirrored, w + growth_bits(&mirrored), false)?;
            // |Γ(z)| = π / (|sin(πz)| |Γ(1 - z)|)
            let sine_bits = magnitude_bits(&sine.magnitude_squared()) as f64 / 2.0;
            let exponent = PI.log2() - sine_bits - logarithm.approx().0 / LN_2;
            if let Some(outside) = range.classify(exponent) {
                return Some(outside);
            }
            let partner = logarithm.exp(w);
            let pi = A::from_ratio(real::pi(w));
            return Some(Scaled::Finite((pi / (sine * partner)).truncated(bits)));
        }
        let logarithm = self.ln_gamma_finite(z, w + growth_bits(z), false)?;
        if let Some(outside) = range.classify(logarithm.approx().0 / LN_2) {
            return Some(outside);
        }
        Some(Scaled::Finite(logarithm.exp(bits)))
    }
}

/// Binary exponent window a Γ value has to fall in before it is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ExponentRange {
    pub(crate) min: i64,
    pub(crate) max: i64,
}

impl ExponentRange {
    /// Exact results, kept well inside what the shift guard accepts.
    pub(crate) const EXACT: Self = Self {
        min: -(1 << 31),
        max: 1 << 31,
    };

    /// Results headed for a double. The slack past the double range is left
    /// to the final conversion, which saturates to infinity or zero.
    pub(crate) const F64: Self = Self {
        min: -1100,
        max: 1100,
    };

    fn classify<A>(&self, exponent: f64) -> Option<Scaled<A>> {
        if exponent > self.max as f64 {
            Some(Scaled::Overflow)
        } else if exponent < self.min as f64 {
            Some(Scaled::Underflow)
        } else {
            None
        }
    }
}

/// A Γ value, or the side of an [`ExponentRange`] it fell out of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Scaled<A> {
    Finite(A),
    Overflow,
    Underflow,
}

/// Bits lnΓ needs in front of the binary point, about `log2 |z|^2`. `exp` turns
/// the logarithm's absolute error into relative error.
fn growth_bits<A: GammaArgument>(z: &A) -> u64 {
    magnitude_bits(&z.magnitude_squared()).max(0).unsigned_abs()
}

/// Walks `z` upward until `|Re(u)| >= threshold`, returning `(u, v)` with
/// `Γ(z) = Γ(u) / v`. `v` is rounded to `w` significant bits as it grows.
fn walk<A: GammaArgument>(z: &A, threshold: u64, w: u64) -> (A, A) {
    let bound = BigRational::from_integer(BigInt::from(threshold));
    let mut u = z.clone();
    let mut v = A::one();
    while u.real().abs() < bound {
        v = (v * u.clone()).truncated(w);
        u = u + A::one();
    }
    (u, v)
}
