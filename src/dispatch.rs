//! Per-type entry points.
//!
//! [`GammaFunction`] gives every supported element type the same two operations.
//! Special values are resolved here, before the engine sees a finite argument:
//!
//! | argument            | lnΓ          | Γ            |
//! |---------------------|--------------|--------------|
//! | NaN                 | NaN          | NaN          |
//! | ±inf                | +inf         | +inf         |
//! | 0, negative integer | pole         | pole         |
//! | 1, 2                | 0            | 1            |
//! | positive integer n  | ln((n-1)!)   | (n-1)!       |
//!
//! The integer rows apply to [`Rational`] only; complex arguments always go
//! through the engine, which reports the same poles. `f64` and `Complex64` are
//! converted exactly to [`ComplexRational`], evaluated at the engine's
//! `float_precision`, and converted back, so they share one numerical path with
//! the exact types. See [`crate::native`] for the direct `libm` shortcut.

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

use crate::argument::GammaArgument;
use crate::combinatorics::factorial;
use crate::complex::ComplexRational;
use crate::elementary::real;
use crate::gamma::{ExponentRange, GammaEngine, Scaled};
use crate::precision::{finish, Precision};
use crate::rational::Rational;

/// Types lnΓ and Γ can be evaluated on.
pub trait GammaFunction: Sized {
    /// lnΓ to `px` significant bits (`px < 0` skips the final rounding). With
    /// `debug` set, intermediate values are emitted as `tracing` events; the
    /// result is unaffected.
    fn ln_gamma(&self, engine: &GammaEngine, px: Precision, debug: bool) -> Self;

    /// Γ to `px` significant bits (`px < 0` skips the final rounding).
    fn gamma(&self, engine: &GammaEngine, px: Precision) -> Self;
}

fn finish_argument<A: GammaArgument>(value: A, px: Precision) -> A {
    if px < 0 {
        value
    } else {
        value.truncated(px.unsigned_abs())
    }
}

fn is_one_or_two(z: &BigRational) -> bool {
    z.is_one() || *z == BigRational::from_integer(BigInt::from(2))
}

/// `n - 1` as an `i64` when `n` is a positive integer small enough for `factorial`.
fn factorial_argument(n: &BigInt) -> Option<i64> {
    (n - 1u32).to_i64()
}

impl GammaFunction for Rational {
    fn ln_gamma(&self, engine: &GammaEngine, px: Precision, debug: bool) -> Self {
        let z = match self {
            Self::NaN => return Self::NaN,
            Self::PosInf | Self::NegInf => return Self::PosInf,
            Self::Finite(z) => z,
        };
        if self.is_zero() {
            return self.recip();
        }
        if is_one_or_two(z) {
            return Self::zero();
        }
        let bits = engine.config().working_bits(px);
        if let Some(n) = self.to_integer() {
            if !n.is_positive() {
                return Self::PosInf;
            }
            if let Some(k) = factorial_argument(&n) {
                let exact = BigRational::from_integer(factorial(k));
                return real::ln(&exact, bits).map_or(Self::PosInf, |value| finish(value, px).into());
            }
        }
        if debug {
            debug!(z = %z, px, bits, "lgamma");
        }
        engine
            .ln_gamma_finite(z, bits, debug)
            .map_or(Self::PosInf, |value| finish(value, px).into())
    }

    fn gamma(&self, engine: &GammaEngine, px: Precision) -> Self {
        let z = match self {
            Self::NaN => return Self::NaN,
            Self::PosInf | Self::NegInf => return Self::PosInf,
            Self::Finite(z) => z,
        };
        if self.is_zero() {
            return self.recip();
        }
        if let Some(n) = self.to_integer() {
            if !n.is_positive() {
                return Self::PosInf;
            }
            // Exact, and returned without rounding.
            if let Some(k) = factorial_argument(&n) {
                return factorial(k).into();
            }
        }
        let bits = engine.config().working_bits(px);
        match engine.gamma_finite(z, bits, ExponentRange::EXACT) {
            None | Some(Scaled::Overflow) => Self::PosInf,
            Some(Scaled::Underflow) => Self::zero(),
            Some(Scaled::Finite(value)) => finish(value, px).into(),
        }
    }
}

impl GammaFunction for ComplexRational {
    fn ln_gamma(&self, engine: &GammaEngine, px: Precision, debug: bool) -> Self {
        if self.is_nan() {
            return Self::nan();
        }
        if self.is_infinite() {
            return Self::from_real(Rational::PosInf);
        }
        if self.is_zero() {
            return Self::pole();
        }
        let Some(z) = self.to_finite() else {
            return Self::nan();
        };
        if z.im.is_zero() && is_one_or_two(&z.re) {
            return Self::zero();
        }
        let bits = engine.config().working_bits(px);
        if debug {
            debug!(re = %z.re, im = %z.im, px, bits, "lgamma");
        }
        engine
            .ln_gamma_finite(&z, bits, debug)
            .map_or_else(Self::pole, |value| finish_argument(value, px).into())
    }

    fn gamma(&self, engine: &GammaEngine, px: Precision) -> Self {
        complex_gamma(self, engine, px, ExponentRange::EXACT)
    }
}

/// Γ on the complex path, with results outside `range` reported as the pole
/// marker (overflow) or zero (underflow).
fn complex_gamma(
    z: &ComplexRational,
    engine: &GammaEngine,
    px: Precision,
    range: ExponentRange,
) -> ComplexRational {
    if z.is_nan() {
        return ComplexRational::nan();
    }
    if z.is_infinite() {
        return ComplexRational::from_real(Rational::PosInf);
    }
    if z.is_zero() {
        return ComplexRational::pole();
    }
    let Some(finite) = z.to_finite() else {
        return ComplexRational::nan();
    };
    if finite.im.is_zero() && is_one_or_two(&finite.re) {
        return ComplexRational::one();
    }
    let bits = engine.config().working_bits(px);
    match engine.gamma_finite(&finite, bits, range) {
        None | Some(Scaled::Overflow) => ComplexRational::pole(),
        Some(Scaled::Underflow) => ComplexRational::zero(),
        Some(Scaled::Finite(value)) => finish_argument(value, px).into(),
    }
}

/// Evaluated through the complex path at the engine's `float_precision`; the
/// `px` argument is not used. The result is the real part, so negative
/// arguments give `ln |Γ(x)|`.
impl GammaFunction for f64 {
    fn ln_gamma(&self, engine: &GammaEngine, _px: Precision, debug: bool) -> Self {
        let z = ComplexRational::from_real(Rational::from_f64(*self));
        z.ln_gamma(engine, engine.config().float_precision, debug)
            .re
            .to_f64()
    }

    fn gamma(&self, engine: &GammaEngine, _px: Precision) -> Self {
        let z = ComplexRational::from_real(Rational::from_f64(*self));
        let px = engine.config().float_precision;
        complex_gamma(&z, engine, px, ExponentRange::F64).re.to_f64()
    }
}

/// Evaluated at the engine's `float_precision`; the `px` argument is not used.
impl GammaFunction for Complex64 {
    fn ln_gamma(&self, engine: &GammaEngine, _px: Precision, debug: bool) -> Self {
        let z = ComplexRational::from(*self);
        Complex64::from(&z.ln_gamma(engine, engine.config().float_precision, debug))
    }

    fn gamma(&self, engine: &GammaEngine, _px: Precision) -> Self {
        let z = ComplexRational::from(*self);
        let px = engine.config().float_precision;
        Complex64::from(&complex_gamma(&z, engine, px, ExponentRange::F64))
    }
}
