#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Gamma and log-gamma over exact rationals and complex rationals.
//!
//! Every evaluation takes a signed bit precision `px`: the result is rounded to
//! `px` significant bits, or left unrounded when `px` is negative. Internally the
//! engine works at `working_factor * |px|` bits (twice the request by default),
//! walks the argument up with `Γ(z + 1) = z Γ(z)` until Stirling's series is
//! accurate, and uses the reflection formula for negative real parts.
//!
//! ```
//! use rational_gamma::{lgamma, tgamma, Rational};
//!
//! let ln_24 = lgamma(&Rational::from(5), 64);
//! assert!((ln_24.to_f64() - 24f64.ln()).abs() < 1e-15);
//!
//! let root_pi = tgamma(&Rational::new(1, 2), 64);
//! assert!((root_pi.to_f64() - std::f64::consts::PI.sqrt()).abs() < 1e-15);
//! ```
//!
//! NaN, infinities and poles never raise errors; they come back as the
//! sentinel values of [`Rational`] and [`ComplexRational`].

mod argument;
mod bernoulli;
mod combinatorics;
mod complex;
mod config;
mod dispatch;
pub mod elementary;
mod error;
mod gamma;
pub mod native;
mod precision;
mod rational;
mod stirling;

#[cfg(test)]
mod test_utils;

use num_rational::BigRational;

pub use argument::GammaArgument;
pub use bernoulli::BernoulliCache;
pub use combinatorics::{binomial_coefficient, binomial_row, factorial};
pub use complex::ComplexRational;
pub use config::{GammaConfig, DEFAULT_BIAS, DEFAULT_PRECISION, DEFAULT_WORKING_FACTOR};
pub use dispatch::GammaFunction;
pub use error::GammaError;
pub use gamma::GammaEngine;
pub use precision::{epsilon, finish, truncate_significant, Precision};
pub use rational::Rational;
pub use stirling::stirling_ln_gamma;

/// lnΓ(z) to `px` bits on the shared engine.
pub fn lgamma<T: GammaFunction>(z: &T, px: Precision) -> T {
    GammaEngine::shared().ln_gamma(z, px)
}

/// [`lgamma`] with `tracing` debug events for the shifted argument and every
/// Stirling term. The numeric result is identical.
pub fn lgamma_debug<T: GammaFunction>(z: &T, px: Precision) -> T {
    GammaEngine::shared().ln_gamma_debug(z, px)
}

/// Γ(z) to `px` bits on the shared engine.
pub fn tgamma<T: GammaFunction>(z: &T, px: Precision) -> T {
    GammaEngine::shared().gamma(z, px)
}

/// The `n`-th Bernoulli number from the shared engine's cache.
pub fn bernoulli_number(n: usize) -> BigRational {
    GammaEngine::shared().bernoulli_number(n)
}
