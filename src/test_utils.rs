//! Shared test utilities for the numeric modules.
//!
//! This module provides common helper functions used across test modules to reduce
//! code duplication and provide a consistent testing interface.

use num_bigint::BigInt;
use num_complex::{Complex, Complex64};
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use crate::precision::pow2;

/// Creates a BigRational from a numerator and denominator given as i64 values.
///
/// # Examples
/// ```ignore
/// let half = rat(1, 2);
/// let minus_three = rat(-3, 1);
/// ```
pub fn rat(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Nearest double, or NaN when the value is out of range.
pub fn to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Asserts `|actual - expected| <= rel_tol * |expected|`, or `<= rel_tol` when
/// `expected` is zero.
///
/// # Panics
/// Panics with both values when the tolerance is exceeded.
pub fn assert_close_f64(actual: f64, expected: f64, rel_tol: f64) {
    let scale = if expected == 0.0 { 1.0 } else { expected.abs() };
    let error = (actual - expected).abs();
    assert!(
        error <= rel_tol * scale,
        "expected {expected}, got {actual} (error {error:e}, tolerance {:e})",
        rel_tol * scale
    );
}

/// Asserts `|actual - expected| <= 2^-bits` in exact arithmetic.
///
/// # Panics
/// Panics with both values when the tolerance is exceeded.
pub fn assert_close(actual: &BigRational, expected: &BigRational, bits: i64) {
    let error = (actual - expected).abs();
    assert!(
        error <= pow2(-bits),
        "expected {}, got {} (error ~{:e}, tolerance 2^-{bits})",
        to_f64(expected),
        to_f64(actual),
        to_f64(&error)
    );
}

/// Asserts `|actual - expected| <= rel_tol * |expected|` for complex values.
///
/// # Panics
/// Panics with both values when the tolerance is exceeded.
pub fn assert_close_c64(actual: &Complex<BigRational>, expected: Complex64, rel_tol: f64) {
    let approx = Complex64::new(to_f64(&actual.re), to_f64(&actual.im));
    let scale = if expected.norm() == 0.0 {
        1.0
    } else {
        expected.norm()
    };
    let error = (approx - expected).norm();
    assert!(
        error <= rel_tol * scale,
        "expected {expected}, got {approx} (error {error:e})"
    );
}
