//! Finite values the gamma core can evaluate on.

use std::fmt::Debug;
use std::ops::Neg;

use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{Num, ToPrimitive};

use crate::elementary::{complex, real};
use crate::precision::truncate_significant;

/// A finite real or complex rational with the transcendental operations the
/// gamma core needs.
///
/// For real values `ln` is the logarithm of the magnitude, which makes the
/// log-gamma of a negative real the usual `ln |Γ(x)|`.
pub trait GammaArgument: Clone + Debug + Num + Neg<Output = Self> {
    fn from_ratio(value: BigRational) -> Self;

    fn real(&self) -> &BigRational;

    /// `|self|^2`, exactly.
    fn magnitude_squared(&self) -> BigRational;

    /// Natural logarithm to about `bits` bits, or `None` at zero.
    fn ln(&self, bits: u64) -> Option<Self>;

    fn exp(&self, bits: u64) -> Self;

    fn sin_pi(&self, bits: u64) -> Self;

    /// Rounds to `width` significant bits (componentwise for complex values).
    fn truncated(&self, width: u64) -> Self;

    /// Double-precision view for diagnostics.
    fn approx(&self) -> (f64, f64);
}

impl GammaArgument for BigRational {
    fn from_ratio(value: BigRational) -> Self {
        value
    }

    fn real(&self) -> &BigRational {
        self
    }

    fn magnitude_squared(&self) -> BigRational {
        self * self
    }

    fn ln(&self, bits: u64) -> Option<Self> {
        real::ln(self, bits)
    }

    fn exp(&self, bits: u64) -> Self {
        real::exp(self, bits)
    }

    fn sin_pi(&self, bits: u64) -> Self {
        real::sin_pi(self, bits)
    }

    fn truncated(&self, width: u64) -> Self {
        truncate_significant(self, width)
    }

    fn approx(&self) -> (f64, f64) {
        (self.to_f64().unwrap_or(f64::NAN), 0.0)
    }
}

impl GammaArgument for Complex<BigRational> {
    fn from_ratio(value: BigRational) -> Self {
        Complex::new(value, BigRational::from_integer(0.into()))
    }

    fn real(&self) -> &BigRational {
        &self.re
    }

    fn magnitude_squared(&self) -> BigRational {
        &self.re * &self.re + &self.im * &self.im
    }

    fn ln(&self, bits: u64) -> Option<Self> {
        complex::ln(self, bits)
    }

    fn exp(&self, bits: u64) -> Self {
        complex::exp(self, bits)
    }

    fn sin_pi(&self, bits: u64) -> Self {
        complex::sin_pi(self, bits)
    }

    fn truncated(&self, width: u64) -> Self {
        Complex::new(
            truncate_significant(&self.re, width),
            truncate_significant(&self.im, width),
        )
    }

    fn approx(&self) -> (f64, f64) {
        (
            self.re.to_f64().unwrap_or(f64::NAN),
            self.im.to_f64().unwrap_or(f64::NAN),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::test_utils::{assert_close_f64, rat};

    #[test]
    fn real_logarithm_ignores_sign() {
        let negative = GammaArgument::ln(&rat(-8, 1), 64).expect("nonzero");
        let positive = GammaArgument::ln(&rat(8, 1), 64).expect("nonzero");
        assert_eq!(negative, positive);
    }

    #[test]
    fn complex_logarithm_keeps_the_phase() {
        let value = Complex::new(rat(-8, 1), rat(0, 1));
        let logarithm = GammaArgument::ln(&value, 64).expect("nonzero");
        let (re, im) = logarithm.approx();
        assert_close_f64(re, 8f64.ln(), 1e-15);
        assert_close_f64(im, std::f64::consts::PI, 1e-15);
    }

    #[test]
    fn zero_has_no_logarithm() {
        assert_eq!(GammaArgument::ln(&rat(0, 1), 64), None);
        let zero = Complex::new(rat(0, 1), rat(0, 1));
        assert_eq!(GammaArgument::ln(&zero, 64), None);
    }

    #[test]
    fn magnitude_squared_is_exact() {
        let value = Complex::new(rat(3, 2), rat(-2, 1));
        assert_eq!(value.magnitude_squared(), rat(25, 4));
        assert_eq!(rat(-3, 4).magnitude_squared(), rat(9, 16));
    }

    #[test]
    fn complex_truncation_is_componentwise() {
        let value = Complex::new(rat(1, 3), rat(-1, 3));
        let truncated = GammaArgument::truncated(&value, 12);
        assert_eq!(truncated.re, -truncated.im.clone());
        assert_ne!(truncated.re, rat(1, 3));
    }
}
