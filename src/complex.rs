//! Complex numbers whose parts are extended rationals.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::{Complex, Complex64};
use num_rational::BigRational;

use crate::error::GammaError;
use crate::rational::Rational;

/// `re + im*i` over [`Rational`].
///
/// The pole marker for this type is `(+inf, 0)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComplexRational {
    pub re: Rational,
    pub im: Rational,
}

impl ComplexRational {
    pub fn new(re: impl Into<Rational>, im: impl Into<Rational>) -> Self {
        Self {
            re: re.into(),
            im: im.into(),
        }
    }

    pub fn from_real(re: impl Into<Rational>) -> Self {
        Self::new(re, Rational::zero())
    }

    pub fn zero() -> Self {
        Self::new(Rational::zero(), Rational::zero())
    }

    pub fn one() -> Self {
        Self::from_real(Rational::one())
    }

    pub fn nan() -> Self {
        Self::new(Rational::NaN, Rational::NaN)
    }

    /// `(+inf, 0)`, returned where gamma has a pole.
    pub fn pole() -> Self {
        Self::from_real(Rational::PosInf)
    }

    /// Multiplies by the imaginary unit: `(a + bi) * i = -b + ai`.
    pub fn i(self) -> Self {
        Self {
            re: -self.im,
            im: self.re,
        }
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_nan() && (self.re.is_infinite() || self.im.is_infinite())
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn to_finite(&self) -> Option<Complex<BigRational>> {
        Some(Complex::new(
            self.re.as_finite()?.clone(),
            self.im.as_finite()?.clone(),
        ))
    }

    /// Rounds both parts to `width` significant bits.
    pub fn truncated(&self, width: u64) -> Self {
        Self {
            re: self.re.truncated(width),
            im: self.im.truncated(width),
        }
    }

    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -self.im.clone(),
        }
    }
}

impl From<Complex<BigRational>> for ComplexRational {
    fn from(value: Complex<BigRational>) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<Rational> for ComplexRational {
    fn from(value: Rational) -> Self {
        Self::from_real(value)
    }
}

impl From<Complex64> for ComplexRational {
    fn from(value: Complex64) -> Self {
        Self::new(Rational::from_f64(value.re), Rational::from_f64(value.im))
    }
}

impl From<&ComplexRational> for Complex64 {
    fn from(value: &ComplexRational) -> Self {
        Complex64::new(value.re.to_f64(), value.im.to_f64())
    }
}

impl TryFrom<ComplexRational> for Complex<BigRational> {
    type Error = GammaError;

    fn try_from(value: ComplexRational) -> Result<Self, Self::Error> {
        value.to_finite().ok_or(GammaError::NotFinite)
    }
}

impl fmt::Display for ComplexRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_negative() {
            write!(f, "{} - {}i", self.re, -self.im.clone())
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}

impl Neg for ComplexRational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl Add for ComplexRational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for ComplexRational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for ComplexRational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let re = self.re.clone() * rhs.re.clone() - self.im.clone() * rhs.im.clone();
        let im = self.re * rhs.im + self.im * rhs.re;
        Self { re, im }
    }
}
