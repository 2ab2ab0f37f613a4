//! Extended rationals: exact `BigRational` values plus the IEEE-style specials.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::GammaError;
use crate::precision::truncate_significant;

/// An exact rational number or one of the special values `-inf`, `+inf`, `NaN`.
///
/// Structural equality is used throughout, so `NaN == NaN` holds; this makes
/// special results easy to assert on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rational {
    NegInf,
    Finite(BigRational),
    PosInf,
    NaN,
}

impl Rational {
    /// `numer / denom`; a zero denominator yields a signed infinity, or NaN for `0/0`.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        let numer = numer.into();
        let denom = denom.into();
        if denom.is_zero() {
            return if numer.is_zero() {
                Self::NaN
            } else {
                Self::infinity(numer.is_negative())
            };
        }
        Self::Finite(BigRational::new(numer, denom))
    }

    pub fn zero() -> Self {
        Self::Finite(BigRational::zero())
    }

    pub fn one() -> Self {
        Self::Finite(BigRational::one())
    }

    pub(crate) fn infinity(negative: bool) -> Self {
        if negative {
            Self::NegInf
        } else {
            Self::PosInf
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(value) if value.is_zero())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::PosInf | Self::NegInf)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// True for `-inf` and negative finite values.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::NegInf => true,
            Self::Finite(value) => value.is_negative(),
            Self::PosInf | Self::NaN => false,
        }
    }

    pub fn as_finite(&self) -> Option<&BigRational> {
        match self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }

    /// The integer value, when this is a finite integer.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.as_finite()
            .filter(|value| value.is_integer())
            .map(|value| value.numer().clone())
    }

    /// `1/x`, mapping zero to the `+inf` pole marker and infinities to zero.
    pub fn recip(&self) -> Self {
        match self {
            Self::Finite(value) if value.is_zero() => Self::PosInf,
            Self::Finite(value) => Self::Finite(value.recip()),
            Self::PosInf | Self::NegInf => Self::zero(),
            Self::NaN => Self::NaN,
        }
    }

    /// Rounds a finite value to `width` significant bits; specials are returned as-is.
    pub fn truncated(&self, width: u64) -> Self {
        match self {
            Self::Finite(value) => Self::Finite(truncate_significant(value, width)),
            special => special.clone(),
        }
    }

    /// Exact conversion: every finite double is a dyadic rational.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::NaN;
        }
        if value.is_infinite() {
            return Self::infinity(value.is_sign_negative());
        }
        BigRational::from_float(value).map_or(Self::NaN, Self::Finite)
    }

    /// Nearest double; values beyond the double range saturate to infinity.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::NegInf => f64::NEG_INFINITY,
            Self::PosInf => f64::INFINITY,
            Self::NaN => f64::NAN,
            Self::Finite(value) => value.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self::Finite(value)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::Finite(BigRational::from_integer(value))
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl TryFrom<Rational> for BigRational {
    type Error = GammaError;

    fn try_from(value: Rational) -> Result<Self, Self::Error> {
        match value {
            Rational::Finite(inner) => Ok(inner),
            _ => Err(GammaError::NotFinite),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegInf => write!(f, "-inf"),
            Self::Finite(value) => write!(f, "{value}"),
            Self::PosInf => write!(f, "inf"),
            Self::NaN => write!(f, "NaN"),
        }
    }
}

impl FromStr for Rational {
    type Err = GammaError;

    /// Accepts `p`, `p/q`, decimals such as `-1.25`, `inf`, `-inf` and `nan`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let parse_error = || GammaError::Parse {
            input: text.to_string(),
        };
        match trimmed.to_ascii_lowercase().as_str() {
            "inf" | "+inf" | "infinity" | "+infinity" => return Ok(Self::PosInf),
            "-inf" | "-infinity" => return Ok(Self::NegInf),
            "nan" => return Ok(Self::NaN),
            _ => {}
        }

        if let Some((numer, denom)) = trimmed.split_once('/') {
            let numer: BigInt = numer.trim().parse().map_err(|_| parse_error())?;
            let denom: BigInt = denom.trim().parse().map_err(|_| parse_error())?;
            if denom.is_zero() {
                return Err(parse_error());
            }
            return Ok(Self::Finite(BigRational::new(numer, denom)));
        }

        if let Some((whole, fraction)) = trimmed.split_once('.') {
            let (negative, whole) = match whole.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, whole.strip_prefix('+').unwrap_or(whole)),
            };
            let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
            if (whole.is_empty() && fraction.is_empty())
                || !digits_only(whole)
                || !digits_only(fraction)
            {
                return Err(parse_error());
            }
            let digits: BigInt = format!("{whole}{fraction}")
                .parse()
                .map_err(|_| parse_error())?;
            let scale = num_traits::pow(BigInt::from(10), fraction.len());
            let magnitude = BigRational::new(digits, scale);
            return Ok(Self::Finite(if negative { -magnitude } else { magnitude }));
        }

        let integer: BigInt = trimmed.parse().map_err(|_| parse_error())?;
        Ok(Self::from(integer))
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::NegInf => Self::PosInf,
            Self::Finite(value) => Self::Finite(-value),
            Self::PosInf => Self::NegInf,
            Self::NaN => Self::NaN,
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (Self::PosInf, Self::NegInf) | (Self::NegInf, Self::PosInf) => Self::NaN,
            (inf @ (Self::PosInf | Self::NegInf), _) | (_, inf @ (Self::PosInf | Self::NegInf)) => {
                inf
            }
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
        }
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a * b),
            (a, b) => {
                if a.is_zero() || b.is_zero() {
                    Self::NaN
                } else {
                    Self::infinity(a.is_negative() != b.is_negative())
                }
            }
        }
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::NaN, _) | (_, Self::NaN) => Self::NaN,
            (Self::Finite(a), Self::Finite(b)) => {
                if !b.is_zero() {
                    Self::Finite(a / b)
                } else if a.is_zero() {
                    Self::NaN
                } else {
                    Self::infinity(a.is_negative())
                }
            }
            (Self::Finite(_), _) => Self::zero(),
            (a, Self::Finite(b)) => Self::infinity(a.is_negative() != b.is_negative()),
            _ => Self::NaN,
        }
    }
}
