//! Error types for the gamma engine.
//!
//! # Handling Numerically Degenerate Cases
//!
//! Evaluation never returns an error: poles, NaN and infinities are absorbed into
//! the sentinel values of [`Rational`](crate::Rational) and
//! [`ComplexRational`](crate::ComplexRational). Errors only arise at the edges of
//! the crate, when text is parsed, when an extended value has to become a finite
//! `BigRational`, or when an engine is configured with nonsensical parameters.
//!
//! - **`detected_would_exhaust_memory!(...)`**: Use where an exponent is so large
//!   that materialising the result would need more memory than any machine has.

use std::fmt;

/// Largest binary exponent the elementary functions will materialise.
///
/// A shift of 2^32 bits produces a number needing ~512 MB just for storage.
pub(crate) const MAX_SHIFT_BITS: u64 = 1u64 << 32;

/// Macro to flag exponents too large to be represented in memory.
///
/// # Example
///
/// ```ignore
/// detected_would_exhaust_memory!("exp argument exceeds addressable range");
/// ```
#[macro_export]
macro_rules! detected_would_exhaust_memory {
    ($msg:expr) => {
        panic!(concat!($msg, " - result would exhaust memory"))
    };
}

/// Errors raised at the boundaries of the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GammaError {
    /// A NaN or infinite value was converted into a finite representation.
    NotFinite,
    /// Text could not be parsed as a rational number.
    Parse { input: String },
    /// A configuration field holds a value the engine cannot work with.
    InvalidConfig { field: &'static str },
}

impl fmt::Display for GammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => write!(f, "value is NaN or infinite"),
            Self::Parse { input } => write!(f, "cannot parse {input:?} as a rational number"),
            Self::InvalidConfig { field } => {
                write!(f, "configuration field `{field}` must be at least 1")
            }
        }
    }
}

impl std::error::Error for GammaError {}
