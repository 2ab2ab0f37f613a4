//! Engine configuration.

use crate::error::GammaError;
use crate::precision::{magnitude, Precision};

/// Default minimum `|Re(u)|` before the Stirling series is applied.
pub const DEFAULT_BIAS: u32 = 16;
/// Default multiplier from requested bits to internal working bits.
pub const DEFAULT_WORKING_FACTOR: u32 = 2;
/// Default precision for callers that do not name one.
pub const DEFAULT_PRECISION: Precision = 64;

/// Tunables for [`GammaEngine`](crate::GammaEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GammaConfig {
    /// Minimum `|Re(u)|` reached by the recurrence walk.
    pub bias: u32,
    /// Working precision is `working_factor * max(|px|, 1)` bits.
    pub working_factor: u32,
    /// Precision used by [`lgamma`](crate::lgamma) and [`tgamma`](crate::tgamma)
    /// callers that take the engine default.
    pub default_precision: Precision,
    /// Precision at which `f64` arguments are evaluated before converting back.
    pub float_precision: Precision,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            bias: DEFAULT_BIAS,
            working_factor: DEFAULT_WORKING_FACTOR,
            default_precision: DEFAULT_PRECISION,
            float_precision: DEFAULT_PRECISION,
        }
    }
}

impl GammaConfig {
    pub fn with_bias(mut self, bias: u32) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_working_factor(mut self, working_factor: u32) -> Self {
        self.working_factor = working_factor;
        self
    }

    pub fn with_default_precision(mut self, default_precision: Precision) -> Self {
        self.default_precision = default_precision;
        self
    }

    pub fn with_float_precision(mut self, float_precision: Precision) -> Self {
        self.float_precision = float_precision;
        self
    }

    pub fn validate(&self) -> Result<(), GammaError> {
        if self.bias == 0 {
            return Err(GammaError::InvalidConfig { field: "bias" });
        }
        if self.working_factor == 0 {
            return Err(GammaError::InvalidConfig {
                field: "working_factor",
            });
        }
        if self.float_precision < 1 {
            return Err(GammaError::InvalidConfig {
                field: "float_precision",
            });
        }
        Ok(())
    }

    /// Internal bit width used for a requested precision `px`.
    pub fn working_bits(&self, px: Precision) -> u64 {
        u64::from(self.working_factor) * magnitude(px)
    }

    /// `|Re(u)|` the walk must reach before the series at `working_bits` is used.
    ///
    /// The smallest Stirling term shrinks like `e^(-2*pi*|u|)`, so the threshold
    /// grows with the working precision once it exceeds `8 * bias` bits.
    pub fn walk_threshold(&self, working_bits: u64) -> u64 {
        u64::from(self.bias).max(working_bits / 8)
    }
}
