//! Double-precision shortcuts backed by `libm`.
//!
//! These never touch the exact engine. They are fast and accurate to a few ulps,
//! but their last bits can differ from what [`GammaFunction`](crate::GammaFunction)
//! produces for `f64`, and their special-value conventions are the C library's:
//! `tgamma` at a negative integer is NaN here, whereas the engine reports a pole
//! as `+inf`.

/// `ln |Γ(x)|`.
pub fn lgamma(x: f64) -> f64 {
    libm::lgamma(x)
}

/// `(ln |Γ(x)|, sign of Γ(x))`.
pub fn lgamma_with_sign(x: f64) -> (f64, i32) {
    libm::lgamma_r(x)
}

pub fn tgamma(x: f64) -> f64 {
    libm::tgamma(x)
}

pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}
