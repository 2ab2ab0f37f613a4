//! Transcendental functions over exact rationals.
//!
//! This module contains the collaborators the gamma core leans on:
//! - `fixed`: fixed-point series kernels (Machin pi, ln 2, exp, atanh, atan, sin/cos)
//! - `real`: `BigRational` functions with exact argument reduction for `sin(pi*x)`
//! - `complex`: principal-branch functions over `Complex<BigRational>`

pub mod complex;
mod fixed;
pub mod real;
