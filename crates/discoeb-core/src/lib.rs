//! # discoeb-core
//!
//! Numerical utilities used by the discoeb perturbation-theory pipeline.
//!
//! - [`special`]: complex log-gamma via the Lanczos approximation.
//! - [`roots`]: fixed-iteration bisection root finding.
//! - [`clip`]: softclip, a strictly monotonic smooth clamp.
//! - [`filter`]: Savitzky-Golay smoothing.
//!
//! Every kernel here is a pure function of its inputs. Only the filter
//! validates its arguments; the scalar kernels return silently wrong values on
//! out-of-contract input so they can be mapped over whole batches.

#![deny(unsafe_code)]

pub mod clip;
pub mod filter;
pub mod roots;
pub mod special;

pub use clip::{softclip, softclip_in_place, softclip_slice};
pub use filter::{SavgolError, savgol, savgol_coefficients};
pub use num_complex::Complex64;
pub use roots::{BisectionState, Bracket, RootError, bisect, bisect_bracket, bisect_checked};
pub use special::{gamma, lngamma, lngamma_batch};
