//! Special functions.
//!
//! Complex log-gamma and the helpers built on top of it.

pub mod lngamma;

pub use lngamma::{
    LANCZOS_7_C, LN_PI, LOG_ROOT_TWO_PI, gamma, lngamma, lngamma_batch, restrict_angle,
};
