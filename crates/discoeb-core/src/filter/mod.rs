//! Signal filters.

pub mod savgol;

pub use savgol::{SavgolError, savgol, savgol_coefficients};
