//! Root finding.

pub mod bisect;

pub use bisect::{BisectionState, Bracket, RootError, bisect, bisect_bracket, bisect_checked};
