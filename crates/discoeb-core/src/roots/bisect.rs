//! Fixed-iteration bisection.
//!
//! Every call performs exactly `numit` halvings and `2 * numit` objective
//! evaluations regardless of the objective, so a batch of solves does the same
//! amount of work per element. There is no tolerance-based early exit.

use thiserror::Error;

/// Failure reported by [`bisect_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RootError {
    #[error("invalid interval [{left}, {right}]")]
    InvalidInterval { left: f64, right: f64 },
    #[error("interval does not bracket a root: f(left) = {f_left}, f(right) = {f_right}")]
    NotBracketed { f_left: f64, f_right: f64 },
}

impl RootError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInterval { .. } => "invalid_interval",
            Self::NotBracketed { .. } => "not_bracketed",
        }
    }
}

/// A closed interval `[left, right]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub left: f64,
    pub right: f64,
}

impl Bracket {
    #[must_use]
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }
}

/// Bracket plus the caller's parameter, advanced one halving at a time.
#[derive(Debug)]
pub struct BisectionState<'p, P: ?Sized> {
    left: f64,
    right: f64,
    param: &'p P,
}

impl<'p, P: ?Sized> BisectionState<'p, P> {
    #[must_use]
    pub fn new(left: f64, right: f64, param: &'p P) -> Self {
        Self { left, right, param }
    }

    /// Halve the bracket once.
    ///
    /// The left half is discarded when `f(mid)` and `f(left)` share a strict
    /// sign; otherwise the right half is discarded. `f(left)` is evaluated
    /// fresh on every step.
    pub fn step<F>(&mut self, func: F)
    where
        F: Fn(f64, &P) -> f64,
    {
        let mid = 0.5 * (self.left + self.right);
        if func(mid, self.param) * func(self.left, self.param) > 0.0 {
            self.left = mid;
        } else {
            self.right = mid;
        }
    }

    #[must_use]
    pub fn bracket(&self) -> Bracket {
        Bracket::new(self.left, self.right)
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.bracket().midpoint()
    }

    #[must_use]
    pub fn param(&self) -> &'p P {
        self.param
    }
}

/// Run `numit` bisection steps and return the final bracket.
pub fn bisect_bracket<P, F>(func: F, xleft: f64, xright: f64, numit: usize, param: &P) -> Bracket
where
    P: ?Sized,
    F: Fn(f64, &P) -> f64,
{
    let mut state = BisectionState::new(xleft, xright, param);
    for _ in 0..numit {
        state.step(&func);
    }
    state.bracket()
}

/// Approximate a root of `func(., param)` in `[xleft, xright]`.
///
/// Returns the midpoint of the bracket left after exactly `numit` halvings.
/// The caller guarantees that `func` changes sign across the interval; this is
/// not checked, and a non-bracketing interval yields a meaningless point.
/// Use [`bisect_checked`] when the guarantee cannot be made.
pub fn bisect<P, F>(func: F, xleft: f64, xright: f64, numit: usize, param: &P) -> f64
where
    P: ?Sized,
    F: Fn(f64, &P) -> f64,
{
    bisect_bracket(func, xleft, xright, numit, param).midpoint()
}

/// [`bisect`] behind a bracket check.
///
/// Rejects non-finite or reversed endpoints and intervals where `func` has the
/// same strict sign at both ends. An endpoint that is exactly a root passes.
pub fn bisect_checked<P, F>(
    func: F,
    xleft: f64,
    xright: f64,
    numit: usize,
    param: &P,
) -> Result<f64, RootError>
where
    P: ?Sized,
    F: Fn(f64, &P) -> f64,
{
    if !xleft.is_finite() || !xright.is_finite() || xleft > xright {
        return Err(RootError::InvalidInterval {
            left: xleft,
            right: xright,
        });
    }
    let f_left = func(xleft, param);
    let f_right = func(xright, param);
    if f_left * f_right > 0.0 || f_left.is_nan() || f_right.is_nan() {
        return Err(RootError::NotBracketed { f_left, f_right });
    }
    Ok(bisect(func, xleft, xright, numit, param))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn shifted_square(x: f64, c: &f64) -> f64 {
        x * x - c
    }

    #[test]
    fn sqrt_two_after_forty_steps() {
        let root = bisect(shifted_square, 0.0, 2.0, 40, &2.0);
        assert!((root - 2.0_f64.sqrt()).abs() <= 2.0 * 2.0_f64.powi(-40));
    }

    #[test]
    fn zero_iterations_returns_midpoint() {
        assert_eq!(bisect(shifted_square, 1.0, 3.0, 0, &2.0), 2.0);
    }

    #[test]
    fn width_halves_exactly_per_step() {
        let objectives: [fn(f64, &()) -> f64; 3] = [
            |x: f64, _: &()| x - 0.3,
            |x: f64, _: &()| (x - 0.7).powi(3),
            |x: f64, _: &()| (5.0 * x).tanh() - 0.1,
        ];
        for f in objectives {
            for numit in [1_usize, 7, 20] {
                let b = bisect_bracket(f, -1.0, 1.0, numit, &());
                let expected = 2.0 / 2.0_f64.powi(numit as i32);
                assert_eq!(b.width(), expected, "numit={numit}");
            }
        }
    }

    #[test]
    fn evaluates_objective_twice_per_step() {
        let calls = Cell::new(0_usize);
        let f = |x: f64, _: &()| {
            calls.set(calls.get() + 1);
            x - 0.25
        };
        let _ = bisect(f, 0.0, 1.0, 13, &());
        assert_eq!(calls.get(), 26);
    }

    #[test]
    fn param_is_passed_through_unchanged() {
        let coeffs = vec![-6.0, 1.0, 1.0]; // (x + 3)(x - 2)
        let f = |x: f64, c: &[f64]| c.iter().rev().fold(0.0, |acc, &k| acc * x + k);
        let root = bisect(f, 0.0, 5.0, 50, coeffs.as_slice());
        assert!((root - 2.0).abs() < 1e-12);
    }

    #[test]
    fn decreasing_objective_converges() {
        let root = bisect(|x: f64, _: &()| 1.0 - x, 0.0, 4.0, 45, &());
        assert!((root - 1.0).abs() < 1e-12);
    }

    #[test]
    fn state_steps_match_free_function() {
        let mut state = BisectionState::new(0.0, 2.0, &2.0);
        for _ in 0..10 {
            state.step(shifted_square);
        }
        assert_eq!(state.midpoint(), bisect(shifted_square, 0.0, 2.0, 10, &2.0));
        assert_eq!(*state.param(), 2.0);
        assert!(state.bracket().left <= state.bracket().right);
    }

    #[test]
    fn unchecked_accepts_non_bracketing_interval() {
        // Both ends positive: the bracket collapses onto the right end.
        let x = bisect(shifted_square, 2.0, 3.0, 30, &2.0);
        assert!((x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn checked_rejects_same_sign_ends() {
        let err = bisect_checked(shifted_square, 2.0, 3.0, 30, &2.0).unwrap_err();
        assert!(matches!(err, RootError::NotBracketed { .. }));
        assert_eq!(err.code(), "not_bracketed");
    }

    #[test]
    fn checked_rejects_reversed_and_non_finite_intervals() {
        assert!(matches!(
            bisect_checked(shifted_square, 2.0, 0.0, 10, &2.0),
            Err(RootError::InvalidInterval { .. })
        ));
        assert!(matches!(
            bisect_checked(shifted_square, f64::NEG_INFINITY, 2.0, 10, &2.0),
            Err(RootError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn checked_rejects_nan_at_an_endpoint() {
        let sqrt_minus_one = |x: f64, _: &()| x.sqrt() - 1.0;
        match bisect_checked(sqrt_minus_one, -1.0, 4.0, 20, &()) {
            Err(RootError::NotBracketed { f_left, f_right }) => {
                assert!(f_left.is_nan());
                assert_eq!(f_right, 1.0);
            }
            other => panic!("expected NotBracketed, got {other:?}"),
        }
        let nan_right = |x: f64, _: &()| if x > 1.0 { f64::NAN } else { x - 0.5 };
        assert_eq!(
            bisect_checked(nan_right, 0.0, 2.0, 20, &()).map_err(|e| e.code()),
            Err("not_bracketed")
        );
    }

    #[test]
    fn checked_accepts_root_on_endpoint() {
        let x = bisect_checked(shifted_square, 2.0, 3.0, 5, &4.0);
        assert!(x.is_ok());
    }

    #[test]
    fn checked_matches_unchecked_on_valid_bracket() {
        let a = bisect_checked(shifted_square, 0.0, 2.0, 40, &2.0).unwrap();
        assert_eq!(a, bisect(shifted_square, 0.0, 2.0, 40, &2.0));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = RootError::InvalidInterval {
            left: 1.0,
            right: 0.0,
        };
        assert_eq!(err.to_string(), "invalid interval [1, 0]");
    }
}
