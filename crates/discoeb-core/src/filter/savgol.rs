//! Savitzky-Golay smoothing.
//!
//! The kernel is the least-squares fit of a degree-`polyorder` polynomial on
//! `window_length` equispaced nodes over `[-1, 1]`, evaluated at the centre
//! node. Filtering is a plain correlation of that fixed kernel with the input;
//! the first and last `window_length / 2` outputs are left at zero.

use thiserror::Error;

/// Argument errors, reported before any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SavgolError {
    #[error("window_length must be odd, got {window_length}")]
    EvenWindow { window_length: usize },
    #[error(
        "window_length {window_length} is too small for polynomial order {polyorder} (need at least polyorder + 2)"
    )]
    WindowTooSmall {
        window_length: usize,
        polyorder: usize,
    },
    #[error("window_length {window_length} is too large for input of length {len}")]
    WindowTooLarge { window_length: usize, len: usize },
    #[error("polyorder {polyorder} is too large for window_length {window_length}")]
    PolyorderTooLarge {
        window_length: usize,
        polyorder: usize,
    },
    #[error("polyorder must be at least 1, got {polyorder}")]
    PolyorderTooSmall { polyorder: usize },
    #[error("least-squares system for window_length {window_length}, polyorder {polyorder} is singular")]
    SingularFit {
        window_length: usize,
        polyorder: usize,
    },
}

impl SavgolError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EvenWindow { .. } => "even_window",
            Self::WindowTooSmall { .. } => "window_too_small",
            Self::WindowTooLarge { .. } => "window_too_large",
            Self::PolyorderTooLarge { .. } => "polyorder_too_large",
            Self::PolyorderTooSmall { .. } => "polyorder_too_small",
            Self::SingularFit { .. } => "singular_fit",
        }
    }
}

/// Smooth `y` with a Savitzky-Golay filter.
///
/// Returns a vector of `y.len()` values. Entries closer than
/// `window_length / 2` to either end are `0.0`.
pub fn savgol(y: &[f64], window_length: usize, polyorder: usize) -> Result<Vec<f64>, SavgolError> {
    validate(window_length, polyorder, Some(y.len()))?;
    let kernel = kernel(window_length, polyorder)?;

    let half = window_length / 2;
    let mut out = vec![0.0; y.len()];
    for (i, slot) in out
        .iter_mut()
        .enumerate()
        .take(y.len() - half)
        .skip(half)
    {
        let window = &y[i - half..=i + half];
        *slot = kernel.iter().zip(window).map(|(c, v)| c * v).sum();
    }
    Ok(out)
}

/// The smoothing kernel for `window_length` and `polyorder`.
///
/// Applies every check of [`savgol`] except the one against the input length.
pub fn savgol_coefficients(window_length: usize, polyorder: usize) -> Result<Vec<f64>, SavgolError> {
    validate(window_length, polyorder, None)?;
    kernel(window_length, polyorder)
}

fn validate(window_length: usize, polyorder: usize, len: Option<usize>) -> Result<(), SavgolError> {
    if window_length % 2 == 0 {
        return Err(SavgolError::EvenWindow { window_length });
    }
    if polyorder.checked_add(2).is_none_or(|min| window_length < min) {
        return Err(SavgolError::WindowTooSmall {
            window_length,
            polyorder,
        });
    }
    if let Some(len) = len
        && window_length > len
    {
        return Err(SavgolError::WindowTooLarge { window_length, len });
    }
    if polyorder > window_length {
        return Err(SavgolError::PolyorderTooLarge {
            window_length,
            polyorder,
        });
    }
    if polyorder < 1 {
        return Err(SavgolError::PolyorderTooSmall { polyorder });
    }
    Ok(())
}

fn kernel(window_length: usize, polyorder: usize) -> Result<Vec<f64>, SavgolError> {
    let nodes = linspace(-1.0, 1.0, window_length);
    let terms = polyorder + 1;

    // Normal equations (A^T A) with A[j][k] = x_j^k. The fitted value at the
    // centre is the constant coefficient, i.e. row 0 of (A^T A)^-1 A^T.
    let mut moments = vec![0.0; 2 * terms - 1];
    for &x in &nodes {
        let mut p = 1.0;
        for m in &mut moments {
            *m += p;
            p *= x;
        }
    }
    let gram: Vec<Vec<f64>> = (0..terms)
        .map(|a| (0..terms).map(|b| moments[a + b]).collect())
        .collect();
    let mut e0 = vec![0.0; terms];
    e0[0] = 1.0;

    let v = solve(gram, e0).ok_or(SavgolError::SingularFit {
        window_length,
        polyorder,
    })?;

    Ok(nodes
        .iter()
        .map(|&x| v.iter().rev().fold(0.0, |acc, &vk| acc * x + vk))
        .collect())
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut xs: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            xs[n - 1] = stop;
            xs
        }
    }
}

/// Gaussian elimination with partial pivoting. `None` on a zero pivot.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col] == 0.0 || !a[pivot][col].is_finite() {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_window_is_rejected() {
        let y = [0.0; 16];
        assert_eq!(
            savgol(&y, 4, 2),
            Err(SavgolError::EvenWindow { window_length: 4 })
        );
    }

    #[test]
    fn window_must_exceed_polyorder_by_two() {
        let y = [0.0; 16];
        let err = savgol(&y, 5, 5).unwrap_err();
        assert_eq!(err.code(), "window_too_small");
        assert!(savgol(&y, 5, 4).is_err());
        assert!(savgol(&y, 5, 3).is_ok());
    }

    #[test]
    fn huge_polyorder_is_window_too_small() {
        let y = [0.0; 8];
        assert_eq!(
            savgol(&y, 3, usize::MAX),
            Err(SavgolError::WindowTooSmall {
                window_length: 3,
                polyorder: usize::MAX,
            })
        );
        assert_eq!(
            savgol_coefficients(7, usize::MAX - 1).unwrap_err().code(),
            "window_too_small"
        );
    }

    #[test]
    fn window_larger_than_input_is_rejected() {
        let y = [1.0; 4];
        assert_eq!(
            savgol(&y, 5, 2),
            Err(SavgolError::WindowTooLarge {
                window_length: 5,
                len: 4
            })
        );
    }

    #[test]
    fn zero_polyorder_is_rejected() {
        let y = [1.0; 8];
        assert_eq!(
            savgol(&y, 3, 0),
            Err(SavgolError::PolyorderTooSmall { polyorder: 0 })
        );
    }

    #[test]
    fn checks_run_in_documented_order() {
        // Even window wins over every later check.
        let err = savgol(&[0.0; 2], 4, 0).unwrap_err();
        assert_eq!(err.code(), "even_window");
        // Too small for the order wins over too large for the input.
        let err = savgol(&[0.0; 2], 3, 2).unwrap_err();
        assert_eq!(err.code(), "window_too_small");
    }

    #[test]
    fn quadratic_five_point_kernel() {
        let c = savgol_coefficients(5, 2).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0].map(|v| v / 35.0);
        for (a, e) in c.iter().zip(expected) {
            assert!((a - e).abs() < 1e-13, "{c:?}");
        }
    }

    #[test]
    fn kernel_sums_to_one_and_is_symmetric() {
        for (w, p) in [(7, 1), (9, 3), (11, 4), (15, 4)] {
            let c = savgol_coefficients(w, p).unwrap();
            assert_eq!(c.len(), w);
            let sum: f64 = c.iter().sum();
            assert!((sum - 1.0).abs() < 1e-10, "w={w} p={p} sum={sum}");
            for i in 0..w {
                assert!((c[i] - c[w - 1 - i]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn preserves_polynomials_in_interior_and_zeroes_edges() {
        let y: Vec<f64> = (0..20)
            .map(|i| {
                let t = f64::from(i);
                0.5 * t * t - 3.0 * t + 1.0
            })
            .collect();
        let out = savgol(&y, 7, 2).unwrap();
        assert_eq!(out.len(), y.len());
        assert_eq!(&out[..3], &[0.0; 3]);
        assert_eq!(&out[17..], &[0.0; 3]);
        for i in 3..17 {
            assert!((out[i] - y[i]).abs() < 1e-9, "i={i}: {} vs {}", out[i], y[i]);
        }
    }

    #[test]
    fn window_equal_to_input_smooths_single_point() {
        let y = [1.0, 2.0, 4.0, 2.0, 1.0];
        let out = savgol(&y, 5, 2).unwrap();
        let expected = (-3.0 + 24.0 + 68.0 + 24.0 - 3.0) / 35.0;
        assert_eq!(out[0], 0.0);
        assert!((out[2] - expected).abs() < 1e-13);
        assert_eq!(out[4], 0.0);
    }

    #[test]
    fn singular_system_is_reported() {
        let err = solve(vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![1.0, 0.0]);
        assert!(err.is_none());
    }
}
