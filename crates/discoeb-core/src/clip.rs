//! Softclip: a smooth clamp that keeps increasing outside the clamp range.
//!
//! Inside `[a_min, a_max]` the input passes through. Outside, the overshoot is
//! compressed logarithmically: `a_max + ln(1 + (x - a_max))` above and
//! `a_min - ln(1 + (a_min - x))` below. The map is continuous and strictly
//! increasing everywhere, unlike a hard clip.
//!
//! The bounds are not validated and nothing here panics.

#[inline]
#[must_use]
pub fn softclip(x: f64, a_min: f64, a_max: f64) -> f64 {
    if x < a_min {
        a_min - (a_min - x).ln_1p()
    } else if x > a_max {
        a_max + (x - a_max).ln_1p()
    } else {
        x
    }
}

/// [`softclip`] applied to every element; the output has the input's length.
#[must_use]
pub fn softclip_slice(xs: &[f64], a_min: f64, a_max: f64) -> Vec<f64> {
    xs.iter().map(|&x| softclip(x, a_min, a_max)).collect()
}

/// [`softclip`] over `xs`, overwriting each element.
pub fn softclip_in_place(xs: &mut [f64], a_min: f64, a_max: f64) {
    for x in xs.iter_mut() {
        *x = softclip(*x, a_min, a_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_inside_range() {
        for x in [-1.0, -0.25, 0.0, 0.5, 1.0] {
            assert_eq!(softclip(x, -1.0, 1.0), x);
        }
    }

    #[test]
    fn logarithmic_outside_range() {
        assert!((softclip(2.0, -1.0, 1.0) - (1.0 + 2.0_f64.ln())).abs() < 1e-15);
        assert!((softclip(-3.0, -1.0, 1.0) - (-1.0 - 3.0_f64.ln())).abs() < 1e-15);
    }

    #[test]
    fn strictly_increasing_across_and_outside_range() {
        let xs: Vec<f64> = (-400..=400).map(|i| f64::from(i) * 0.025).collect();
        let ys = softclip_slice(&xs, -2.0, 3.0);
        for w in ys.windows(2) {
            assert!(w[1] > w[0], "{} !> {}", w[1], w[0]);
        }
    }

    #[test]
    fn never_flat_far_from_range() {
        let hi = softclip(1e6, 0.0, 1.0);
        let higher = softclip(2e6, 0.0, 1.0);
        assert!(higher > hi);
        let lo = softclip(-1e6, 0.0, 1.0);
        let lower = softclip(-2e6, 0.0, 1.0);
        assert!(lower < lo);
    }

    #[test]
    fn in_place_matches_slice() {
        let xs = [-5.0, -0.5, 0.3, 7.0];
        let expected = softclip_slice(&xs, -1.0, 1.0);
        let mut ys = xs;
        softclip_in_place(&mut ys, -1.0, 1.0);
        assert_eq!(ys.to_vec(), expected);
    }

    #[test]
    fn reversed_bounds_do_not_panic() {
        let y = softclip(0.5, 1.0, 0.0);
        assert!(y.is_finite());
    }
}
