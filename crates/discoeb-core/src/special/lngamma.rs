//! Complex log-gamma via the Lanczos approximation.
//!
//! Lanczos, J. SIAM Numer. Anal. Ser. B 1 (1964) 86, with `g = 7` and nine
//! coefficients. Arguments with `re(z) <= 0.5` go through the reflection
//! formula `Gamma(z) Gamma(1 - z) = pi / sin(pi z)`.

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;

/// Lanczos coefficients for `g = 7`. Index 0 is the leading term, index `k`
/// pairs with the offset `z + k`.
pub const LANCZOS_7_C: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// `ln(pi)`, kept as a literal rather than derived from `PI`.
pub const LN_PI: f64 = 1.144_729_885_849_400_2;

/// `0.5 * ln(2 pi)`.
pub const LOG_ROOT_TWO_PI: f64 = 0.918_938_533_204_672_8;

/// `ln Gamma(z)` for complex `z`.
///
/// Returns `lnr + i arg` where `lnr = ln|Gamma(z)|` and
/// `arg = arg(Gamma(z))` folded into `(-pi, pi]`. The phase loses precision
/// when `|z|` is very large because of the fold.
///
/// Non-positive integers are poles. They are not detected; the result there
/// is non-finite or meaningless.
#[must_use]
pub fn lngamma(z: Complex64) -> Complex64 {
    let w = if z.re <= 0.5 {
        LN_PI - (z * PI).sin().ln() - lngamma_lanczos(1.0 - z)
    } else {
        lngamma_lanczos(z)
    };
    Complex64::new(w.re, restrict_angle(w.im))
}

/// `Gamma(z)` for complex `z`, as `exp(lngamma(z))`.
#[must_use]
pub fn gamma(z: Complex64) -> Complex64 {
    lngamma(z).exp()
}

/// [`lngamma`] over a slice. Elements are independent of each other.
#[must_use]
pub fn lngamma_batch(zs: &[Complex64]) -> Vec<Complex64> {
    zs.iter().copied().map(lngamma).collect()
}

/// Fold an angle into `(-pi, pi]`. Non-finite input passes through.
#[must_use]
pub fn restrict_angle(theta: f64) -> f64 {
    if !theta.is_finite() {
        return theta;
    }
    let mut r = theta - TAU * (theta / TAU).round();
    if r <= -PI {
        r += TAU;
    } else if r > PI {
        r -= TAU;
    }
    r
}

/// Lanczos series for `re(z) > 0.5`.
fn lngamma_lanczos(z: Complex64) -> Complex64 {
    let z = z - 1.0;
    let mut ag = Complex64::new(LANCZOS_7_C[0], 0.0);
    for (k, c) in LANCZOS_7_C.iter().enumerate().skip(1) {
        let zk = z + k as f64;
        // c / (z + k), written without a complex division.
        ag += zk.conj() * (c / zk.norm_sqr());
    }
    let t = z + 7.5;
    (z + 0.5) * t.ln() - t + LOG_ROOT_TWO_PI + ag.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn assert_close(actual: Complex64, expected: Complex64, tol: f64) {
        assert!(
            (actual.re - expected.re).abs() <= tol,
            "re mismatch: {actual} vs {expected}"
        );
        let dim = restrict_angle(actual.im - expected.im);
        assert!(dim.abs() <= tol, "im mismatch: {actual} vs {expected}");
    }

    #[test]
    fn factorials_on_positive_integers() {
        let mut fact = 1.0_f64;
        for n in 1..=10 {
            if n > 1 {
                fact *= f64::from(n - 1);
            }
            let w = lngamma(c(f64::from(n), 0.0));
            let rel = (w.re.exp() - fact).abs() / fact;
            assert!(rel < 1e-9, "n={n}: {} vs {fact}", w.re.exp());
            assert_eq!(w.im, 0.0);
        }
    }

    #[test]
    fn half_integer_is_root_pi() {
        let w = lngamma(c(0.5, 0.0));
        assert!((w.re - 0.5 * PI.ln()).abs() < 1e-13);
        assert_eq!(w.im, 0.0);
    }

    #[test]
    fn reflection_matches_identity() {
        for z in [c(0.3, 0.2), c(-0.7, 1.1), c(0.5, -0.25), c(-2.4, 0.3)] {
            let lhs = lngamma(z) + lngamma(1.0 - z);
            let rhs = LN_PI - (z * PI).sin().ln();
            assert_close(lhs, rhs, 1e-12);
        }
    }

    #[test]
    fn negative_gamma_has_phase_pi() {
        // Gamma(-0.5) = -2 sqrt(pi)
        let w = lngamma(c(-0.5, 0.0));
        assert!((w.re - (2.0 * PI.sqrt()).ln()).abs() < 1e-12);
        assert!((w.im - PI).abs() < 1e-12);
    }

    #[test]
    fn known_complex_values() {
        assert_close(
            lngamma(c(0.3, 0.2)),
            c(0.889_408_350_573_266_7, -0.620_261_006_882_483),
            1e-12,
        );
        assert_close(
            lngamma(c(1.0, 1.0)),
            c(-0.650_923_199_301_856_4, -0.301_640_320_467_533_2),
            1e-12,
        );
        assert_close(
            lngamma(c(10.0, 20.0)),
            c(-1.702_980_443_956_511, 2.395_177_968_148_026),
            1e-11,
        );
    }

    #[test]
    fn phase_stays_in_principal_interval() {
        for z in [c(10.0, 20.0), c(0.5, 40.0), c(-3.7, -2.1), c(100.0, 0.5), c(3.0, -50.0)] {
            let w = lngamma(z);
            assert!(w.im > -PI && w.im <= PI, "{z} -> {w}");
        }
    }

    #[test]
    fn conjugate_symmetry() {
        for z in [c(2.5, 3.0), c(-1.3, 0.8), c(0.2, 4.0)] {
            assert_close(lngamma(z.conj()), lngamma(z).conj(), 1e-12);
        }
    }

    #[test]
    fn recurrence_across_branch_boundary() {
        // ln Gamma(z + 1) = ln Gamma(z) + ln z
        for z in [c(0.4, 0.3), c(-0.2, -1.5), c(0.45, 0.0)] {
            assert_close(lngamma(z + 1.0), lngamma(z) + z.ln(), 1e-12);
        }
    }

    #[test]
    fn gamma_matches_real_values() {
        assert_close(gamma(c(5.0, 0.0)), c(24.0, 0.0), 1e-10);
        let g = gamma(c(-0.5, 0.0));
        assert!((g.re + 2.0 * PI.sqrt()).abs() < 1e-12);
        assert!(g.im.abs() < 1e-12);
    }

    #[test]
    fn batch_is_elementwise() {
        let zs = [c(1.0, 0.0), c(0.3, 0.2), c(-1.5, 0.0)];
        let ws = lngamma_batch(&zs);
        assert_eq!(ws.len(), zs.len());
        for (z, w) in zs.iter().zip(&ws) {
            assert_eq!(lngamma(*z), *w);
        }
    }

    #[test]
    fn restrict_angle_folds_symmetrically() {
        assert_eq!(restrict_angle(PI), PI);
        assert_eq!(restrict_angle(-PI), PI);
        assert!((restrict_angle(3.0 * PI).abs() - PI).abs() < 1e-12);
        assert!((restrict_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert!((restrict_angle(-TAU - 0.25) + 0.25).abs() < 1e-12);
        assert_eq!(restrict_angle(1.0), 1.0);
        assert!(restrict_angle(f64::NAN).is_nan());
    }
}
