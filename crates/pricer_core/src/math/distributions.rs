//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Both functions are generic over `T: Float` so the kernel can be
//! instantiated with `f32` for compact sweeps or `f64` for reporting.

use num_traits::Float;

/// 1 / sqrt(2)
const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Upper tail of the standard normal, `1 - Φ(|x|)`, for non-negative input.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) for erfc,
/// evaluated with Horner's method. Maximum error of erfc is 1.5e-7, which
/// halves to 7.5e-8 on the normal tail.
#[inline]
fn upper_tail<T: Float>(abs_x: T) -> T {
    let one = T::one();
    let half = T::from(0.5).unwrap();

    // Abramowitz and Stegun constants (7.1.26)
    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    // erfc argument z = |x| / sqrt(2)
    let z = abs_x * T::from(FRAC_1_SQRT_2).unwrap();
    let t = one / (one + p * z);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));

    // 1 - Φ(|x|) = erfc(z) / 2
    half * t * poly * (-z * z).exp()
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// The approximation is evaluated on `|x|` and reflected with
/// Φ(x) = 1 − Φ(−x) for negative inputs, so the symmetry is built in and
/// the result stays inside [0, 1] for every finite input.
///
/// # Accuracy
/// Absolute error below 1e-7 for all finite x.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let tail = upper_tail(x.abs());
    if x < T::zero() {
        tail
    } else {
        T::one() - tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        let test_values = [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for x in test_values {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(0.5_f64), 0.6914624612740131, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        let cdf_large_pos = norm_cdf(8.0_f64);
        assert!(cdf_large_pos > 0.999999);
        assert!(cdf_large_pos <= 1.0);

        let cdf_large_neg = norm_cdf(-8.0_f64);
        assert!(cdf_large_neg < 0.000001);
        assert!(cdf_large_neg >= 0.0);

        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    #[test]
    fn test_norm_cdf_bounds() {
        for i in -100..=100 {
            let x = i as f64 * 0.1;
            let result = norm_cdf(x);
            assert!((0.0..=1.0).contains(&result), "CDF out of range at x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_f32_compatibility() {
        let result = norm_cdf(0.0_f32);
        assert!((result - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(3.0_f64), 0.004431848411938008, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_pdf_approaches_zero() {
        assert!(norm_pdf(5.0_f64) < 1e-5);
        assert!(norm_pdf(8.0_f64) < 1e-12);
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Central difference of the CDF tracks the density
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), epsilon = 1e-3);
        }
    }
}
