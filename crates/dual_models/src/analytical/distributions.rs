//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: density φ
//! - `lifted_norm_cdf`: Φ promoted to dual numbers with φ as its derivative
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float` and so run directly
//! on `Dual<_>`. Differentiating the rational approximation inside
//! `norm_cdf` gives only an approximation of φ; the lifted form carries the
//! exact density instead.

use dual_core::ad::lift::{lifted::ScalarFn, Lift};
use num_traits::Float;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients, lowest order first.
const ERFC_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Abramowitz and Stegun 7.1.26 scale in `t = 1 / (1 + p|x|)`.
const ERFC_P: f64 = 0.327_591_1;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function, maximum absolute error 1.5e-7.
///
/// Only smooth operations are used, so the result is differentiable when
/// `T` is a dual number. Negative arguments use `erfc(-x) = 2 - erfc(x)`.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let abs_x = x.abs();
    let t = T::one() / (T::one() + constant::<T>(ERFC_P) * abs_x);

    // Horner, highest order first
    let poly = ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| acc * t + constant(a));

    let tail = poly * t * (-abs_x * abs_x).exp();
    if x < T::zero() {
        constant::<T>(2.0) - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2, accurate to about 1e-7.
///
/// # Examples
/// ```
/// use dual_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = constant::<T>(0.5);
    half * erfc_approx(-x / constant::<T>(std::f64::consts::SQRT_2))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(-x²/2) / √(2π)
///
/// # Examples
/// ```
/// use dual_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = constant::<T>(0.5);
    constant::<T>(FRAC_1_SQRT_2PI) * (-half * x * x).exp()
}

/// The standard normal CDF for dual numbers.
///
/// `Φ(x₀ + x₁ε) = Φ(x₀) + φ(x₀)x₁ε`. Instantiated at `X = Dual<_>` the
/// density itself is differentiated exactly, which is what second order
/// sensitivities through `Φ` rely on.
///
/// # Examples
/// ```
/// use dual_core::types::Dual;
/// use dual_models::analytical::distributions::{lifted_norm_cdf, norm_cdf, norm_pdf};
///
/// let n = lifted_norm_cdf::<f64>();
/// let y = n.apply(Dual::variable(0.3));
/// assert_eq!(y.re, norm_cdf(0.3));
/// assert_eq!(y.eps, norm_pdf(0.3));
/// ```
pub fn lifted_norm_cdf<X: Float>() -> Lift<ScalarFn<X>, ScalarFn<X>> {
    Lift::new(norm_cdf::<X> as ScalarFn<X>, norm_pdf::<X> as ScalarFn<X>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dual_core::ad::{derivative, second_derivative};
    use dual_core::types::Dual;

    fn grid(lo: i32, hi: i32, step: f64) -> Vec<f64> {
        (lo..=hi).map(|i| i as f64 * step).collect()
    }

    // ==========================================================
    // norm_cdf
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-0.05_f64), 0.48006119416162751, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_monotonic_and_bounded() {
        let xs = grid(-50, 50, 0.1);
        for pair in xs.windows(2) {
            let (a, b) = (norm_cdf(pair[0]), norm_cdf(pair[1]));
            assert!(b > a, "CDF not monotonic at x = {}", pair[0]);
            assert!((0.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_pdf_symmetric_and_peaked() {
        let peak = norm_pdf(0.0_f64);
        for x in [0.1, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-15);
            assert!(peak > norm_pdf(x));
        }
        assert!(norm_pdf(8.0_f64) < 1e-12);
    }

    #[test]
    fn test_numerical_derivative_of_cdf_is_pdf() {
        // step chosen above the approximation error
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let fd = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(fd, norm_pdf(x), epsilon = 1e-4);
        }
    }

    // ==========================================================
    // Dual evaluation
    // ==========================================================

    #[test]
    fn test_generic_cdf_on_duals_approximates_pdf() {
        for x in [-1.5, -0.3, 0.4, 1.2] {
            let y = norm_cdf(Dual::variable(x));
            assert_relative_eq!(y.re, norm_cdf(x), epsilon = 1e-15);
            assert_relative_eq!(y.eps, norm_pdf(x), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_lifted_cdf_carries_exact_pdf() {
        let n = lifted_norm_cdf::<f64>();
        for x in grid(-30, 30, 0.1) {
            let y = n.apply(Dual::variable(x));
            assert_eq!(y.re, norm_cdf(x));
            assert_eq!(y.eps, norm_pdf(x));
        }
    }

    #[test]
    fn test_derivative_of_lifted_cdf() {
        let d = derivative(|x: Dual<f64>| lifted_norm_cdf::<f64>().apply(x));
        assert_eq!(d(0.0), norm_pdf(0.0));
    }

    #[test]
    fn test_second_derivative_of_lifted_cdf() {
        // Φ'' = φ' = -x φ(x)
        let d2 = second_derivative(|x: Dual<Dual<f64>>| lifted_norm_cdf::<Dual<f64>>().apply(x));
        for x in [-2.0, -0.5, 0.0, 0.7, 1.9] {
            assert_relative_eq!(d2(x), -x * norm_pdf(x), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_pdf_on_duals_differentiates_exactly() {
        for x in [-1.0, 0.25, 2.0] {
            let y = norm_pdf(Dual::variable(x));
            assert_relative_eq!(y.eps, -x * norm_pdf(x), epsilon = 1e-15);
        }
    }
}
