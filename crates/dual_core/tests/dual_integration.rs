//! Integration tests for dual numbers and the derivative operators.
//!
//! Exercises the public API end to end: arithmetic on literals, generic
//! functions evaluated on duals, lifting, and cross-checks against
//! num-dual's `Dual64` when `num-dual-mode` is enabled.

use approx::assert_relative_eq;
use dual_core::ad::{derivative, lift, lifted, second_derivative, Derivative};
use dual_core::traits::Float;
use dual_core::types::{inv, Dual, DualNumber};
use num_traits::One;

/// Test that DualNumber type alias is accessible.
#[test]
fn test_dual_number_type_accessible() {
    let dual = DualNumber::new(3.0, 1.0);
    assert_eq!(dual.re, 3.0);
    assert_eq!(dual.eps, 1.0);
    assert_eq!(dual.real(), 3.0);
    assert_eq!(dual.infinitesimal(), 1.0);
}

/// Test arithmetic on literal duals.
#[test]
fn test_literal_arithmetic() {
    let a = Dual::new(1.0, 2.0);
    let b = Dual::new(3.0, 4.0);

    assert_eq!(a + b, Dual::new(4.0, 6.0));
    assert_eq!(a - b, Dual::new(-2.0, -2.0));
    assert_eq!(a * b, Dual::new(3.0, 10.0));
    assert_eq!(a / b, a * inv(b));
}

/// Test chain rule through generic code.
#[test]
fn test_dual_number_chain_rule() {
    // f(x) = exp(x^2), f'(x) = 2x * exp(x^2)
    let x = DualNumber::new(1.0, 1.0);
    let result = (x * x).exp();

    let e = 1.0_f64.exp();
    assert_relative_eq!(result.re, e, epsilon = 1e-10);
    assert_relative_eq!(result.eps, 2.0 * e, epsilon = 1e-10);
}

/// Test composition of multiple operations.
#[test]
fn test_dual_number_complex_expression() {
    // f(x) = (x + 1) * ln(x), f'(x) = ln(x) + (x+1)/x
    let x = DualNumber::new(2.0, 1.0);
    let result = (x + 1.0) * x.ln();

    let ln_2 = 2.0_f64.ln();
    assert_relative_eq!(result.re, 3.0 * ln_2, epsilon = 1e-10);
    assert_relative_eq!(result.eps, ln_2 + 1.5, epsilon = 1e-10);
}

/// Test that DualNumber correctly handles derivative with respect to second variable.
#[test]
fn test_dual_number_derivative_wrt_second_var() {
    // f(x, y) = x * y^2, df/dy = 2xy
    let x = DualNumber::new(3.0, 0.0);
    let y = DualNumber::new(2.0, 1.0);

    let result = x * y * y;

    assert_relative_eq!(result.re, 12.0, epsilon = 1e-10);
    assert_relative_eq!(result.eps, 12.0, epsilon = 1e-10);
}

/// Test the derivative operator on a lifted function.
#[test]
fn test_derivative_of_lift() {
    let sq = lift(|x: f64| x * x, |x: f64| 2.0 * x);
    let d = derivative(|x| sq.apply(x));
    assert_eq!(d(3.0), 6.0);
}

/// Test lifted ln/exp against the Float implementations.
#[test]
fn test_lifted_ln_of_quotient() {
    // ln(k/f) with k = 100, f = 100: derivative -1/f
    let k = 100.0_f64;
    let f = Dual::variable(100.0);
    let y = lifted::ln::<f64>().apply(k / f);
    assert_relative_eq!(y.re, 0.0, epsilon = 1e-15);
    assert_relative_eq!(y.eps, -0.01, epsilon = 1e-15);
}

/// Test second derivatives of a rational function.
#[test]
fn test_second_derivative_rational() {
    // f(x) = 1 / (1 + x²), f''(x) = (6x² - 2) / (1 + x²)³
    let d2 = second_derivative(|x: Dual<Dual<f64>>| {
        let one = Dual::<Dual<f64>>::one();
        (x * x + one).recip()
    });
    for x in [-1.5_f64, -0.2, 0.0, 0.7, 2.0] {
        let expected = (6.0 * x * x - 2.0) / (1.0 + x * x).powi(3);
        assert_relative_eq!(d2(x), expected, epsilon = 1e-12);
    }
}

/// Test the f32 instantiation of the whole stack.
#[test]
fn test_f32_stack() {
    let d = Derivative::new(|x: Dual<f32>| x.sin() * x.cos());
    // (sin x cos x)' = cos 2x
    assert_relative_eq!(d.eval(0.4_f32), (0.8_f32).cos(), epsilon = 1e-6);
}

/// Test division by a zero real part propagates non-finite values.
#[test]
fn test_division_by_zero_real_part() {
    let q = Dual::new(1.0_f64, 1.0) / Dual::new(0.0, 1.0);
    assert!(!q.is_finite());
}

#[cfg(feature = "num-dual-mode")]
mod num_dual_cross_checks {
    use super::*;
    use dual_core::types::verification::agrees_with;
    use num_dual::DualNum;

    /// Test derivative operator agrees with num-dual on a composite function.
    #[test]
    fn test_derivative_agrees_with_num_dual() {
        let x0 = 1.3_f64;
        let ours = Dual::variable(x0);
        let theirs = num_dual::Dual64::new(x0, 1.0);

        let f_ours = (ours.sin() * ours.exp()).sqrt();
        let f_theirs = (theirs.sin() * theirs.exp()).sqrt();

        assert!(agrees_with(f_ours, f_theirs, 1e-13));
    }

    /// Test powf against num-dual.
    #[test]
    fn test_powf_agrees_with_num_dual() {
        let ours = Dual::variable(3.0_f64).powf(Dual::constant(2.5));
        let theirs = num_dual::Dual64::new(3.0, 1.0).powf(2.5);
        assert!(agrees_with(ours, theirs, 1e-12));
    }
}
