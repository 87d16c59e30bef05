//! Property-based tests for the dual-number ring.
//!
//! Exact identities are asserted with `==`; identities that only hold up
//! to rounding are asserted with a relative tolerance.

use approx::assert_relative_eq;
use dual_core::types::dual::{inv, Dual};
use num_traits::{One, Zero};
use proptest::prelude::*;

fn dual_strategy() -> impl Strategy<Value = Dual<f64>> {
    (-1e3..1e3_f64, -1e3..1e3_f64).prop_map(|(re, eps)| Dual::new(re, eps))
}

fn invertible_strategy() -> impl Strategy<Value = Dual<f64>> {
    dual_strategy().prop_filter("real part bounded away from zero", |x| x.re.abs() > 1e-3)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn test_inverse_is_two_sided_identity(x in invertible_strategy()) {
        let left = x * inv(x);
        let right = inv(x) * x;

        assert_relative_eq!(left.re, 1.0, max_relative = 1e-12);
        assert_relative_eq!(right.re, 1.0, max_relative = 1e-12);
        prop_assert!(left.eps.abs() <= 1e-12 * (1.0 + (x.eps / x.re).abs()));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn test_multiplication_commutes(x in dual_strategy(), y in dual_strategy()) {
        prop_assert_eq!(x * y, y * x);
    }

    #[test]
    fn test_addition_commutes(x in dual_strategy(), y in dual_strategy()) {
        prop_assert_eq!(x + y, y + x);
    }

    #[test]
    fn test_multiplication_distributes(
        x in dual_strategy(),
        y in dual_strategy(),
        z in dual_strategy(),
    ) {
        let lhs = x * (y + z);
        let rhs = x * y + x * z;
        let scale = 1.0 + (x.re.abs() + x.eps.abs()) * (y.norm() + z.norm());

        prop_assert!((lhs.re - rhs.re).abs() <= 1e-12 * scale);
        prop_assert!((lhs.eps - rhs.eps).abs() <= 1e-12 * scale);
    }

    #[test]
    fn test_scalar_promotion_is_symmetric(s in -1e3..1e3_f64, x in dual_strategy()) {
        prop_assert_eq!(s + x, x + s);
        prop_assert_eq!(s + x, Dual::constant(s) + x);
        prop_assert_eq!(s - x, Dual::constant(s) - x);
        prop_assert_eq!(x - s, x - Dual::constant(s));
        prop_assert_eq!(s * x, x * s);
        prop_assert_eq!(s * x, Dual::constant(s) * x);
    }

    #[test]
    fn test_double_negation(x in dual_strategy()) {
        prop_assert_eq!(-(-x), x);
        prop_assert_eq!(x, -(-x));
    }

    #[test]
    fn test_subtraction_is_addition_of_negation(x in dual_strategy(), y in dual_strategy()) {
        prop_assert_eq!(x - y, x + (-y));
    }

    #[test]
    fn test_division_is_multiplication_by_inverse(
        x in dual_strategy(),
        y in invertible_strategy(),
    ) {
        prop_assert_eq!(x / y, x * inv(y));
    }

    #[test]
    fn test_infinitesimal_squares_to_zero(b in -1e3..1e3_f64) {
        let e = Dual::new(0.0, b);
        prop_assert_eq!(e * e, Dual::zero());
    }

    #[test]
    fn test_norm_is_non_negative_and_dominates_real_part(x in dual_strategy()) {
        let n = x.norm();
        prop_assert!(n >= 0.0);
        prop_assert!(n + 1e-9 * (1.0 + n) >= x.re.abs());
    }
}

#[test]
fn test_identity_elements() {
    let x = Dual::new(4.0_f64, -1.5);
    assert_eq!(x + Dual::zero(), x);
    assert_eq!(x * Dual::one(), x);
    assert_eq!(Dual::<f64>::one().inv(), Dual::one());
}
