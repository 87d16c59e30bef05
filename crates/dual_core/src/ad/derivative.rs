//! Derivative operators.
//!
//! Evaluating a dual-capable function at `x + 1ε` returns
//! `f(x) + f'(x)ε`; reading the infinitesimal part is differentiation.
//!
//! ```text
//! D f (x)  = f(x + ε).eps
//! D² f (x) = D (D f) (x)      over Dual<Dual<X>>
//! ```
//!
//! The wrapped function must accept the dual type at the requested order:
//! order `k` needs a function generic over `k`-fold nested duals. A function
//! written for plain `f64` does not satisfy the bound and is rejected by the
//! compiler:
//!
//! ```compile_fail
//! use dual_core::ad::derivative::derivative;
//!
//! fn sq(x: f64) -> f64 {
//!     x * x
//! }
//!
//! let d_sq = derivative(sq);
//! ```
//!
//! Written generically over `num_traits::Float` the same function works:
//!
//! ```
//! use dual_core::ad::derivative::{derivative, second_derivative};
//! use dual_core::types::dual::Dual;
//! use num_traits::Float;
//!
//! fn cube<T: Float>(x: T) -> T {
//!     x * x * x
//! }
//!
//! let d = derivative(cube::<Dual<f64>>);
//! let d2 = second_derivative(cube::<Dual<Dual<f64>>>);
//!
//! assert_eq!(d(2.0), 12.0);
//! assert_eq!(d2(2.0), 12.0);
//! ```

use num_traits::{Float, One};

use crate::types::dual::Dual;

/// First derivative of a dual-capable function.
///
/// # Examples
/// ```
/// use dual_core::ad::derivative::Derivative;
/// use dual_core::types::dual::Dual;
///
/// let d = Derivative::new(|x: Dual<f64>| x * x);
/// assert_eq!(d.eval(3.0), 6.0);
/// assert_eq!(d.value_and_derivative(3.0), (9.0, 6.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Derivative<F> {
    f: F,
}

impl<F> Derivative<F> {
    /// Wraps a function `Dual<X> -> Dual<X>`.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Returns `f'(x)`.
    #[inline]
    pub fn eval<X>(&self, x: X) -> X
    where
        X: Float,
        F: Fn(Dual<X>) -> Dual<X>,
    {
        (self.f)(Dual::variable(x)).eps
    }

    /// Returns `(f(x), f'(x))` from a single evaluation.
    #[inline]
    pub fn value_and_derivative<X>(&self, x: X) -> (X, X)
    where
        X: Float,
        F: Fn(Dual<X>) -> Dual<X>,
    {
        let y = (self.f)(Dual::variable(x));
        (y.re, y.eps)
    }
}

/// Second derivative of a function over nested duals.
///
/// # Examples
/// ```
/// use dual_core::ad::derivative::SecondDerivative;
/// use dual_core::types::dual::Dual;
///
/// // x³: f' = 3x², f'' = 6x
/// let d2 = SecondDerivative::new(|x: Dual<Dual<f64>>| x * x * x);
/// assert_eq!(d2.eval(2.0), 12.0);
/// assert_eq!(d2.value_and_derivatives(2.0), (8.0, 12.0, 12.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SecondDerivative<F> {
    f: F,
}

impl<F> SecondDerivative<F> {
    /// Wraps a function `Dual<Dual<X>> -> Dual<Dual<X>>`.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Returns `f''(x)`.
    #[inline]
    pub fn eval<X>(&self, x: X) -> X
    where
        X: Float,
        F: Fn(Dual<Dual<X>>) -> Dual<Dual<X>>,
    {
        (self.f)(seed2(x)).eps.eps
    }

    /// Returns `(f(x), f'(x), f''(x))` from a single evaluation.
    #[inline]
    pub fn value_and_derivatives<X>(&self, x: X) -> (X, X, X)
    where
        X: Float,
        F: Fn(Dual<Dual<X>>) -> Dual<Dual<X>>,
    {
        let y = (self.f)(seed2(x));
        (y.re.re, y.re.eps, y.eps.eps)
    }
}

// x + ε₁ + ε₂: both levels carry a unit infinitesimal
#[inline]
fn seed2<X: Float>(x: X) -> Dual<Dual<X>> {
    Dual::new(Dual::variable(x), Dual::one())
}

/// Returns `x ↦ f'(x)` for a function over `Dual<X>`.
pub fn derivative<X, F>(f: F) -> impl Fn(X) -> X
where
    X: Float,
    F: Fn(Dual<X>) -> Dual<X>,
{
    move |x| f(Dual::variable(x)).eps
}

/// Returns `x ↦ f''(x)`: the derivative operator applied twice.
pub fn second_derivative<X, F>(f: F) -> impl Fn(X) -> X
where
    X: Float,
    F: Fn(Dual<Dual<X>>) -> Dual<Dual<X>>,
{
    derivative::<X, _>(derivative::<Dual<X>, _>(f))
}

/// Returns `x ↦ f'''(x)` over three levels of nesting.
pub fn third_derivative<X, F>(f: F) -> impl Fn(X) -> X
where
    X: Float,
    F: Fn(Dual<Dual<Dual<X>>>) -> Dual<Dual<Dual<X>>>,
{
    derivative::<X, _>(second_derivative::<Dual<X>, _>(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ad::lift::lift;
    use approx::assert_relative_eq;

    fn sq<X: Float>(x: X) -> X {
        x * x
    }

    fn dsq<X: Float>(x: X) -> X {
        (X::one() + X::one()) * x
    }

    fn samples() -> Vec<f64> {
        let mut xs = Vec::new();
        let mut x = -2.0_f64;
        while x < 2.0 {
            xs.push(x);
            x += 0.1;
        }
        xs
    }

    #[test]
    fn test_derivative_of_square() {
        let d_sq = derivative(sq::<Dual<f64>>);
        for x in samples() {
            assert_eq!(d_sq(x), 2.0 * x);
        }
    }

    #[test]
    fn test_derivative_of_square_f32() {
        let d_sq = derivative(sq::<Dual<f32>>);
        let mut x = -2.0_f32;
        while x < 2.0 {
            assert_eq!(d_sq(x), 2.0 * x);
            x += 0.1;
        }
    }

    #[test]
    fn test_generic_square_on_dual_seed() {
        for x in samples() {
            let y = sq(Dual::variable(x));
            assert_eq!(y.re, x * x);
            assert_eq!(y.eps, 2.0 * x);
        }
    }

    #[test]
    fn test_derivative_of_lifted_function() {
        let lifted = lift(sq::<f64>, dsq::<f64>);
        let d = derivative(|x| lifted.apply(x));
        assert_eq!(d(3.0), dsq(3.0));
        assert_eq!(d(3.0), 6.0);
    }

    #[test]
    fn test_struct_and_function_forms_agree() {
        let op = Derivative::new(|x: Dual<f64>| x.sin() * x);
        let f = derivative(|x: Dual<f64>| x.sin() * x);
        for x in samples() {
            assert_eq!(op.eval(x), f(x));
            assert_relative_eq!(op.eval(x), x.cos() * x + x.sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_value_and_derivative() {
        let op = Derivative::new(|x: Dual<f64>| x.exp() / x);
        let (v, dv) = op.value_and_derivative(2.0_f64);
        assert_relative_eq!(v, 2.0_f64.exp() / 2.0, epsilon = 1e-12);
        // (eˣ/x)' = eˣ(x - 1)/x²
        assert_relative_eq!(dv, 2.0_f64.exp() / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_second_derivative_polynomial() {
        let d2 = second_derivative(|x: Dual<Dual<f64>>| x * x * x);
        for x in samples() {
            assert_relative_eq!(d2(x), 6.0 * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_second_derivative_matches_struct_form() {
        let f = |x: Dual<Dual<f64>>| (x * x).sin();
        let d2 = second_derivative(f);
        let op = SecondDerivative::new(f);
        // (sin x²)'' = 2cos x² - 4x² sin x²
        for x in [0.0_f64, 0.5, 1.0, 1.5] {
            let expected = 2.0 * (x * x).cos() - 4.0 * x * x * (x * x).sin();
            assert_relative_eq!(d2(x), expected, epsilon = 1e-12);
            assert_eq!(op.eval(x), d2(x));
        }
    }

    #[test]
    fn test_second_derivative_of_exp_is_exp() {
        let op = SecondDerivative::new(|x: Dual<Dual<f64>>| x.exp());
        let (v, d1, d2) = op.value_and_derivatives(0.7_f64);
        assert_relative_eq!(v, 0.7_f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(d1, 0.7_f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(d2, 0.7_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_third_derivative() {
        let d3 = third_derivative(|x: Dual<Dual<Dual<f64>>>| x.powi(4));
        for x in [-1.0_f64, 0.5, 2.0] {
            assert_relative_eq!(d3(x), 24.0 * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_derivative_of_derivative_equals_second_derivative() {
        // D applied to D f, where the inner D runs at X = Dual<f64>
        let inner = derivative(|x: Dual<Dual<f64>>| x.ln() * x);
        let outer = derivative(inner);
        let d2 = second_derivative(|x: Dual<Dual<f64>>| x.ln() * x);
        for x in [0.5_f64, 1.0, 3.0] {
            assert_eq!(outer(x), d2(x));
            assert_relative_eq!(outer(x), 1.0 / x, epsilon = 1e-12);
        }
    }
}
