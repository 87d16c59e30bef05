//! Promotion of scalar functions with known derivatives to dual functions.
//!
//! A [`Lift`] pairs `f` with its closed-form derivative `df` and evaluates
//!
//! ```text
//! F̂(x₀ + x₁ε) = f(x₀) + df(x₀)·x₁ ε
//! ```
//!
//! so the chain rule is applied when lifted functions are composed with
//! each other and with dual arithmetic. No differentiation happens here;
//! `df` is trusted as given.

use num_traits::Float;

use crate::types::dual::Dual;

/// A scalar function paired with its analytic derivative.
///
/// # Examples
/// ```
/// use dual_core::ad::lift::Lift;
/// use dual_core::types::dual::Dual;
///
/// let sq = Lift::new(|x: f64| x * x, |x: f64| 2.0 * x);
/// let y = sq.apply(Dual::variable(3.0));
///
/// assert_eq!(y, Dual::new(9.0, 6.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lift<F, DF> {
    f: F,
    df: DF,
}

impl<F, DF> Lift<F, DF> {
    /// Pairs a function with its derivative.
    pub fn new(f: F, df: DF) -> Self {
        Self { f, df }
    }

    /// Evaluates the lifted function on a dual number.
    #[inline]
    pub fn apply<X>(&self, x: Dual<X>) -> Dual<X>
    where
        X: Float,
        F: Fn(X) -> X,
        DF: Fn(X) -> X,
    {
        x.chain((self.f)(x.re), (self.df)(x.re))
    }

    /// Evaluates the underlying scalar function.
    #[inline]
    pub fn value<X>(&self, x: X) -> X
    where
        F: Fn(X) -> X,
    {
        (self.f)(x)
    }

    /// Evaluates the supplied derivative.
    #[inline]
    pub fn slope<X>(&self, x: X) -> X
    where
        DF: Fn(X) -> X,
    {
        (self.df)(x)
    }
}

/// Lifts `f` with derivative `df` into a dual-valued function.
pub fn lift<F, DF>(f: F, df: DF) -> Lift<F, DF> {
    Lift::new(f, df)
}

/// Stock lifts of elementary functions.
pub mod lifted {
    use num_traits::Float;

    use super::Lift;

    /// Function pointer form used by the stock lifts.
    pub type ScalarFn<X> = fn(X) -> X;

    /// Natural logarithm, `d ln x = 1/x`.
    pub fn ln<X: Float>() -> Lift<ScalarFn<X>, ScalarFn<X>> {
        Lift::new(<X as Float>::ln as ScalarFn<X>, <X as Float>::recip as ScalarFn<X>)
    }

    /// Exponential, `d eˣ = eˣ`.
    pub fn exp<X: Float>() -> Lift<ScalarFn<X>, ScalarFn<X>> {
        Lift::new(<X as Float>::exp as ScalarFn<X>, <X as Float>::exp as ScalarFn<X>)
    }
}
