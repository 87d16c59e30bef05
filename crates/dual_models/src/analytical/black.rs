//! Forward Black model with sensitivities from dual numbers.
//!
//! Undiscounted prices on a forward `f` with total volatility `s` and
//! strike `k`:
//!
//! **Put**: p(f) = k·N(z) - f·N(z - s)
//! **Call**: c(f) = p(f) + f - k
//!
//! Where:
//! - z = ln(k/f)/s + s/2
//!
//! Delta, gamma and vega are obtained by evaluating the put on dual numbers
//! through the lifted `N` and `ln`. Closed forms are provided next to each
//! one:
//!
//! - delta = -N(z - s)
//! - gamma = N'(z - s) / (f·s)
//! - vega = f·N'(z - s)

use std::cmp::Ordering;

use dual_core::ad::{derivative, lifted, second_derivative};
use dual_core::types::Dual;
use num_traits::Float;

use super::distributions::{lifted_norm_cdf, norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Price and first and second order forward sensitivities of a put.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T> {
    /// Put price p(f).
    pub price: T,
    /// Delta: ∂p/∂f.
    pub delta: T,
    /// Gamma: ∂²p/∂f².
    pub gamma: T,
    /// Vega: ∂p/∂s.
    pub vega: T,
}

/// Undiscounted Black model on a forward.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual<f64>`)
///
/// # Examples
/// ```
/// use dual_models::analytical::BlackForward;
///
/// let model = BlackForward::new(0.1_f64, 100.0).unwrap();
/// let put = model.put(100.0);
/// let call = model.call(100.0);
///
/// // at the money: c = p
/// assert!((call - put).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackForward<T: Float> {
    /// Total volatility (s)
    volatility: T,
    /// Strike (k)
    strike: T,
}

impl<T: Float> BlackForward<T> {
    /// Creates a forward Black model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    ///
    /// # Examples
    /// ```
    /// use dual_models::analytical::BlackForward;
    ///
    /// assert!(BlackForward::new(0.2_f64, 100.0).is_ok());
    /// assert!(BlackForward::new(0.0_f64, 100.0).is_err());
    /// assert!(BlackForward::new(0.2_f64, -1.0).is_err());
    /// ```
    pub fn new(volatility: T, strike: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if volatility.partial_cmp(&zero) != Some(Ordering::Greater) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(0.0),
            });
        }

        if strike.partial_cmp(&zero) != Some(Ordering::Greater) {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }

        Ok(Self { volatility, strike })
    }

    /// Returns the total volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Checks that a forward is positive and returns it unchanged.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidForward` if forward <= 0
    pub fn validate_forward(&self, forward: T) -> Result<T, AnalyticalError> {
        if forward > T::zero() {
            Ok(forward)
        } else {
            Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(0.0),
            })
        }
    }

    /// The same model with parameters promoted to dual constants.
    pub fn dual(&self) -> BlackForward<Dual<T>> {
        BlackForward {
            volatility: Dual::constant(self.volatility),
            strike: Dual::constant(self.strike),
        }
    }

    /// z = ln(k/f)/s + s/2
    #[inline]
    pub fn moneyness(&self, forward: T) -> T {
        let half = T::one() / (T::one() + T::one());
        (self.strike / forward).ln() / self.volatility + half * self.volatility
    }

    /// Put price p(f) = k·N(z) - f·N(z - s).
    #[inline]
    pub fn put(&self, forward: T) -> T {
        let z = self.moneyness(forward);
        self.strike * norm_cdf(z) - forward * norm_cdf(z - self.volatility)
    }

    /// Call price by parity, c(f) = p(f) + f - k.
    #[inline]
    pub fn call(&self, forward: T) -> T {
        self.put(forward) + forward - self.strike
    }

    /// Put price on a dual forward, through the lifted `N` and `ln`.
    ///
    /// Seeding `forward = f + 1ε` gives `p(f) + p'(f)ε`.
    ///
    /// # Examples
    /// ```
    /// use dual_core::types::Dual;
    /// use dual_models::analytical::BlackForward;
    ///
    /// let model = BlackForward::new(0.1_f64, 100.0).unwrap();
    /// let p = model.put_lifted(Dual::variable(100.0));
    /// assert!((p.re - model.put(100.0)).abs() < 1e-10);
    /// assert!((p.eps - model.put_delta_closed_form(100.0)).abs() < 1e-12);
    /// ```
    pub fn put_lifted(&self, forward: Dual<T>) -> Dual<T> {
        put_on_duals(
            forward,
            Dual::constant(self.volatility),
            Dual::constant(self.strike),
        )
    }

    /// Delta ∂p/∂f via the derivative operator.
    pub fn put_delta(&self, forward: T) -> T {
        derivative(|f| self.put_lifted(f))(forward)
    }

    /// Gamma ∂²p/∂f² via nested duals.
    pub fn put_gamma(&self, forward: T) -> T {
        let nested = self.dual();
        second_derivative(move |f| nested.put_lifted(f))(forward)
    }

    /// Vega ∂p/∂s, seeding the volatility instead of the forward.
    pub fn put_vega(&self, forward: T) -> T {
        put_on_duals(
            Dual::constant(forward),
            Dual::variable(self.volatility),
            Dual::constant(self.strike),
        )
        .eps
    }

    /// Price, delta, gamma and vega of the put.
    pub fn greeks(&self, forward: T) -> Greeks<T> {
        let first = self.put_lifted(Dual::variable(forward));
        Greeks {
            price: first.re,
            delta: first.eps,
            gamma: self.put_gamma(forward),
            vega: self.put_vega(forward),
        }
    }

    /// Closed-form delta, -N(z - s).
    pub fn put_delta_closed_form(&self, forward: T) -> T {
        -norm_cdf(self.moneyness(forward) - self.volatility)
    }

    /// Closed-form gamma, N'(z - s) / (f·s).
    pub fn put_gamma_closed_form(&self, forward: T) -> T {
        norm_pdf(self.moneyness(forward) - self.volatility) / (forward * self.volatility)
    }

    /// Closed-form vega, f·N'(z - s).
    pub fn put_vega_closed_form(&self, forward: T) -> T {
        forward * norm_pdf(self.moneyness(forward) - self.volatility)
    }
}

// Shared by all seeds: whichever argument carries ε is differentiated.
fn put_on_duals<X: Float>(f: Dual<X>, s: Dual<X>, k: Dual<X>) -> Dual<X> {
    let two = X::one() + X::one();
    let n = lifted_norm_cdf::<X>();
    let z = lifted::ln::<X>().apply(k / f) / s + s / two;
    k * n.apply(z) - f * n.apply(z - s)
}
