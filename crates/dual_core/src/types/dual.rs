//! Dual numbers for forward-mode automatic differentiation.
//!
//! A dual number `x = x₀ + x₁ε` pairs a real part with an infinitesimal
//! part, where `ε ≠ 0` but `ε² = 0`. Every operation on duals carries the
//! exact first-order Taylor term in the infinitesimal part, so evaluating a
//! function at `x₀ + 1ε` yields `f(x₀) + f'(x₀)ε`.
//!
//! ## Arithmetic
//!
//! ```text
//! (x₀ + x₁ε) + (y₀ + y₁ε) = (x₀ + y₀) + (x₁ + y₁)ε
//! (x₀ + x₁ε) · (y₀ + y₁ε) = x₀y₀ + (x₀y₁ + x₁y₀)ε
//! 1 / (x₀ + x₁ε)          = 1/x₀ - (x₁/x₀²)ε
//! ```
//!
//! A bare scalar `s` behaves as `s + 0ε` in every mixed operation.
//!
//! ## Nesting
//!
//! `Dual<X>` implements [`num_traits::Float`] whenever `X` does, so
//! `Dual<Dual<f64>>` is a valid scalar type. Seeding both infinitesimal
//! parts to one exposes the second derivative in `eps.eps`.
//!
//! ## Usage
//!
//! ```
//! use dual_core::types::dual::Dual;
//!
//! // f(x) = x² + 2x at x = 3
//! let x = Dual::variable(3.0_f64);
//! let y = x * x + 2.0 * x;
//!
//! assert_eq!(y.re, 15.0);
//! assert_eq!(y.eps, 8.0);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::num::FpCategory;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use num_traits::{Float, Num, NumCast, One, ToPrimitive, Zero};

/// A dual number `re + eps·ε` with `ε² = 0`.
///
/// Equality is structural and exact: both components must compare equal
/// as floats. Ordering looks at the real part only.
///
/// # Type Parameters
/// * `X` - Scalar type: `f32`, `f64`, or another `Dual` for nested duals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dual<X> {
    /// Real part (function value).
    pub re: X,
    /// Infinitesimal part (coefficient of ε, the derivative).
    pub eps: X,
}

/// `f64` dual number, the common case.
pub type DualNumber = Dual<f64>;

/// `f32` dual number.
pub type Dual32 = Dual<f32>;

/// `f64` dual number.
pub type Dual64 = Dual<f64>;

impl<X> Dual<X> {
    /// Creates a dual number from its real and infinitesimal parts.
    ///
    /// # Examples
    /// ```
    /// use dual_core::types::dual::Dual;
    ///
    /// let d = Dual::new(1.0_f64, 2.0);
    /// assert_eq!(d.re, 1.0);
    /// assert_eq!(d.eps, 2.0);
    /// ```
    #[inline]
    pub const fn new(re: X, eps: X) -> Self {
        Self { re, eps }
    }
}

impl<X: Float> Dual<X> {
    /// Promotes a scalar to `s + 0ε`.
    #[inline]
    pub fn constant(re: X) -> Self {
        Self::new(re, X::zero())
    }

    /// Seeds an independent variable `x + 1ε`.
    ///
    /// Evaluating a function at a variable puts its derivative in `eps`.
    #[inline]
    pub fn variable(re: X) -> Self {
        Self::new(re, X::one())
    }

    /// The pure infinitesimal `0 + 1ε`.
    ///
    /// Nonzero, yet its square is zero:
    /// ```
    /// use dual_core::types::dual::Dual;
    /// use num_traits::Zero;
    ///
    /// let e = Dual::<f64>::epsilon_unit();
    /// assert_ne!(e, Dual::zero());
    /// assert_eq!(e * e, Dual::zero());
    /// ```
    #[inline]
    pub fn epsilon_unit() -> Self {
        Self::new(X::zero(), X::one())
    }

    /// Returns the real part.
    #[inline]
    pub fn real(&self) -> X {
        self.re
    }

    /// Returns the infinitesimal part.
    #[inline]
    pub fn infinitesimal(&self) -> X {
        self.eps
    }

    /// Multiplicative inverse `1/x₀ - (x₁/x₀²)ε`.
    ///
    /// A zero real part gives `inf`/`NaN` components, exactly as scalar
    /// division by zero does.
    ///
    /// # Examples
    /// ```
    /// use dual_core::types::dual::Dual;
    ///
    /// let d = Dual::new(2.0_f64, 3.0);
    /// assert_eq!(d * d.inv(), Dual::new(1.0, 0.0));
    /// assert_eq!(d.inv() * d, Dual::new(1.0, 0.0));
    /// ```
    #[inline]
    pub fn inv(self) -> Self {
        Self::new(X::one() / self.re, -self.eps / (self.re * self.re))
    }

    /// Applies a scalar function given its value and slope at the real part.
    ///
    /// Returns `value + (slope · eps)ε`, the chain rule for one step.
    #[inline]
    pub fn chain(self, value: X, slope: X) -> Self {
        Self::new(value, slope * self.eps)
    }

    /// Operator norm of the matrix representation `[[x₀, x₁], [0, x₀]]`.
    ///
    /// With `c = 2x₀² + x₁²` and `d = √(2x₀² + c)` the singular values of
    /// the matrix are `√((c ∓ x₁d)/2)`; the norm is the larger one.
    /// Diagnostic only; the differentiation operators never use it.
    ///
    /// # Examples
    /// ```
    /// use dual_core::types::dual::Dual;
    ///
    /// assert!((Dual::new(-3.0_f64, 0.0).norm() - 3.0).abs() < 1e-12);
    /// assert!((Dual::new(0.0_f64, 1.0).norm() - 1.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> X {
        // Scaled so the squares neither overflow nor underflow
        let scale = self.re.abs().max(self.eps.abs());
        if scale.is_zero() || scale.is_infinite() {
            return scale;
        }
        let (re, eps) = (self.re / scale, self.eps / scale);

        let two = two::<X>();
        let a2 = re * re;
        let c = two * a2 + eps * eps;
        let d = (two * a2 + c).sqrt();
        let lower = (c - eps * d).max(X::zero()).sqrt();
        let upper = (c + eps * d).max(X::zero()).sqrt();

        lower.max(upper) / two.sqrt() * scale
    }
}

/// Multiplicative inverse of a dual number, `x * inv(x) == 1 == inv(x) * x`.
#[inline]
pub fn inv<X: Float>(x: Dual<X>) -> Dual<X> {
    x.inv()
}

#[inline]
fn two<X: Float>() -> X {
    X::one() + X::one()
}

#[inline]
fn from_i32<X: Float>(n: i32) -> X {
    <X as NumCast>::from(n).unwrap_or_else(X::nan)
}

impl<X: Float> From<X> for Dual<X> {
    #[inline]
    fn from(re: X) -> Self {
        Self::constant(re)
    }
}

impl<X: Float + fmt::Display> fmt::Display for Dual<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.eps.is_sign_negative() {
            write!(f, "{} - {}ε", self.re, -self.eps)
        } else {
            write!(f, "{} + {}ε", self.re, self.eps)
        }
    }
}

// Orders by real part so that branches in generic code (`x < 0`) agree
// with the branch the underlying scalar takes. Equal real parts with
// different infinitesimals are unordered, matching `PartialEq`.
impl<X: PartialOrd> PartialOrd for Dual<X> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.re.partial_cmp(&other.re) {
            Some(Ordering::Equal) if self.eps != other.eps => None,
            ordering => ordering,
        }
    }
}

// ============================================================================
// Ring operations: dual ∘ dual
// ============================================================================

impl<X: Float> Neg for Dual<X> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.eps)
    }
}

impl<X: Float> Add for Dual<X> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl<X: Float> Sub for Dual<X> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl<X: Float> Mul for Dual<X> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Product rule; the ε² term vanishes
        Self::new(self.re * rhs.re, self.re * rhs.eps + self.eps * rhs.re)
    }
}

impl<X: Float> Div for Dual<X> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inv()
    }
}

impl<X: Float> Rem for Dual<X> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self {
        // x % y = x - y·trunc(x/y), trunc is locally constant
        let q = (self.re / rhs.re).trunc();
        Self::new(self.re % rhs.re, self.eps - rhs.eps * q)
    }
}

// ============================================================================
// Mixed operations: dual ∘ scalar
// ============================================================================

impl<X: Float> Add<X> for Dual<X> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: X) -> Self {
        Self::new(self.re + rhs, self.eps)
    }
}

impl<X: Float> Sub<X> for Dual<X> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: X) -> Self {
        Self::new(self.re - rhs, self.eps)
    }
}

impl<X: Float> Mul<X> for Dual<X> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: X) -> Self {
        Self::new(self.re * rhs, self.eps * rhs)
    }
}

impl<X: Float> Div<X> for Dual<X> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: X) -> Self {
        Self::new(self.re / rhs, self.eps / rhs)
    }
}

impl<X: Float> Rem<X> for Dual<X> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: X) -> Self {
        Self::new(self.re % rhs, self.eps)
    }
}

// ============================================================================
// Mixed operations: scalar ∘ dual (concrete scalars only, orphan rules)
// ============================================================================

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl Add<Dual<$t>> for $t {
                type Output = Dual<$t>;

                #[inline]
                fn add(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self + rhs.re, rhs.eps)
                }
            }

            impl Sub<Dual<$t>> for $t {
                type Output = Dual<$t>;

                #[inline]
                fn sub(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self - rhs.re, -rhs.eps)
                }
            }

            impl Mul<Dual<$t>> for $t {
                type Output = Dual<$t>;

                #[inline]
                fn mul(self, rhs: Dual<$t>) -> Dual<$t> {
                    Dual::new(self * rhs.re, self * rhs.eps)
                }
            }

            impl Div<Dual<$t>> for $t {
                type Output = Dual<$t>;

                #[inline]
                fn div(self, rhs: Dual<$t>) -> Dual<$t> {
                    rhs.inv() * self
                }
            }
        )*
    };
}

impl_scalar_lhs!(f32, f64);

// ============================================================================
// Compound assignment
// ============================================================================

macro_rules! impl_assign {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<X: Float> $trait for Dual<X> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }

        impl<X: Float> $trait<X> for Dual<X> {
            #[inline]
            fn $method(&mut self, rhs: X) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_assign!(AddAssign, add_assign, +);
impl_assign!(SubAssign, sub_assign, -);
impl_assign!(MulAssign, mul_assign, *);
impl_assign!(DivAssign, div_assign, /);
impl_assign!(RemAssign, rem_assign, %);

impl<X: Float> Sum for Dual<X> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a, X: Float> Sum<&'a Dual<X>> for Dual<X> {
    fn sum<I: Iterator<Item = &'a Dual<X>>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}

impl<X: Float> Product for Dual<X> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

impl<'a, X: Float> Product<&'a Dual<X>> for Dual<X> {
    fn product<I: Iterator<Item = &'a Dual<X>>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * *x)
    }
}

// ============================================================================
// num-traits integration
// ============================================================================

impl<X: Float> Zero for Dual<X> {
    #[inline]
    fn zero() -> Self {
        Self::new(X::zero(), X::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.eps.is_zero()
    }
}

impl<X: Float> One for Dual<X> {
    #[inline]
    fn one() -> Self {
        Self::constant(X::one())
    }
}

impl<X: Float> Num for Dual<X> {
    type FromStrRadixErr = X::FromStrRadixErr;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        X::from_str_radix(s, radix).map(Self::constant)
    }
}

impl<X: Float> ToPrimitive for Dual<X> {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.re.to_i64()
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.re.to_u64()
    }

    #[inline]
    fn to_f32(&self) -> Option<f32> {
        self.re.to_f32()
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        self.re.to_f64()
    }
}

impl<X: Float> NumCast for Dual<X> {
    #[inline]
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        <X as NumCast>::from(n).map(Self::constant)
    }
}

// Each transcendental is `chain(g(x₀), g'(x₀))`. Step functions carry a
// zero infinitesimal part.
impl<X: Float> Float for Dual<X> {
    fn nan() -> Self {
        Self::constant(X::nan())
    }

    fn infinity() -> Self {
        Self::constant(X::infinity())
    }

    fn neg_infinity() -> Self {
        Self::constant(X::neg_infinity())
    }

    fn neg_zero() -> Self {
        Self::constant(X::neg_zero())
    }

    fn min_value() -> Self {
        Self::constant(X::min_value())
    }

    fn min_positive_value() -> Self {
        Self::constant(X::min_positive_value())
    }

    fn epsilon() -> Self {
        Self::constant(X::epsilon())
    }

    fn max_value() -> Self {
        Self::constant(X::max_value())
    }

    fn is_nan(self) -> bool {
        self.re.is_nan() || self.eps.is_nan()
    }

    fn is_infinite(self) -> bool {
        !self.is_nan() && (self.re.is_infinite() || self.eps.is_infinite())
    }

    fn is_finite(self) -> bool {
        self.re.is_finite() && self.eps.is_finite()
    }

    fn is_normal(self) -> bool {
        self.re.is_normal()
    }

    fn classify(self) -> FpCategory {
        self.re.classify()
    }

    fn floor(self) -> Self {
        Self::constant(self.re.floor())
    }

    fn ceil(self) -> Self {
        Self::constant(self.re.ceil())
    }

    fn round(self) -> Self {
        Self::constant(self.re.round())
    }

    fn trunc(self) -> Self {
        Self::constant(self.re.trunc())
    }

    fn fract(self) -> Self {
        Self::new(self.re.fract(), self.eps)
    }

    fn abs(self) -> Self {
        self.chain(self.re.abs(), self.re.signum())
    }

    fn signum(self) -> Self {
        Self::constant(self.re.signum())
    }

    fn is_sign_positive(self) -> bool {
        self.re.is_sign_positive()
    }

    fn is_sign_negative(self) -> bool {
        self.re.is_sign_negative()
    }

    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }

    fn recip(self) -> Self {
        self.inv()
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::one();
        }
        let value = self.re.powi(n);
        let slope = match n.checked_sub(1) {
            Some(m) => from_i32::<X>(n) * self.re.powi(m),
            // n == i32::MIN
            None => from_i32::<X>(n) * value / self.re,
        };
        self.chain(value, slope)
    }

    fn powf(self, n: Self) -> Self {
        let value = self.re.powf(n.re);
        let mut eps = X::zero();
        if !self.eps.is_zero() {
            eps = eps + n.re * self.re.powf(n.re - X::one()) * self.eps;
        }
        // d/dn xⁿ = xⁿ ln x, only needed for a non-constant exponent
        if !n.eps.is_zero() {
            eps = eps + value * self.re.ln() * n.eps;
        }
        Self::new(value, eps)
    }

    fn sqrt(self) -> Self {
        let s = self.re.sqrt();
        self.chain(s, (two::<X>() * s).recip())
    }

    fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }

    fn exp2(self) -> Self {
        let v = self.re.exp2();
        self.chain(v, v * two::<X>().ln())
    }

    fn ln(self) -> Self {
        self.chain(self.re.ln(), self.re.recip())
    }

    fn log(self, base: Self) -> Self {
        self.ln() / base.ln()
    }

    fn log2(self) -> Self {
        self.chain(self.re.log2(), (self.re * two::<X>().ln()).recip())
    }

    fn log10(self) -> Self {
        let ln_10 = from_i32::<X>(10).ln();
        self.chain(self.re.log10(), (self.re * ln_10).recip())
    }

    fn to_degrees(self) -> Self {
        Self::new(self.re.to_degrees(), self.eps.to_degrees())
    }

    fn to_radians(self) -> Self {
        Self::new(self.re.to_radians(), self.eps.to_radians())
    }

    fn max(self, other: Self) -> Self {
        if self.re.is_nan() || self.re < other.re {
            other
        } else {
            self
        }
    }

    fn min(self, other: Self) -> Self {
        if self.re.is_nan() || self.re > other.re {
            other
        } else {
            self
        }
    }

    fn abs_sub(self, other: Self) -> Self {
        if self.re <= other.re {
            Self::zero()
        } else {
            self - other
        }
    }

    fn cbrt(self) -> Self {
        let c = self.re.cbrt();
        self.chain(c, (from_i32::<X>(3) * c * c).recip())
    }

    fn hypot(self, other: Self) -> Self {
        let h = self.re.hypot(other.re);
        Self::new(h, (self.re * self.eps + other.re * other.eps) / h)
    }

    fn sin(self) -> Self {
        let (s, c) = self.re.sin_cos();
        self.chain(s, c)
    }

    fn cos(self) -> Self {
        let (s, c) = self.re.sin_cos();
        self.chain(c, -s)
    }

    fn tan(self) -> Self {
        let t = self.re.tan();
        self.chain(t, X::one() + t * t)
    }

    fn asin(self) -> Self {
        let slope = (X::one() - self.re * self.re).sqrt().recip();
        self.chain(self.re.asin(), slope)
    }

    fn acos(self) -> Self {
        let slope = -(X::one() - self.re * self.re).sqrt().recip();
        self.chain(self.re.acos(), slope)
    }

    fn atan(self) -> Self {
        self.chain(self.re.atan(), (X::one() + self.re * self.re).recip())
    }

    fn atan2(self, other: Self) -> Self {
        // self is y, other is x
        let r2 = self.re * self.re + other.re * other.re;
        Self::new(
            self.re.atan2(other.re),
            (other.re * self.eps - self.re * other.eps) / r2,
        )
    }

    fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.re.sin_cos();
        (self.chain(s, c), self.chain(c, -s))
    }

    fn exp_m1(self) -> Self {
        self.chain(self.re.exp_m1(), self.re.exp())
    }

    fn ln_1p(self) -> Self {
        self.chain(self.re.ln_1p(), (X::one() + self.re).recip())
    }

    fn sinh(self) -> Self {
        self.chain(self.re.sinh(), self.re.cosh())
    }

    fn cosh(self) -> Self {
        self.chain(self.re.cosh(), self.re.sinh())
    }

    fn tanh(self) -> Self {
        let t = self.re.tanh();
        self.chain(t, X::one() - t * t)
    }

    fn asinh(self) -> Self {
        let slope = (self.re * self.re + X::one()).sqrt().recip();
        self.chain(self.re.asinh(), slope)
    }

    fn acosh(self) -> Self {
        let slope = (self.re * self.re - X::one()).sqrt().recip();
        self.chain(self.re.acosh(), slope)
    }

    fn atanh(self) -> Self {
        self.chain(self.re.atanh(), (X::one() - self.re * self.re).recip())
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        self.re.integer_decode()
    }
}
