//! Numeric trait shared by scalars and dual numbers.
//!
//! Functions meant to be differentiated are written generically over
//! [`Float`]. `f32`, `f64`, [`Dual<X>`](crate::types::dual::Dual) and nested
//! duals all implement it, so one function body serves plain evaluation and
//! every derivative order.
//!
//! # Examples
//! ```
//! use dual_core::traits::Float;
//! use dual_core::types::dual::Dual;
//!
//! fn discount<T: Float>(rate: T, time: T) -> T {
//!     (-rate * time).exp()
//! }
//!
//! let plain: f64 = discount(0.05, 1.0);
//! let tangent = discount(Dual::variable(0.05), Dual::constant(1.0));
//!
//! assert_eq!(tangent.re, plain);
//! assert!((tangent.eps + plain).abs() < 1e-12);
//! ```

pub use num_traits::Float;
