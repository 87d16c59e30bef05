//! # dual_core: Dual Numbers and Forward-Mode Differentiation
//!
//! ## Layer 1 (Foundation) Role
//!
//! dual_core is the bottom layer of the workspace, providing:
//! - The dual-number ring `a + bε`, `ε² = 0` (`types::dual`)
//! - Lifting of scalar functions with known derivatives (`ad::lift`)
//! - Derivative operators of first, second and third order (`ad::derivative`)
//! - The shared numeric trait `Float` (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: `Float` and friends, implemented for `Dual<X>`
//! - num-dual: Reference dual numbers for cross-checking (optional)
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use dual_core::ad::{derivative, lift};
//! use dual_core::types::Dual;
//!
//! // Differentiate a generic function
//! let d = derivative(|x: Dual<f64>| x * x);
//! assert_eq!(d(3.0), 6.0);
//!
//! // Lift a function with a known derivative, then differentiate it
//! let sq = lift(|x: f64| x * x, |x: f64| 2.0 * x);
//! let d_sq = derivative(|x| sq.apply(x));
//! assert_eq!(d_sq(3.0), 6.0);
//! ```
//!
//! ## Error Model
//!
//! Arithmetic has no error channel: division by a dual with zero real part
//! yields `inf`/`NaN` like scalar division. Differentiating a function that
//! is not generic over the dual type is a compile error.
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Conversions to num-dual's `Dual64` for verification
//! - `serde`: Enable serialisation for `Dual`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod ad;
pub mod traits;
pub mod types;
