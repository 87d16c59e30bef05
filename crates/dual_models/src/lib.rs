//! # Dual Models (L2: Applications)
//!
//! Functions with known derivatives lifted to dual numbers, and the forward
//! Black model whose sensitivities are read off dual-valued prices.
//!
//! This crate provides:
//! - Standard normal CDF and PDF, generic over `T: Float`
//! - The lifted normal CDF, carrying the exact density as its derivative
//! - `BlackForward`: put and call prices with delta, gamma and vega computed
//!   by the derivative operators of `dual_core`
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the same pricing code runs on `f64`, `f32`,
//!   `Dual<_>` and nested duals
//! - **Closed forms alongside AD**: every sensitivity has a closed-form
//!   counterpart used for validation
//!
//! ## Example
//! ```
//! use dual_models::analytical::BlackForward;
//!
//! let model = BlackForward::new(0.1_f64, 100.0).unwrap();
//! let delta = model.put_delta(100.0);
//! assert!((delta - model.put_delta_closed_form(100.0)).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
