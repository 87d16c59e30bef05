//! Core numeric types.
//!
//! This module provides:
//! - `dual`: the dual-number ring `a + bε` with `ε² = 0`
//! - `verification`: conversions to and from num-dual's `Dual64` (when `num-dual-mode` is enabled)
//!
//! # Re-exports
//!
//! [`Dual`], [`DualNumber`], [`Dual32`], [`Dual64`] and [`inv`] from `dual`.

pub mod dual;
#[cfg(feature = "num-dual-mode")]
pub mod verification;

pub use dual::{inv, Dual, Dual32, Dual64, DualNumber};
