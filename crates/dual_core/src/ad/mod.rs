//! Forward-mode differentiation built on [`Dual`](crate::types::dual::Dual).
//!
//! This module provides:
//! - `lift`: promote a scalar function and its known derivative to a dual function
//! - `derivative`: first, second and third derivative operators
//!
//! # Re-exports
//!
//! [`Lift`], [`lift`], [`Derivative`], [`SecondDerivative`], [`derivative`],
//! [`second_derivative`] and [`third_derivative`] are re-exported here.

pub mod derivative;
pub mod lift;

pub use derivative::{
    derivative, second_derivative, third_derivative, Derivative, SecondDerivative,
};
pub use lift::{lift, lifted, Lift};
