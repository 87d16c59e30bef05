//! Error types for analytical models.
//!
//! This module provides:
//! - `AnalyticalError`: invalid model parameters

use thiserror::Error;

/// Analytical model errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidForward`: Non-positive forward
///
/// # Examples
/// ```
/// use dual_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: s = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: k = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid forward (non-positive).
    #[error("Invalid forward: f = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },
}
