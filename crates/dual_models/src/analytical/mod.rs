//! Analytical formulas evaluated on scalars and dual numbers.
//!
//! - Standard normal distribution and its lift
//! - Forward Black model with AD and closed-form Greeks
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: supports `f64`, `f32` and `Dual<_>`
//! - **Lifted special functions**: `N` enters dual arithmetic through a
//!   `Lift`, so first derivatives use the exact density

pub mod black;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black::{BlackForward, Greeks};
pub use distributions::{lifted_norm_cdf, norm_cdf, norm_pdf};
pub use error::AnalyticalError;
