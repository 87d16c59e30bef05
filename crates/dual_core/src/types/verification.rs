//! Conversions between [`Dual64`] and num-dual's `Dual64`.
//!
//! num-dual is used as an independent reference implementation: any
//! expression evaluated on both types must agree component by component.
//!
//! ```
//! use dual_core::types::dual::Dual64;
//!
//! let ours = Dual64::new(2.0, 1.0);
//! let theirs: num_dual::Dual64 = ours.into();
//! assert_eq!(theirs.re, 2.0);
//! assert_eq!(theirs.eps, 1.0);
//! ```

use super::dual::Dual64;

impl From<num_dual::Dual64> for Dual64 {
    fn from(d: num_dual::Dual64) -> Self {
        Dual64::new(d.re, d.eps)
    }
}

impl From<Dual64> for num_dual::Dual64 {
    fn from(d: Dual64) -> Self {
        num_dual::Dual64::new(d.re, d.eps)
    }
}

/// Returns `true` when both components agree within `tolerance`.
pub fn agrees_with(ours: Dual64, theirs: num_dual::Dual64, tolerance: f64) -> bool {
    (ours.re - theirs.re).abs() <= tolerance && (ours.eps - theirs.eps).abs() <= tolerance
}
