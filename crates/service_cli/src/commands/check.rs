//! Check command implementation
//!
//! Evaluates the dual-number identities on a fixed grid of samples and
//! reports the worst relative error of each. Errors are measured with the
//! dual operator norm of the difference.

use std::io::Write;

use dual_core::ad::{derivative, second_derivative};
use dual_core::types::{inv, Dual, Dual64};
use dual_models::analytical::BlackForward;
use num_traits::{Float, One, Zero};
use tracing::{debug, info, warn};

use crate::{CliError, Result};

/// Outcome of one identity
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityResult {
    pub name: &'static str,
    pub max_error: f64,
    pub passed: bool,
}

/// Run the check command
pub fn run(tolerance: f64) -> Result<()> {
    info!(tolerance, "Checking dual-number identities");

    let results = evaluate(tolerance);
    let mut out = std::io::stdout().lock();
    for r in &results {
        let status = if r.passed { "ok" } else { "FAILED" };
        writeln!(out, "{:<28}{:>12.3e}  {}", r.name, r.max_error, status)?;
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: results.len(),
        });
    }

    info!(total = results.len(), "All identities hold");
    Ok(())
}

/// Evaluate every identity against `tolerance`
pub fn evaluate(tolerance: f64) -> Vec<IdentityResult> {
    let xs = samples();
    let checks: [(&'static str, f64); 10] = [
        ("multiplicative inverse", worst(&xs, |a| (a * inv(a), Dual::one()))),
        ("commutativity", worst_pairs(&xs, |a, b| (a * b, b * a))),
        ("associativity", worst_triples(&xs, |a, b, c| ((a * b) * c, a * (b * c)))),
        (
            "distributivity",
            worst_triples(&xs, |a, b, c| (a * (b + c), a * b + a * c)),
        ),
        ("scalar promotion", worst(&xs, |a| (a * 2.5, 2.5 * a))),
        (
            "epsilon nilpotent",
            worst(&xs, |_| {
                let e = Dual64::epsilon_unit();
                (e * e, Dual::zero())
            }),
        ),
        ("double negation", worst(&xs, |a| (-(-a), a))),
        ("derivative of x^2", worst_scalar(|x| (derivative(sq::<Dual<f64>>)(x), 2.0 * x))),
        (
            "second derivative of x^3",
            worst_scalar(|x| (second_derivative(cube::<Dual<Dual<f64>>>)(x), 6.0 * x)),
        ),
        ("black delta", black_delta_error()),
    ];

    checks
        .into_iter()
        .map(|(name, max_error)| {
            let passed = max_error <= tolerance;
            if passed {
                debug!(name, max_error, "Identity holds");
            } else {
                warn!(name, max_error, tolerance, "Identity outside tolerance");
            }
            IdentityResult {
                name,
                max_error,
                passed,
            }
        })
        .collect()
}

fn sq<T: Float>(x: T) -> T {
    x * x
}

fn cube<T: Float>(x: T) -> T {
    x * x * x
}

// Real parts avoid zero so every sample is invertible
fn samples() -> Vec<Dual64> {
    let res = [-2.0, -0.5, 0.25, 1.0, 3.0];
    let epss = [-1.0, 0.0, 0.5, 2.0];
    res.iter()
        .flat_map(|&re| epss.iter().map(move |&eps| Dual::new(re, eps)))
        .collect()
}

fn relative_error(lhs: Dual64, rhs: Dual64) -> f64 {
    (lhs - rhs).norm() / lhs.norm().max(1.0)
}

fn worst(xs: &[Dual64], identity: impl Fn(Dual64) -> (Dual64, Dual64)) -> f64 {
    xs.iter()
        .map(|&a| {
            let (lhs, rhs) = identity(a);
            relative_error(lhs, rhs)
        })
        .fold(0.0, f64::max)
}

fn worst_pairs(xs: &[Dual64], identity: impl Fn(Dual64, Dual64) -> (Dual64, Dual64)) -> f64 {
    let mut max = 0.0_f64;
    for &a in xs {
        for &b in xs {
            let (lhs, rhs) = identity(a, b);
            max = max.max(relative_error(lhs, rhs));
        }
    }
    max
}

fn worst_triples(
    xs: &[Dual64],
    identity: impl Fn(Dual64, Dual64, Dual64) -> (Dual64, Dual64),
) -> f64 {
    let mut max = 0.0_f64;
    for &a in xs {
        for &b in xs {
            for &c in xs {
                let (lhs, rhs) = identity(a, b, c);
                max = max.max(relative_error(lhs, rhs));
            }
        }
    }
    max
}

fn worst_scalar(identity: impl Fn(f64) -> (f64, f64)) -> f64 {
    (-20..=20)
        .map(|i| {
            let (lhs, rhs) = identity(i as f64 * 0.1);
            (lhs - rhs).abs() / lhs.abs().max(1.0)
        })
        .fold(0.0, f64::max)
}

// f = 100, s = 0.1, k = 100 and a strip of forwards around it
fn black_delta_error() -> f64 {
    match BlackForward::new(0.1, 100.0) {
        Ok(model) => [90.0, 95.0, 100.0, 105.0, 110.0]
            .iter()
            .map(|&f| (model.put_delta(f) - model.put_delta_closed_form(f)).abs())
            .fold(0.0, f64::max),
        Err(_) => f64::INFINITY,
    }
}
