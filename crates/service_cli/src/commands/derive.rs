//! Derive command implementation
//!
//! Differentiates a stock function with the derivative operators and
//! compares against its analytic derivative.

use std::io::Write;

use clap::ValueEnum;
use dual_core::ad::{derivative, lifted, second_derivative};
use dual_core::types::Dual;
use dual_models::analytical::{lifted_norm_cdf, norm_pdf};
use num_traits::Float;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::{CliError, Result};

/// Functions available to `derive`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    /// x²
    Sq,
    /// x³
    Cube,
    /// eˣ
    Exp,
    /// ln x
    Ln,
    /// sin x
    Sin,
    /// standard normal CDF
    NormCdf,
}

/// Derivative order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    First,
    Second,
}

impl Order {
    fn as_u8(self) -> u8 {
        match self {
            Order::First => 1,
            Order::Second => 2,
        }
    }
}

impl FunctionKind {
    /// Name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Sq => "sq",
            FunctionKind::Cube => "cube",
            FunctionKind::Exp => "exp",
            FunctionKind::Ln => "ln",
            FunctionKind::Sin => "sin",
            FunctionKind::NormCdf => "norm-cdf",
        }
    }

    /// Evaluates the function on dual numbers of any nesting depth.
    ///
    /// `ln` and the normal CDF go through their lifts.
    pub fn apply<X: Float>(self, x: Dual<X>) -> Dual<X> {
        match self {
            FunctionKind::Sq => x * x,
            FunctionKind::Cube => x * x * x,
            FunctionKind::Exp => x.exp(),
            FunctionKind::Ln => lifted::ln::<X>().apply(x),
            FunctionKind::Sin => x.sin(),
            FunctionKind::NormCdf => lifted_norm_cdf::<X>().apply(x),
        }
    }

    /// Analytic derivative of the requested order.
    pub fn analytic(self, x: f64, order: Order) -> f64 {
        match (self, order) {
            (FunctionKind::Sq, Order::First) => 2.0 * x,
            (FunctionKind::Sq, Order::Second) => 2.0,
            (FunctionKind::Cube, Order::First) => 3.0 * x * x,
            (FunctionKind::Cube, Order::Second) => 6.0 * x,
            (FunctionKind::Exp, _) => x.exp(),
            (FunctionKind::Ln, Order::First) => 1.0 / x,
            (FunctionKind::Ln, Order::Second) => -1.0 / (x * x),
            (FunctionKind::Sin, Order::First) => x.cos(),
            (FunctionKind::Sin, Order::Second) => -x.sin(),
            (FunctionKind::NormCdf, Order::First) => norm_pdf(x),
            (FunctionKind::NormCdf, Order::Second) => -x * norm_pdf(x),
        }
    }

    fn check_domain(self, x: f64) -> Result<()> {
        if !x.is_finite() {
            return Err(CliError::InvalidArgument(format!(
                "Evaluation point must be finite, got {}",
                x
            )));
        }
        if self == FunctionKind::Ln && x <= 0.0 {
            return Err(CliError::InvalidArgument(format!(
                "ln is only defined for x > 0, got {}",
                x
            )));
        }
        Ok(())
    }
}

/// Everything the command prints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeriveReport {
    pub function: FunctionKind,
    pub at: f64,
    pub order: u8,
    pub value: f64,
    pub ad: f64,
    pub analytic: f64,
    pub abs_diff: f64,
}

/// Run the derive command
pub fn run(
    function: FunctionKind,
    at: f64,
    order: Order,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    info!(function = function.name(), at, order = order.as_u8(), "Differentiating");

    let report = evaluate(function, at, order)?;
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => render_table(&report, precision),
    };

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Build the report for one function, point and order
pub fn evaluate(function: FunctionKind, at: f64, order: Order) -> Result<DeriveReport> {
    function.check_domain(at)?;

    let value = function.apply(Dual::constant(at)).re;
    let ad = match order {
        Order::First => derivative(|x: Dual<f64>| function.apply(x))(at),
        Order::Second => second_derivative(|x: Dual<Dual<f64>>| function.apply(x))(at),
    };
    let analytic = function.analytic(at, order);
    debug!(value, ad, analytic, "Derivative evaluated");

    Ok(DeriveReport {
        function,
        at,
        order: order.as_u8(),
        value,
        ad,
        analytic,
        abs_diff: (ad - analytic).abs(),
    })
}

fn render_table(report: &DeriveReport, precision: usize) -> String {
    let p = precision;
    let prime = if report.order == 2 { "''" } else { "'" };
    [
        format!("f = {}, x = {}", report.function.name(), report.at),
        format!("f(x)       {:.p$}", report.value),
        format!("f{:<2}(x) AD  {:.p$}", prime, report.ad),
        format!("analytic   {:.p$}", report.analytic),
        format!("abs diff   {:.2e}", report.abs_diff),
    ]
    .join("\n")
}
