//! Black command implementation
//!
//! Prices a forward put and prints AD Greeks next to their closed forms.

use std::io::Write;

use dual_models::analytical::{BlackForward, Greeks};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::Result;

/// Model inputs after config and flag merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackRequest {
    pub forward: f64,
    pub volatility: f64,
    pub strike: f64,
}

/// Everything the command prints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackReport {
    pub forward: f64,
    pub volatility: f64,
    pub strike: f64,
    pub moneyness: f64,
    pub call: f64,
    pub ad: Greeks<f64>,
    pub closed_form: Greeks<f64>,
}

/// Run the black command
pub fn run(request: &BlackRequest, format: OutputFormat, precision: usize) -> Result<()> {
    info!(
        forward = request.forward,
        volatility = request.volatility,
        strike = request.strike,
        "Pricing forward put"
    );

    let report = evaluate(request)?;
    let text = render(&report, format, precision)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", text)?;

    info!("Pricing complete");
    Ok(())
}

/// Build the report for a request
pub fn evaluate(request: &BlackRequest) -> Result<BlackReport> {
    let model = BlackForward::new(request.volatility, request.strike)?;
    let f = model.validate_forward(request.forward)?;

    let z = model.moneyness(f);
    debug!(z, "Moneyness");

    let ad = model.greeks(f);
    let closed_form = Greeks {
        price: model.put(f),
        delta: model.put_delta_closed_form(f),
        gamma: model.put_gamma_closed_form(f),
        vega: model.put_vega_closed_form(f),
    };
    debug!(?ad, ?closed_form, "Greeks");

    Ok(BlackReport {
        forward: f,
        volatility: request.volatility,
        strike: request.strike,
        moneyness: z,
        call: model.call(f),
        ad,
        closed_form,
    })
}

/// Render a report as a table or JSON
pub fn render(report: &BlackReport, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report, precision)),
    }
}

fn render_table(report: &BlackReport, precision: usize) -> String {
    let p = precision;
    let w = p + 8;
    let mut lines = vec![
        format!(
            "Black forward put  f = {}  s = {}  k = {}  z = {:.p$}",
            report.forward, report.volatility, report.strike, report.moneyness
        ),
        format!("{:<8}{:>w$}{:>w$}{:>w$}", "", "AD", "closed form", "abs diff"),
    ];

    let rows = [
        ("price", report.ad.price, report.closed_form.price),
        ("delta", report.ad.delta, report.closed_form.delta),
        ("gamma", report.ad.gamma, report.closed_form.gamma),
        ("vega", report.ad.vega, report.closed_form.vega),
    ];
    for (name, ad, exact) in rows {
        lines.push(format!(
            "{:<8}{:>w$.p$}{:>w$.p$}{:>w$.2e}",
            name,
            ad,
            exact,
            (ad - exact).abs()
        ));
    }
    lines.push(format!("{:<8}{:>w$.p$}", "call", report.call));

    lines.join("\n")
}
