//! Price command implementation
//!
//! Values a single contract and reports its Greeks.

use std::io::{self, Write};

use pricer_core::types::OptionType;
use pricer_models::analytical::BlackScholes;
use serde::Serialize;
use tracing::info;

use super::output::{write_csv, write_json, Table};
use super::ContractArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Fair value and sensitivities of one contract
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub days_to_expiry: u32,
    pub volatility: f64,
    pub rate: f64,
    pub dividend_yield: f64,
    pub price: f64,
    pub intrinsic: f64,
    pub time_value: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Per calendar day
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Prices the contract described by `args`.
pub fn evaluate(args: &ContractArgs, config: &CliConfig) -> Result<PriceReport> {
    let days = args.days_to_expiry()?;
    let market = args.market(config)?;
    let contract = args.contract(days)?;

    let model = BlackScholes::from_market(&market, &contract);
    let greeks = model.greeks(contract.strike(), contract.expiry(), contract.option_type());
    let intrinsic = model.intrinsic(contract.strike(), contract.option_type());

    Ok(PriceReport {
        option_type: contract.option_type(),
        spot: market.spot(),
        strike: contract.strike(),
        days_to_expiry: days,
        volatility: contract.volatility(),
        rate: market.rate(),
        dividend_yield: market.dividend_yield(),
        price: greeks.price,
        intrinsic,
        time_value: greeks.price - intrinsic,
        delta: greeks.delta,
        gamma: greeks.gamma,
        theta: greeks.theta,
        vega: greeks.vega,
        rho: greeks.rho,
    })
}

/// Writes `report` in the requested format.
pub fn render<W: Write>(report: &PriceReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, [report]),
        OutputFormat::Table => {
            let mut table = Table::new(&["Metric", "Value"]);
            let rows = [
                ("Price", report.price),
                ("Intrinsic", report.intrinsic),
                ("Time value", report.time_value),
                ("Delta", report.delta),
                ("Gamma", report.gamma),
                ("Theta/day", report.theta),
                ("Vega", report.vega),
                ("Rho", report.rho),
            ];
            for (name, value) in rows {
                table.add_row(vec![name.to_string(), format!("{value:.4}")]);
            }
            writeln!(
                out,
                "{} K={} S={} {}d vol={}",
                report.option_type,
                report.strike,
                report.spot,
                report.days_to_expiry,
                report.volatility
            )?;
            table.write_to(out)
        }
    }
}

/// Run the price command
pub fn run(args: &ContractArgs, config: &CliConfig) -> Result<()> {
    info!("Pricing {} K={} S={}", args.option_type, args.strike, args.spot);

    let report = evaluate(args, config)?;
    info!("  Price: {:.4}", report.price);

    render(&report, config.output_format, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::contract_args;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atm_call_thirty_days() {
        let report = evaluate(&contract_args(OptionType::Call, 30), &CliConfig::default()).unwrap();

        assert_relative_eq!(report.price, 3.0418, epsilon = 1e-3);
        assert_relative_eq!(report.delta, 0.5348, epsilon = 1e-3);
        assert_eq!(report.intrinsic, 0.0);
        assert_relative_eq!(report.time_value, report.price);
        assert!(report.theta < 0.0);
    }

    #[test]
    fn test_expired_put_is_intrinsic() {
        let args = ContractArgs {
            spot: 90.0,
            ..contract_args(OptionType::Put, 0)
        };
        let report = evaluate(&args, &CliConfig::default()).unwrap();

        assert_eq!(report.price, 10.0);
        assert_eq!(report.time_value, 0.0);
        assert_eq!(report.delta, -1.0);
        assert_eq!(report.gamma, 0.0);
    }

    #[test]
    fn test_render_formats() {
        let report = evaluate(&contract_args(OptionType::Call, 30), &CliConfig::default()).unwrap();

        let mut json = Vec::new();
        render(&report, OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["option_type"], "call");
        assert_eq!(value["days_to_expiry"], 30);

        let mut csv = Vec::new();
        render(&report, OutputFormat::Csv, &mut csv).unwrap();
        let text = String::from_utf8(csv).unwrap();
        assert!(text.starts_with("option_type,spot,strike,days_to_expiry"));
        assert_eq!(text.lines().count(), 2);

        let mut table = Vec::new();
        render(&report, OutputFormat::Table, &mut table).unwrap();
        assert!(String::from_utf8(table).unwrap().contains("Theta/day"));
    }
}
