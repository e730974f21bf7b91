//! Check command implementation
//!
//! Prints the effective configuration and verifies the pricing kernel
//! against a textbook valuation.

use std::io::{self, Write};

use pricer_core::types::{OptionType, PricingError};
use pricer_models::analytical::BlackScholes;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// S = K = 100, r = 5 %, q = 0, σ = 20 %, T = 1y.
const REFERENCE_CALL: f64 = 10.4506;
const REFERENCE_PUT: f64 = 5.5735;
const REFERENCE_TOLERANCE: f64 = 1e-3;

/// Reprices the reference contract and checks put-call parity.
pub fn self_test() -> Result<()> {
    let model = BlackScholes::new(100.0, 0.05, 0.0, 0.2).map_err(PricingError::from)?;
    let call = model.price(100.0, 1.0, OptionType::Call);
    let put = model.price(100.0, 1.0, OptionType::Put);

    if (call - REFERENCE_CALL).abs() > REFERENCE_TOLERANCE
        || (put - REFERENCE_PUT).abs() > REFERENCE_TOLERANCE
    {
        return Err(PricingError::NumericalInstability(format!(
            "reference valuation drifted: call {call:.4}, put {put:.4}"
        ))
        .into());
    }

    let parity = call - put - (100.0 - 100.0 * (-0.05f64).exp());
    if parity.abs() > 1e-8 {
        return Err(PricingError::NumericalInstability(format!(
            "put-call parity residual {parity:e}"
        ))
        .into());
    }

    Ok(())
}

/// Writes the configuration summary and self-test outcome to `out`.
pub fn report<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    writeln!(out, "optiscope {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "  log level:       {}", config.log_level)?;
    writeln!(out, "  output format:   {}", config.output_format)?;
    writeln!(out, "  risk-free rate:  {}", config.risk_free_rate)?;
    writeln!(out, "  dividend yield:  {}", config.dividend_yield)?;
    writeln!(out, "  multiplier:      {}", config.multiplier)?;
    writeln!(out, "  price range:     ±{}%", config.price_range * 100.0)?;
    writeln!(out, "  heat-map band:   ±{}%", config.otm_percentage)?;

    self_test()?;
    writeln!(out, "  pricing kernel:  ok")?;
    Ok(())
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    report(config, &mut io::stdout().lock())?;
    info!("All checks passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes() {
        assert!(self_test().is_ok());
    }

    #[test]
    fn test_report_lists_config() {
        let mut buf = Vec::new();
        report(&CliConfig::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("log level:       warn"));
        assert!(text.contains("multiplier:      100"));
        assert!(text.ends_with("pricing kernel:  ok\n"));
    }
}
