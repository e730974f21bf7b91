//! End-to-end checks of the reference scenarios across kernel and
//! simulation layer.

use approx::assert_relative_eq;
use pricer_core::types::{ContractSpec, MarketState, OptionType};
use pricer_models::analytical::{greeks_for, price_contract};
use pricer_models::instruments::Position;
use pricer_risk::grid::{build_heatmap, HeatmapRequest, PnLSeverity};
use pricer_risk::metrics::PayoffProfile;
use pricer_risk::simulation::{generate_pnl_simulation, PriceSweepRequest};

fn thirty_day(option_type: OptionType) -> (MarketState, ContractSpec) {
    let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
    let contract = ContractSpec::from_days(100.0, option_type, 0.25, 30.0).unwrap();
    (market, contract)
}

// ============================================================================
// Kernel
// ============================================================================

#[test]
fn test_thirty_day_at_the_money_pair() {
    let (market, call) = thirty_day(OptionType::Call);
    let (_, put) = thirty_day(OptionType::Put);

    let call_greeks = greeks_for(&market, &call);
    let put_price = price_contract(&market, &put);

    assert_relative_eq!(call_greeks.price, 3.0418, epsilon = 1e-3);
    assert_relative_eq!(call_greeks.delta, 0.5348, epsilon = 1e-3);
    assert_relative_eq!(put_price, 2.6726, epsilon = 1e-3);

    let carry = 100.0 - 100.0 * (-0.045_f64 * 30.0 / 365.0).exp();
    assert_relative_eq!(call_greeks.price - put_price, carry, epsilon = 1e-9);
}

#[test]
fn test_expired_in_the_money_call() {
    let market = MarketState::new(105.0, 0.045, 0.0).unwrap();
    let call = ContractSpec::new(100.0, OptionType::Call, 0.25, 0.0).unwrap();
    let greeks = greeks_for(&market, &call);

    assert_eq!(greeks.price, 5.0);
    assert_eq!(greeks.delta, 1.0);
    assert_eq!(greeks.gamma, 0.0);
    assert_eq!(greeks.theta, 0.0);
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_five_dollar_call_extremes() {
    let (_, call) = thirty_day(OptionType::Call);
    let profile = PayoffProfile::for_position(&Position::new(call, 5.0).unwrap());

    assert_eq!(profile.max_loss, -500.0);
    assert_eq!(profile.max_profit, f64::INFINITY);
    assert_eq!(profile.breakeven, 105.0);
}

#[test]
fn test_sweep_and_grid_use_different_anchors() {
    let (market, call) = thirty_day(OptionType::Call);
    let position = Position::new(call, 5.0).unwrap();

    let sweep = generate_pnl_simulation(&PriceSweepRequest::from_position(&position, &market));
    let at_spot = sweep.point_nearest(100.0).unwrap();
    assert_relative_eq!(at_spot.dollar_pnl, (3.0418 - 5.0) * 100.0, epsilon = 0.1);

    let grid = build_heatmap(&HeatmapRequest::new(position, market).with_rows(vec![100.0]));
    let now = grid.cell(0, 0).unwrap();
    assert_eq!(now.point.dollar_pnl, 0.0);
    assert_eq!(now.severity, PnLSeverity::Flat);
}
