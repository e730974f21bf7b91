//! Simulation output values.

use std::cmp::Ordering;

/// Value a re-priced option is compared against.
///
/// The 1-D sweeps measure P&L against the premium actually paid; the
/// heat-map measures it against today's theoretical value of the held
/// contract. The two give different numbers for the same scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum PnLAnchor {
    /// Premium paid per unit. Always positive once validated.
    Premium(f64),
    /// Theoretical value today at the current spot and days to expiry.
    Baseline(f64),
}

impl PnLAnchor {
    /// Anchor value per unit.
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            PnLAnchor::Premium(v) | PnLAnchor::Baseline(v) => v,
        }
    }

    /// Percent change from the anchor to `option_price`.
    ///
    /// A baseline that is not positive (a worthless option) reports 0.
    #[inline]
    pub fn percent_change(&self, option_price: f64) -> f64 {
        let anchor = self.value();
        match self {
            PnLAnchor::Premium(_) => (option_price - anchor) / anchor * 100.0,
            PnLAnchor::Baseline(_) if anchor > 0.0 => (option_price - anchor) / anchor * 100.0,
            PnLAnchor::Baseline(_) => 0.0,
        }
    }
}

/// Which input a series varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SweepAxis {
    /// Underlying price varies, time is fixed.
    Price,
    /// Days to expiry vary, price is fixed.
    Time,
}

/// One re-priced scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationPoint {
    /// Hypothetical underlying price.
    pub stock_price: f64,
    /// Calendar days remaining.
    pub days_to_expiry: f64,
    /// Model value per unit.
    pub option_price: f64,
    /// P&L in dollars across the whole position.
    pub dollar_pnl: f64,
    /// P&L relative to the anchor, in percent.
    pub percent_pnl: f64,
    /// Underlying move from the current spot, in percent.
    pub price_change_percent: f64,
}

impl SimulationPoint {
    /// Builds a point from a re-priced value.
    ///
    /// # Arguments
    ///
    /// * `stock_price` - Hypothetical underlying price
    /// * `days_to_expiry` - Days remaining at this point
    /// * `option_price` - Model value at this point
    /// * `anchor` - Value the P&L is measured against
    /// * `scale` - Multiplier times contract count
    /// * `spot` - Current underlying price
    pub fn new(
        stock_price: f64,
        days_to_expiry: f64,
        option_price: f64,
        anchor: PnLAnchor,
        scale: f64,
        spot: f64,
    ) -> Self {
        Self {
            stock_price,
            days_to_expiry,
            option_price,
            dollar_pnl: (option_price - anchor.value()) * scale,
            percent_pnl: anchor.percent_change(option_price),
            price_change_percent: (stock_price - spot) / spot * 100.0,
        }
    }

    /// Whether this point is a gain.
    #[inline]
    pub fn is_gain(&self) -> bool {
        self.dollar_pnl > 0.0
    }

    /// Whether this point is a loss.
    #[inline]
    pub fn is_loss(&self) -> bool {
        self.dollar_pnl < 0.0
    }
}

pub(crate) fn by_dollar_pnl(a: &&SimulationPoint, b: &&SimulationPoint) -> Ordering {
    a.dollar_pnl.total_cmp(&b.dollar_pnl)
}

/// Ordered output of a 1-D sweep.
///
/// Price sweeps are sorted by increasing `stock_price`; time sweeps by
/// decreasing `days_to_expiry`, ending at expiry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSeries {
    axis: SweepAxis,
    anchor: PnLAnchor,
    points: Vec<SimulationPoint>,
}

impl SimulationSeries {
    /// Wraps already-ordered points.
    pub fn new(axis: SweepAxis, anchor: PnLAnchor, points: Vec<SimulationPoint>) -> Self {
        Self {
            axis,
            anchor,
            points,
        }
    }

    /// A series with no points, returned for rejected inputs.
    pub fn empty(axis: SweepAxis, anchor: PnLAnchor) -> Self {
        Self::new(axis, anchor, Vec::new())
    }

    /// The swept input.
    #[inline]
    pub fn axis(&self) -> SweepAxis {
        self.axis
    }

    /// The P&L anchor.
    #[inline]
    pub fn anchor(&self) -> PnLAnchor {
        self.anchor
    }

    /// Points in sweep order.
    #[inline]
    pub fn points(&self) -> &[SimulationPoint] {
        &self.points
    }

    /// Consumes the series.
    pub fn into_points(self) -> Vec<SimulationPoint> {
        self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates points in sweep order.
    pub fn iter(&self) -> std::slice::Iter<'_, SimulationPoint> {
        self.points.iter()
    }

    /// Point with the highest dollar P&L.
    pub fn best(&self) -> Option<&SimulationPoint> {
        self.points.iter().max_by(by_dollar_pnl)
    }

    /// Point with the lowest dollar P&L.
    pub fn worst(&self) -> Option<&SimulationPoint> {
        self.points.iter().min_by(by_dollar_pnl)
    }

    /// Point whose underlying price is closest to `price`.
    pub fn point_nearest(&self, price: f64) -> Option<&SimulationPoint> {
        self.points.iter().min_by(|a, b| {
            (a.stock_price - price)
                .abs()
                .total_cmp(&(b.stock_price - price).abs())
        })
    }
}

impl<'a> IntoIterator for &'a SimulationSeries {
    type Item = &'a SimulationPoint;
    type IntoIter = std::slice::Iter<'a, SimulationPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
