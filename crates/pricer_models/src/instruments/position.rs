//! Long option positions.
//!
//! A [`Position`] is a held contract plus its cost basis. Dollar P&L scales
//! the per-unit price change by `multiplier × num_contracts`.

use pricer_core::types::{ContractSpec, OptionType};

use super::error::InstrumentError;

/// Standard equity option multiplier (shares per contract).
pub const DEFAULT_MULTIPLIER: f64 = 100.0;

/// A long position in a single listed option.
///
/// # Examples
/// ```
/// use pricer_core::types::{ContractSpec, OptionType};
/// use pricer_models::instruments::Position;
///
/// let contract = ContractSpec::from_days(100.0, OptionType::Call, 0.25, 30.0).unwrap();
/// let position = Position::new(contract, 5.0).unwrap().with_contracts(2).unwrap();
///
/// assert_eq!(position.scale(), 200.0);
/// assert_eq!(position.cost_basis(), 1_000.0);
/// assert_eq!(position.dollar_pnl_at(7.5), 500.0);
/// assert_eq!(position.percent_pnl_at(7.5), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPosition"))]
pub struct Position {
    contract: ContractSpec,
    premium_paid: f64,
    num_contracts: u32,
    multiplier: f64,
}

impl Position {
    /// Opens a one-lot position at `premium_paid` per unit.
    ///
    /// # Errors
    /// `InstrumentError::InvalidPremium` unless `premium_paid` is positive
    /// and finite. Positions without a cost basis have no defined percent
    /// P&L and are rejected here rather than reported as 0 %.
    pub fn new(contract: ContractSpec, premium_paid: f64) -> Result<Self, InstrumentError> {
        if !(premium_paid.is_finite() && premium_paid > 0.0) {
            return Err(InstrumentError::InvalidPremium {
                premium: premium_paid,
            });
        }
        Ok(Self {
            contract,
            premium_paid,
            num_contracts: 1,
            multiplier: DEFAULT_MULTIPLIER,
        })
    }

    /// Sets the number of contracts held.
    pub fn with_contracts(mut self, num_contracts: u32) -> Result<Self, InstrumentError> {
        if num_contracts == 0 {
            return Err(InstrumentError::InvalidContracts {
                count: num_contracts,
            });
        }
        self.num_contracts = num_contracts;
        Ok(self)
    }

    /// Sets the contract multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Result<Self, InstrumentError> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(InstrumentError::InvalidMultiplier { multiplier });
        }
        self.multiplier = multiplier;
        Ok(self)
    }

    /// The held contract.
    #[inline]
    pub fn contract(&self) -> &ContractSpec {
        &self.contract
    }

    /// Strike of the held contract.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.contract.strike()
    }

    /// Kind of the held contract.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.contract.option_type()
    }

    /// Premium paid per unit.
    #[inline]
    pub fn premium_paid(&self) -> f64 {
        self.premium_paid
    }

    /// Number of contracts.
    #[inline]
    pub fn num_contracts(&self) -> u32 {
        self.num_contracts
    }

    /// Units per contract.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Dollar value of a one-unit price move across the whole position.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.multiplier * self.num_contracts as f64
    }

    /// Total premium paid.
    #[inline]
    pub fn cost_basis(&self) -> f64 {
        self.premium_paid * self.scale()
    }

    /// Dollar P&L if the option were worth `option_price` per unit.
    #[inline]
    pub fn dollar_pnl_at(&self, option_price: f64) -> f64 {
        (option_price - self.premium_paid) * self.scale()
    }

    /// Percent return on premium if the option were worth `option_price`.
    #[inline]
    pub fn percent_pnl_at(&self, option_price: f64) -> f64 {
        (option_price - self.premium_paid) / self.premium_paid * 100.0
    }
}

/// Wire form of [`Position`], rebuilt through the checked setters.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPosition {
    contract: ContractSpec,
    premium_paid: f64,
    num_contracts: u32,
    multiplier: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPosition> for Position {
    type Error = InstrumentError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.contract, raw.premium_paid)?
            .with_contracts(raw.num_contracts)?
            .with_multiplier(raw.multiplier)
    }
}
