//! Black-Scholes pricing model with continuous dividend yield.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! At `T <= 0` every quantity falls back to the expiry state: price is the
//! intrinsic value, delta is the sign of the intrinsic exposure, and gamma,
//! theta, vega and rho are zero. The analytic branch is never evaluated at
//! `T = 0`.

use num_traits::Float;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{ContractSpec, MarketState, OptionType, DAYS_PER_YEAR};

use super::error::AnalyticalError;

/// Black-Scholes model for European option pricing.
///
/// Holds the market side of the formula (spot, rate, dividend yield,
/// volatility); strike, expiry and option kind are supplied per call so a
/// single model can be swept across a strike ladder.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

/// Price and analytic sensitivities for one contract.
///
/// `theta` is expressed per calendar day; `vega` is per unit of volatility
/// (1.00 = 100 vol points) and `rho` per unit of rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T> {
    /// Theoretical value
    pub price: T,
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂t per calendar day
    pub theta: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂r
    pub rho: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `dividend_yield` - Continuous dividend yield (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if spot.is_nan() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if volatility.is_nan() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self::unchecked(spot, rate, dividend_yield, volatility))
    }

    /// Creates a model without validating its inputs.
    ///
    /// # Preconditions
    /// `spot > 0` always, and `volatility > 0` whenever a positive expiry is
    /// priced. Violations produce NaN/infinite results rather than errors;
    /// callers are expected to have rejected such inputs already.
    #[inline]
    pub fn unchecked(spot: T, rate: T, dividend_yield: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Same model with the spot moved to `spot`.
    #[inline]
    pub fn with_spot(self, spot: T) -> Self {
        Self { spot, ..self }
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// # Returns
    /// The d1 term. At `expiry <= 0` returns ±100 (or 0 at the money) as a
    /// stand-in for the infinite limit.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let zero = T::zero();
        let half = T::from(0.5).unwrap();

        if expiry <= zero {
            let large = T::from(100.0).unwrap();
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                zero
            };
        }

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return self.d1(strike, expiry);
        }

        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Intrinsic (exercise-now) value.
    #[inline]
    pub fn intrinsic(&self, strike: T, option_type: OptionType) -> T {
        let payoff = match option_type {
            OptionType::Call => self.spot - strike,
            OptionType::Put => strike - self.spot,
        };
        payoff.max(T::zero())
    }

    /// Computes European call option price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(105.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// // At expiry the call is worth its intrinsic value
    /// assert_eq!(bs.price_call(100.0, 0.0), 5.0);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return self.intrinsic(strike, OptionType::Call);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let carry = (-self.dividend_yield * expiry).exp();

        self.spot * carry * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return self.intrinsic(strike, OptionType::Put);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let carry = (-self.dividend_yield * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * carry * norm_cdf(-d1)
    }

    /// Prices a call or put.
    #[inline]
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Model value in excess of intrinsic value.
    ///
    /// Can be slightly negative for deep in-the-money European puts (and
    /// calls under a high dividend yield).
    #[inline]
    pub fn time_value(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        self.price(strike, expiry, option_type) - self.intrinsic(strike, option_type)
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    ///
    /// At expiry returns 1 for an in-the-money call, -1 for an
    /// in-the-money put, and 0 otherwise.
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let one = T::one();
        let zero = T::zero();

        if expiry <= zero {
            return match option_type {
                OptionType::Call if self.spot > strike => one,
                OptionType::Put if self.spot < strike => -one,
                _ => zero,
            };
        }

        let carry = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));

        match option_type {
            OptionType::Call => carry * n_d1,
            OptionType::Put => carry * (n_d1 - one),
        }
    }

    /// Computes Gamma (∂²V/∂S²).
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T), the same for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let carry = (-self.dividend_yield * expiry).exp();

        carry * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = S·e^(-qT)·√T·φ(d₁), the same for calls and puts.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let carry = (-self.dividend_yield * expiry).exp();

        self.spot * carry * expiry.sqrt() * norm_pdf(d1)
    }

    /// Computes annualised Theta (∂V/∂t).
    ///
    /// - Call Theta = -(S·e^(-qT)·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put Theta = -(S·e^(-qT)·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    ///
    /// Rate of change in value as calendar time passes, typically negative.
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let sqrt_t = expiry.sqrt();
        let discount = (-self.rate * expiry).exp();
        let carry = (-self.dividend_yield * expiry).exp();
        let two = T::from(2.0).unwrap();

        // Time-value erosion, shared by calls and puts
        let erosion = -(self.spot * carry * self.volatility * norm_pdf(d1)) / (two * sqrt_t);

        match option_type {
            OptionType::Call => {
                erosion - self.rate * strike * discount * norm_cdf(d2)
                    + self.dividend_yield * self.spot * carry * norm_cdf(d1)
            }
            OptionType::Put => {
                erosion + self.rate * strike * discount * norm_cdf(-d2)
                    - self.dividend_yield * self.spot * carry * norm_cdf(-d1)
            }
        }
    }

    /// Computes Theta per calendar day (annualised theta / 365).
    #[inline]
    pub fn theta_per_day(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        self.theta(strike, expiry, option_type) / T::from(DAYS_PER_YEAR).unwrap()
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }

        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => strike * expiry * discount * norm_cdf(d2),
            OptionType::Put => -strike * expiry * discount * norm_cdf(-d2),
        }
    }

    /// Computes price and all Greeks in one call.
    pub fn greeks(&self, strike: T, expiry: T, option_type: OptionType) -> Greeks<T> {
        Greeks {
            price: self.price(strike, expiry, option_type),
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            theta: self.theta_per_day(strike, expiry, option_type),
            vega: self.vega(strike, expiry),
            rho: self.rho(strike, expiry, option_type),
        }
    }
}

impl BlackScholes<f64> {
    /// Builds the model from validated market and contract snapshots.
    ///
    /// Both inputs guarantee positive spot and volatility, so no further
    /// checks are needed.
    #[inline]
    pub fn from_market(market: &MarketState, contract: &ContractSpec) -> Self {
        Self::unchecked(
            market.spot(),
            market.rate(),
            market.dividend_yield(),
            contract.volatility(),
        )
    }
}

/// Theoretical value of `contract` in `market`.
///
/// # Examples
/// ```
/// use pricer_core::types::{ContractSpec, MarketState, OptionType};
/// use pricer_models::analytical::black_scholes::price_contract;
///
/// let market = MarketState::new(100.0, 0.045, 0.0).unwrap();
/// let call = ContractSpec::from_days(100.0, OptionType::Call, 0.25, 30.0).unwrap();
/// let price = price_contract(&market, &call);
/// assert!((price - 3.04).abs() < 0.01);
/// ```
#[inline]
pub fn price_contract(market: &MarketState, contract: &ContractSpec) -> f64 {
    BlackScholes::from_market(market, contract).price(
        contract.strike(),
        contract.expiry(),
        contract.option_type(),
    )
}

/// Price and Greeks of `contract` in `market`.
pub fn greeks_for(market: &MarketState, contract: &ContractSpec) -> Greeks<f64> {
    BlackScholes::from_market(market, contract).greeks(
        contract.strike(),
        contract.expiry(),
        contract.option_type(),
    )
}

/// Raw kernel price.
///
/// No validation: `spot > 0`, `strike > 0` and (for `expiry > 0`)
/// `volatility > 0` are the caller's responsibility.
#[inline]
pub fn bs_price(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    option_type: OptionType,
) -> f64 {
    BlackScholes::unchecked(spot, rate, dividend_yield, volatility).price(strike, expiry, option_type)
}

/// Raw kernel delta. Same preconditions as [`bs_price`].
#[inline]
pub fn bs_delta(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    option_type: OptionType,
) -> f64 {
    BlackScholes::unchecked(spot, rate, dividend_yield, volatility).delta(strike, expiry, option_type)
}

/// Raw kernel gamma. Same preconditions as [`bs_price`].
#[inline]
pub fn bs_gamma(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
) -> f64 {
    BlackScholes::unchecked(spot, rate, dividend_yield, volatility).gamma(strike, expiry)
}

/// Raw kernel theta per calendar day. Same preconditions as [`bs_price`].
#[inline]
pub fn bs_theta(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    option_type: OptionType,
) -> f64 {
    BlackScholes::unchecked(spot, rate, dividend_yield, volatility)
        .theta_per_day(strike, expiry, option_type)
}
