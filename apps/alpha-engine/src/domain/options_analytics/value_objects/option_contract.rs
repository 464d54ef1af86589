//! Option Contract Value Object

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Shares per equity option contract.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Contract type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl ContractType {
    /// Parse a raw upstream contract type (`call`, `C`, `PUT`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Some(Self::Call),
            "put" | "p" => Some(Self::Put),
            _ => None,
        }
    }

    /// Dealer-gamma sign convention: calls positive, puts negative.
    #[must_use]
    pub const fn gamma_sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Last trade print for a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastTrade {
    /// Trade price.
    pub price: f64,
    /// Trade size in contracts.
    pub size: u64,
    /// Trade time.
    pub timestamp: Option<DateTime<Utc>>,
}

/// One tradable option in an immutable chain snapshot.
///
/// Greeks and implied volatility are optional; a contract built through the
/// `with_*` methods never stores a non-finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    strike: Decimal,
    contract_type: ContractType,
    expiration_date: NaiveDate,
    open_interest: u64,
    delta: Option<f64>,
    gamma: Option<f64>,
    implied_volatility: Option<f64>,
    day_volume: u64,
    last_trade: Option<LastTrade>,
}

impl OptionContract {
    /// Create a contract with no greeks, volume or trade data.
    #[must_use]
    pub const fn new(
        strike: Decimal,
        contract_type: ContractType,
        expiration_date: NaiveDate,
        open_interest: u64,
    ) -> Self {
        Self {
            strike,
            contract_type,
            expiration_date,
            open_interest,
            delta: None,
            gamma: None,
            implied_volatility: None,
            day_volume: 0,
            last_trade: None,
        }
    }

    /// Create a call contract.
    #[must_use]
    pub const fn call(strike: Decimal, expiration_date: NaiveDate, open_interest: u64) -> Self {
        Self::new(strike, ContractType::Call, expiration_date, open_interest)
    }

    /// Create a put contract.
    #[must_use]
    pub const fn put(strike: Decimal, expiration_date: NaiveDate, open_interest: u64) -> Self {
        Self::new(strike, ContractType::Put, expiration_date, open_interest)
    }

    /// Attach greeks; non-finite values are dropped.
    #[must_use]
    pub fn with_greeks(mut self, delta: Option<f64>, gamma: Option<f64>) -> Self {
        self.delta = delta.filter(|d| d.is_finite());
        self.gamma = gamma.filter(|g| g.is_finite());
        self
    }

    /// Attach implied volatility (fraction, 0.35 = 35%); non-finite or
    /// negative values are dropped.
    #[must_use]
    pub fn with_implied_volatility(mut self, iv: Option<f64>) -> Self {
        self.implied_volatility = iv.filter(|v| v.is_finite() && *v >= 0.0);
        self
    }

    /// Attach the session's traded volume.
    #[must_use]
    pub const fn with_day_volume(mut self, day_volume: u64) -> Self {
        self.day_volume = day_volume;
        self
    }

    /// Attach the last trade print.
    #[must_use]
    pub fn with_last_trade(mut self, last_trade: Option<LastTrade>) -> Self {
        self.last_trade = last_trade;
        self
    }

    /// Get the strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Strike as a float for ratio math.
    #[must_use]
    pub fn strike_f64(&self) -> f64 {
        self.strike.to_f64().unwrap_or(0.0)
    }

    /// Get the contract type.
    #[must_use]
    pub const fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Check if this is a call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.contract_type, ContractType::Call)
    }

    /// Check if this is a put.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.contract_type, ContractType::Put)
    }

    /// Get the expiration date.
    #[must_use]
    pub const fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Get the open interest.
    #[must_use]
    pub const fn open_interest(&self) -> u64 {
        self.open_interest
    }

    /// Get delta, if reported.
    #[must_use]
    pub const fn delta(&self) -> Option<f64> {
        self.delta
    }

    /// Get gamma, if reported.
    #[must_use]
    pub const fn gamma(&self) -> Option<f64> {
        self.gamma
    }

    /// Get implied volatility as a fraction, if reported.
    #[must_use]
    pub const fn implied_volatility(&self) -> Option<f64> {
        self.implied_volatility
    }

    /// Get the session's traded volume.
    #[must_use]
    pub const fn day_volume(&self) -> u64 {
        self.day_volume
    }

    /// Get the last trade print.
    #[must_use]
    pub const fn last_trade(&self) -> Option<&LastTrade> {
        self.last_trade.as_ref()
    }

    /// Signed dealer gamma exposure: `gamma × OI × 100`, calls positive.
    ///
    /// `None` when the contract carries no finite gamma.
    #[must_use]
    pub fn gex_contribution(&self) -> Option<f64> {
        self.gamma.map(|gamma| {
            self.contract_type.gamma_sign() * gamma * self.open_interest as f64 * CONTRACT_MULTIPLIER
        })
    }

    /// Check whether the strike lies within `band` (fraction) of `spot`.
    #[must_use]
    pub fn is_near(&self, spot: f64, band: f64) -> bool {
        spot > 0.0 && ((self.strike_f64() - spot).abs() / spot) <= band
    }
}
