//! Evidence aggregate.

use chrono::NaiveDate;
use serde::Serialize;

use super::observed::{AbsenceReason, Observed};
use crate::domain::options_analytics::{
    OptionContract, OptionsAnalytics, SqueezeInputs, SqueezeScore, squeeze_score,
};
use crate::domain::shared::Ticker;
use crate::domain::volatility_regime::{VolatilityRegime, classify};

/// Latest price snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEvidence {
    /// Last trade price.
    pub last: Observed<f64>,
    /// Previous session close.
    pub previous_close: Observed<f64>,
    /// Session volume.
    pub day_volume: Observed<f64>,
    /// Session VWAP.
    pub vwap: Observed<f64>,
    /// Average daily volume (optional upstream field).
    pub avg_volume: Observed<f64>,
}

impl PriceEvidence {
    /// Percent change from the previous close.
    pub fn day_change_pct(&self) -> Option<f64> {
        let last = self.last.get()?;
        let prev = self.previous_close.get().filter(|p| *p > 0.0)?;
        Some((last - prev) / prev * 100.0)
    }
}

/// State of the options chain for one ticker.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "contracts")]
pub enum OptionsState {
    /// Chain fetched and normalized.
    Ready(Vec<OptionContract>),
    /// Upstream answered: the ticker has no listed options.
    NoOptions,
    /// Chain fetch failed; options evidence is outstanding.
    #[default]
    Pending,
}

impl OptionsState {
    /// Check whether a chain is ready.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check whether the chain is still pending.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Contracts, empty unless ready.
    pub fn contracts(&self) -> &[OptionContract] {
        match self {
            Self::Ready(contracts) => contracts,
            Self::NoOptions | Self::Pending => &[],
        }
    }

    /// Absence reason for chain-derived fields.
    const fn derived_absence(&self) -> AbsenceReason {
        match self {
            Self::Pending => AbsenceReason::Unavailable,
            Self::Ready(_) | Self::NoOptions => AbsenceReason::NotReported,
        }
    }
}

/// Flow confirmation fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEvidence {
    /// Options-pressure ratio from the chain.
    pub ratio_opi: Observed<f64>,
    /// Call/put day-volume ratio from the chain.
    pub call_put_volume_ratio: Observed<f64>,
    /// Dark-pool share of volume, percent.
    pub dark_pool_pct: Observed<f64>,
}

/// Macro backdrop shared across tickers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroEvidence {
    /// Broad index change, percent.
    pub index_change_pct: Observed<f64>,
    /// Volatility index level.
    pub volatility_index: Observed<f64>,
    /// Rate proxy change.
    pub rate_proxy_change: Observed<f64>,
    /// Dollar index proxy change.
    pub dollar_index_change: Observed<f64>,
}

/// Short-interest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortEvidence {
    /// Short interest, percent of float.
    pub short_interest_pct: Observed<f64>,
    /// Days to cover.
    pub days_to_cover: Observed<f64>,
    /// Short interest change, percentage points.
    pub short_interest_delta: Observed<f64>,
    /// Short volume, percent of volume.
    pub short_volume_pct: Observed<f64>,
}

impl ShortEvidence {
    /// Inputs for the squeeze score.
    pub const fn squeeze_inputs(&self) -> SqueezeInputs {
        SqueezeInputs {
            short_interest_pct: self.short_interest_pct.get(),
            days_to_cover: self.days_to_cover.get(),
            short_interest_delta: self.short_interest_delta.get(),
            short_volume_pct: self.short_volume_pct.get(),
        }
    }
}

/// Typed, presence-tagged record of everything known about one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// Ticker this evidence belongs to.
    pub ticker: Ticker,
    /// Trading session used for DTE.
    pub as_of: NaiveDate,
    /// Underlying price used for analytics.
    pub spot: Observed<f64>,
    /// Price snapshot.
    pub price: PriceEvidence,
    /// Options chain state.
    pub options: OptionsState,
    /// Flow fields.
    pub flow: FlowEvidence,
    /// Macro fields.
    #[serde(rename = "macro")]
    pub macro_backdrop: MacroEvidence,
    /// Short-interest fields.
    pub short: ShortEvidence,
    /// Chain entries skipped during normalization.
    pub malformed_contracts: usize,
    /// Chain analytics (zero-filled when unavailable).
    pub analytics: OptionsAnalytics,
    /// Squeeze score from the short snapshot.
    pub squeeze: SqueezeScore,
    /// Volatility regime.
    pub regime: VolatilityRegime,
}

impl Evidence {
    /// Derive the chain-dependent fields from `analytics`.
    ///
    /// Flow ratios are only present when the chain contributed contracts.
    pub fn with_analytics(mut self, analytics: OptionsAnalytics) -> Self {
        let absence = self.options.derived_absence();
        let chain_backed = self.options.is_ready() && !analytics.is_empty();

        self.flow.ratio_opi = if chain_backed {
            Observed::finite(Some(analytics.pressure.ratio))
        } else {
            Observed::Absent(absence)
        };
        self.flow.call_put_volume_ratio = if chain_backed {
            Observed::from_option(analytics.call_put_volume_ratio(), AbsenceReason::NotReported)
        } else {
            Observed::Absent(absence)
        };

        self.squeeze = squeeze_score(&self.short.squeeze_inputs());
        self.regime = classify(&analytics, self.squeeze, self.spot.or_zero());
        self.analytics = analytics;
        self
    }

    /// Underlying price, if known.
    pub const fn spot_price(&self) -> Option<f64> {
        self.spot.get()
    }
}
