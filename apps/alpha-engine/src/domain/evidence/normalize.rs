//! Raw snapshot normalization.
//!
//! Upstream payloads arrive as loosely-typed JSON. Each snapshot is decoded
//! through serde into a raw shape whose numeric fields accept numbers or
//! numeric strings, then converted into presence-tagged [`Observed`] fields.
//! Chain entries are decoded one at a time so a single malformed contract is
//! skipped and counted instead of failing the chain.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::evidence::{
    Evidence, FlowEvidence, MacroEvidence, OptionsState, PriceEvidence, ShortEvidence,
};
use super::observed::{AbsenceReason, Observed};
use crate::domain::options_analytics::{
    AnalyticsError, ChainAnalyzer, ContractType, LastTrade, OptionContract, OptionsAnalytics,
    SqueezeScore,
};
use crate::domain::shared::Ticker;
use crate::domain::volatility_regime::VolatilityRegime;

/// Raw upstream payloads for one ticker.
///
/// `Absent(Unavailable)` marks a fetch that failed after retries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSnapshots {
    /// Options chain payload.
    pub chain: Observed<Value>,
    /// Quote snapshot payload.
    pub quote: Observed<Value>,
    /// Macro snapshot payload.
    pub macro_snapshot: Observed<Value>,
    /// Short-interest snapshot payload.
    pub short: Observed<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawNumber {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        }
    }

    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Decimal::try_from(*n).ok(),
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
            Self::Other(_) => None,
        }
    }
}

fn observe(field: Option<&RawNumber>) -> Observed<f64> {
    match field {
        None => Observed::Absent(AbsenceReason::NotReported),
        Some(raw) => match raw.to_f64() {
            Some(v) => Observed::finite(Some(v)),
            None => Observed::Absent(AbsenceReason::Malformed),
        },
    }
}

/// Decode a snapshot object, or return the reason every field is absent.
fn decode<T: for<'de> Deserialize<'de>>(snapshot: &Observed<Value>) -> Result<T, AbsenceReason> {
    match snapshot {
        Observed::Absent(reason) => Err(*reason),
        Observed::Present(Value::Null) => Err(AbsenceReason::NotReported),
        Observed::Present(value) => {
            T::deserialize(value).map_err(|_| AbsenceReason::Malformed)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    #[serde(default, alias = "lastPrice", alias = "last_price", alias = "price")]
    last: Option<RawNumber>,
    #[serde(default, alias = "prevClose", alias = "previous_close", alias = "prev_close")]
    previous_close: Option<RawNumber>,
    #[serde(default, alias = "volume", alias = "day_volume")]
    day_volume: Option<RawNumber>,
    #[serde(default)]
    vwap: Option<RawNumber>,
    #[serde(default, alias = "averageVolume", alias = "avg_volume")]
    avg_volume: Option<RawNumber>,
}

/// Normalize a quote snapshot.
pub fn normalize_quote(snapshot: &Observed<Value>) -> PriceEvidence {
    match decode::<RawQuote>(snapshot) {
        Ok(raw) => PriceEvidence {
            last: observe(raw.last.as_ref()),
            previous_close: observe(raw.previous_close.as_ref()),
            day_volume: observe(raw.day_volume.as_ref()),
            vwap: observe(raw.vwap.as_ref()),
            avg_volume: observe(raw.avg_volume.as_ref()),
        },
        Err(reason) => PriceEvidence {
            last: Observed::Absent(reason),
            previous_close: Observed::Absent(reason),
            day_volume: Observed::Absent(reason),
            vwap: Observed::Absent(reason),
            avg_volume: Observed::Absent(reason),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMacro {
    #[serde(default, alias = "index_change_pct", alias = "spyChangePct")]
    index_change_pct: Option<RawNumber>,
    #[serde(default, alias = "volatility_index", alias = "vix")]
    volatility_index: Option<RawNumber>,
    #[serde(default, alias = "rate_proxy_change", alias = "us10yChange")]
    rate_proxy_change: Option<RawNumber>,
    #[serde(default, alias = "dollar_index_change", alias = "dxyChange")]
    dollar_index_change: Option<RawNumber>,
}

/// Normalize a macro snapshot.
pub fn normalize_macro(snapshot: &Observed<Value>) -> MacroEvidence {
    match decode::<RawMacro>(snapshot) {
        Ok(raw) => MacroEvidence {
            index_change_pct: observe(raw.index_change_pct.as_ref()),
            volatility_index: observe(raw.volatility_index.as_ref()),
            rate_proxy_change: observe(raw.rate_proxy_change.as_ref()),
            dollar_index_change: observe(raw.dollar_index_change.as_ref()),
        },
        Err(reason) => MacroEvidence {
            index_change_pct: Observed::Absent(reason),
            volatility_index: Observed::Absent(reason),
            rate_proxy_change: Observed::Absent(reason),
            dollar_index_change: Observed::Absent(reason),
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShort {
    #[serde(default, alias = "short_interest_pct")]
    short_interest_pct: Option<RawNumber>,
    #[serde(default, alias = "days_to_cover")]
    days_to_cover: Option<RawNumber>,
    #[serde(default, alias = "short_interest_delta")]
    short_interest_delta: Option<RawNumber>,
    #[serde(default, alias = "short_volume_pct")]
    short_volume_pct: Option<RawNumber>,
    #[serde(default, alias = "dark_pool_pct")]
    dark_pool_pct: Option<RawNumber>,
}

/// Normalize a short-interest snapshot into short fields and the dark-pool share.
pub fn normalize_short(snapshot: &Observed<Value>) -> (ShortEvidence, Observed<f64>) {
    match decode::<RawShort>(snapshot) {
        Ok(raw) => (
            ShortEvidence {
                short_interest_pct: observe(raw.short_interest_pct.as_ref()),
                days_to_cover: observe(raw.days_to_cover.as_ref()),
                short_interest_delta: observe(raw.short_interest_delta.as_ref()),
                short_volume_pct: observe(raw.short_volume_pct.as_ref()),
            },
            observe(raw.dark_pool_pct.as_ref()),
        ),
        Err(reason) => (
            ShortEvidence {
                short_interest_pct: Observed::Absent(reason),
                days_to_cover: Observed::Absent(reason),
                short_interest_delta: Observed::Absent(reason),
                short_volume_pct: Observed::Absent(reason),
            },
            Observed::Absent(reason),
        ),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContract {
    Nested(NestedContract),
    Flat(FlatContract),
}

#[derive(Debug, Deserialize)]
struct NestedContract {
    details: NestedDetails,
    #[serde(default)]
    greeks: Option<NestedGreeks>,
    #[serde(default)]
    open_interest: Option<RawNumber>,
    #[serde(default)]
    implied_volatility: Option<RawNumber>,
    #[serde(default)]
    day: Option<NestedDay>,
    #[serde(default)]
    last_trade: Option<NestedLastTrade>,
}

#[derive(Debug, Deserialize)]
struct NestedDetails {
    #[serde(default)]
    strike_price: Option<RawNumber>,
    #[serde(default)]
    contract_type: Option<String>,
    #[serde(default)]
    expiration_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedGreeks {
    #[serde(default)]
    delta: Option<RawNumber>,
    #[serde(default)]
    gamma: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct NestedDay {
    #[serde(default)]
    volume: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct NestedLastTrade {
    #[serde(default)]
    price: Option<RawNumber>,
    #[serde(default)]
    size: Option<RawNumber>,
    #[serde(default)]
    sip_timestamp: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatContract {
    #[serde(default)]
    strike: Option<RawNumber>,
    #[serde(default, alias = "type")]
    contract_type: Option<String>,
    #[serde(default, alias = "expiry", alias = "expiration")]
    expiration_date: Option<String>,
    #[serde(default)]
    open_interest: Option<RawNumber>,
    #[serde(default)]
    delta: Option<RawNumber>,
    #[serde(default)]
    gamma: Option<RawNumber>,
    #[serde(default)]
    implied_volatility: Option<RawNumber>,
    #[serde(default)]
    day_volume: Option<RawNumber>,
    #[serde(default)]
    last_trade_price: Option<RawNumber>,
    #[serde(default)]
    last_trade_size: Option<RawNumber>,
    #[serde(default)]
    last_trade_timestamp: Option<Value>,
}

/// Shape-independent view of one chain entry.
struct ContractFields {
    strike: Option<RawNumber>,
    contract_type: Option<String>,
    expiration_date: Option<String>,
    open_interest: Option<RawNumber>,
    delta: Option<RawNumber>,
    gamma: Option<RawNumber>,
    implied_volatility: Option<RawNumber>,
    day_volume: Option<RawNumber>,
    last_price: Option<RawNumber>,
    last_size: Option<RawNumber>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl From<RawContract> for ContractFields {
    fn from(raw: RawContract) -> Self {
        match raw {
            RawContract::Nested(n) => {
                let (delta, gamma) = n.greeks.map_or((None, None), |g| (g.delta, g.gamma));
                let (last_price, last_size, last_timestamp) =
                    n.last_trade.map_or((None, None, None), |t| {
                        let ts = t
                            .sip_timestamp
                            .and_then(|raw| raw.to_f64())
                            .map(|nanos| DateTime::from_timestamp_nanos(nanos as i64));
                        (t.price, t.size, ts)
                    });
                Self {
                    strike: n.details.strike_price,
                    contract_type: n.details.contract_type,
                    expiration_date: n.details.expiration_date,
                    open_interest: n.open_interest,
                    delta,
                    gamma,
                    implied_volatility: n.implied_volatility,
                    day_volume: n.day.and_then(|d| d.volume),
                    last_price,
                    last_size,
                    last_timestamp,
                }
            }
            RawContract::Flat(f) => Self {
                strike: f.strike,
                contract_type: f.contract_type,
                expiration_date: f.expiration_date,
                open_interest: f.open_interest,
                delta: f.delta,
                gamma: f.gamma,
                implied_volatility: f.implied_volatility,
                day_volume: f.day_volume,
                last_price: f.last_trade_price,
                last_size: f.last_trade_size,
                last_timestamp: f.last_trade_timestamp.as_ref().and_then(parse_timestamp),
            },
        }
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn non_negative_count(raw: Option<&RawNumber>) -> Option<u64> {
    match raw {
        None => Some(0),
        Some(raw) => raw
            .to_f64()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64),
    }
}

impl ContractFields {
    fn into_contract(self, index: usize) -> Result<OptionContract, AnalyticsError> {
        let malformed = |reason: &str| AnalyticsError::MalformedContract {
            index,
            reason: reason.to_string(),
        };

        let strike = self
            .strike
            .as_ref()
            .and_then(RawNumber::to_decimal)
            .filter(|s| *s > Decimal::ZERO)
            .ok_or_else(|| malformed("missing or invalid strike"))?;
        let contract_type = self
            .contract_type
            .as_deref()
            .and_then(ContractType::parse)
            .ok_or_else(|| malformed("missing or invalid contract type"))?;
        let expiration_date = self
            .expiration_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok())
            .ok_or_else(|| malformed("missing or invalid expiration date"))?;
        let open_interest = non_negative_count(self.open_interest.as_ref())
            .ok_or_else(|| malformed("invalid open interest"))?;

        let last_trade = match (
            self.last_price.as_ref().and_then(RawNumber::to_f64),
            non_negative_count(self.last_size.as_ref()),
        ) {
            (Some(price), Some(size)) if price.is_finite() => Some(LastTrade {
                price,
                size,
                timestamp: self.last_timestamp,
            }),
            _ => None,
        };

        Ok(
            OptionContract::new(strike.normalize(), contract_type, expiration_date, open_interest)
                .with_greeks(
                    self.delta.as_ref().and_then(RawNumber::to_f64),
                    self.gamma.as_ref().and_then(RawNumber::to_f64),
                )
                .with_implied_volatility(self.implied_volatility.as_ref().and_then(RawNumber::to_f64))
                .with_day_volume(non_negative_count(self.day_volume.as_ref()).unwrap_or(0))
                .with_last_trade(last_trade),
        )
    }
}

/// Result of normalizing a chain payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedChain {
    /// Resulting options state.
    pub state: OptionsState,
    /// Entries skipped as malformed, with the reason for each.
    pub skipped: Vec<AnalyticsError>,
}

/// Parse one chain entry.
pub fn parse_contract(index: usize, value: &Value) -> Result<OptionContract, AnalyticsError> {
    let raw = RawContract::deserialize(value).map_err(|e| AnalyticsError::MalformedContract {
        index,
        reason: e.to_string(),
    })?;
    ContractFields::from(raw).into_contract(index)
}

/// Normalize a chain payload.
///
/// Accepts a bare array or an object wrapping it under `results`,
/// `contracts` or `options`. An explicit null or empty list means the ticker
/// has no options. A payload that yields no valid contract at all stays
/// pending.
pub fn normalize_chain(snapshot: &Observed<Value>) -> NormalizedChain {
    let pending = |skipped| NormalizedChain {
        state: OptionsState::Pending,
        skipped,
    };

    let entries = match snapshot {
        Observed::Absent(AbsenceReason::NotReported) | Observed::Present(Value::Null) => {
            return NormalizedChain {
                state: OptionsState::NoOptions,
                skipped: Vec::new(),
            };
        }
        Observed::Absent(_) => return pending(Vec::new()),
        Observed::Present(Value::Array(entries)) => entries,
        Observed::Present(Value::Object(map)) => {
            match ["results", "contracts", "options"]
                .iter()
                .find_map(|key| map.get(*key))
            {
                Some(Value::Array(entries)) => entries,
                Some(Value::Null) | None => {
                    return NormalizedChain {
                        state: OptionsState::NoOptions,
                        skipped: Vec::new(),
                    };
                }
                Some(_) => return pending(Vec::new()),
            }
        }
        Observed::Present(_) => return pending(Vec::new()),
    };

    if entries.is_empty() {
        return NormalizedChain {
            state: OptionsState::NoOptions,
            skipped: Vec::new(),
        };
    }

    let mut contracts = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match parse_contract(index, entry) {
            Ok(contract) => contracts.push(contract),
            Err(err) => skipped.push(err),
        }
    }

    if contracts.is_empty() {
        return pending(skipped);
    }

    NormalizedChain {
        state: OptionsState::Ready(contracts),
        skipped,
    }
}

/// Assemble typed evidence for one ticker from raw snapshots.
///
/// `spot_override` is a caller-supplied underlying price; without one the
/// quote's last price is used.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidUnderlyingPrice`] when `spot_override` is
/// not a positive finite number. Missing or malformed upstream data never
/// fails; it leaves the affected fields absent.
pub fn build_evidence(
    ticker: Ticker,
    snapshots: &RawSnapshots,
    spot_override: Option<f64>,
    analyzer: &ChainAnalyzer,
    today: NaiveDate,
) -> Result<(Evidence, Vec<AnalyticsError>), AnalyticsError> {
    if let Some(price) = spot_override
        && (!price.is_finite() || price <= 0.0)
    {
        return Err(AnalyticsError::InvalidUnderlyingPrice { price });
    }

    let price = normalize_quote(&snapshots.quote);
    let spot = match spot_override {
        Some(p) => Observed::Present(p),
        None => match price.last {
            Observed::Present(p) if p > 0.0 => Observed::Present(p),
            Observed::Present(_) => Observed::Absent(AbsenceReason::Malformed),
            Observed::Absent(reason) => Observed::Absent(reason),
        },
    };

    let chain = normalize_chain(&snapshots.chain);
    let (short, dark_pool_pct) = normalize_short(&snapshots.short);

    let analytics = match (&chain.state, spot.get()) {
        (OptionsState::Ready(contracts), Some(spot)) => analyzer
            .analyze(contracts, spot, today)
            .unwrap_or_default(),
        _ => OptionsAnalytics::empty(),
    };

    let evidence = Evidence {
        ticker,
        as_of: analyzer.calendar().effective_today(today),
        spot,
        price,
        options: chain.state,
        flow: FlowEvidence {
            dark_pool_pct,
            ..FlowEvidence::default()
        },
        macro_backdrop: normalize_macro(&snapshots.macro_snapshot),
        short,
        malformed_contracts: chain.skipped.len(),
        analytics: OptionsAnalytics::empty(),
        squeeze: SqueezeScore::default(),
        regime: VolatilityRegime::default(),
    }
    .with_analytics(analytics);

    Ok((evidence, chain.skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn quote_accepts_numbers_and_numeric_strings() {
        let quote = normalize_quote(&Observed::Present(json!({
            "last": 101.5,
            "prevClose": "100",
            "volume": 1_000_000,
            "vwap": "abc",
        })));
        assert_eq!(quote.last, Observed::Present(101.5));
        assert_eq!(quote.previous_close, Observed::Present(100.0));
        assert_eq!(quote.day_volume, Observed::Present(1_000_000.0));
        assert_eq!(quote.vwap, Observed::Absent(AbsenceReason::Malformed));
        assert_eq!(quote.avg_volume, Observed::Absent(AbsenceReason::NotReported));
    }

    #[test]
    fn failed_snapshot_marks_every_field_unavailable() {
        let macro_backdrop = normalize_macro(&Observed::Absent(AbsenceReason::Unavailable));
        assert_eq!(
            macro_backdrop.volatility_index,
            Observed::Absent(AbsenceReason::Unavailable)
        );

        let quote = normalize_quote(&Observed::Present(json!("not an object")));
        assert_eq!(quote.last, Observed::Absent(AbsenceReason::Malformed));
    }

    #[test]
    fn flat_and_nested_contracts_parse() {
        let flat = parse_contract(
            0,
            &json!({
                "strike": 100,
                "contractType": "call",
                "expirationDate": "2025-01-17",
                "openInterest": 500,
                "delta": 0.5,
                "gamma": 0.04,
                "impliedVolatility": 0.3,
                "dayVolume": 120,
            }),
        )
        .unwrap();
        assert_eq!(flat.strike(), dec!(100));
        assert!(flat.is_call());
        assert_eq!(flat.open_interest(), 500);
        assert_eq!(flat.gamma(), Some(0.04));
        assert_eq!(flat.day_volume(), 120);

        let nested = parse_contract(
            1,
            &json!({
                "details": {
                    "strike_price": "97.50",
                    "contract_type": "put",
                    "expiration_date": "2025-01-17",
                },
                "greeks": { "delta": -0.4, "gamma": 0.03 },
                "open_interest": 250,
                "implied_volatility": 0.35,
                "day": { "volume": 40 },
                "last_trade": { "price": 1.25, "size": 3, "sip_timestamp": 1_736_900_000_000_000_000_i64 },
            }),
        )
        .unwrap();
        assert_eq!(nested.strike(), dec!(97.5));
        assert!(nested.is_put());
        assert_eq!(nested.delta(), Some(-0.4));
        assert_eq!(nested.day_volume(), 40);
        assert_eq!(nested.last_trade().unwrap().size, 3);
        assert!(nested.last_trade().unwrap().timestamp.is_some());
    }

    #[test]
    fn malformed_contract_is_skipped_and_counted() {
        let chain = normalize_chain(&Observed::Present(json!([
            { "strike": 100, "contractType": "call", "expirationDate": "2025-01-17", "openInterest": 10 },
            { "strike": -5, "contractType": "call", "expirationDate": "2025-01-17" },
            { "strike": 105, "contractType": "straddle", "expirationDate": "2025-01-17" },
            "garbage",
        ])));
        assert_eq!(chain.state.contracts().len(), 1);
        assert_eq!(chain.skipped.len(), 3);
        assert!(matches!(
            chain.skipped[0],
            AnalyticsError::MalformedContract { index: 1, .. }
        ));
    }

    #[test]
    fn chain_states() {
        assert_eq!(
            normalize_chain(&Observed::Present(json!([]))).state,
            OptionsState::NoOptions
        );
        assert_eq!(
            normalize_chain(&Observed::Present(json!({ "results": null }))).state,
            OptionsState::NoOptions
        );
        assert_eq!(
            normalize_chain(&Observed::Absent(AbsenceReason::Unavailable)).state,
            OptionsState::Pending
        );
        assert_eq!(
            normalize_chain(&Observed::Present(json!([{ "strike": "x" }]))).state,
            OptionsState::Pending
        );
        assert!(
            normalize_chain(&Observed::Present(json!({ "results": [
                { "strike": 100, "type": "c", "expiry": "2025-01-17" }
            ]})))
            .state
            .is_ready()
        );
    }

    #[test]
    fn build_evidence_rejects_bad_override() {
        let result = build_evidence(
            Ticker::new("AAPL"),
            &RawSnapshots::default(),
            Some(-3.0),
            &ChainAnalyzer::default(),
            today(),
        );
        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidUnderlyingPrice { .. })
        ));
    }

    #[test]
    fn build_evidence_derives_chain_fields() {
        let snapshots = RawSnapshots {
            chain: Observed::Present(json!([
                { "strike": 100, "contractType": "call", "expirationDate": "2025-01-17",
                  "openInterest": 1000, "delta": 0.6, "gamma": 0.05, "dayVolume": 300 },
                { "strike": 95, "contractType": "put", "expirationDate": "2025-01-17",
                  "openInterest": 500, "delta": -0.4, "gamma": 0.02, "dayVolume": 100 },
            ])),
            quote: Observed::Present(json!({ "last": 100.0, "previousClose": 98.0 })),
            macro_snapshot: Observed::Absent(AbsenceReason::Unavailable),
            short: Observed::Present(json!({ "shortInterestPct": 22.0, "darkPoolPct": 48.0 })),
        };
        let (evidence, skipped) = build_evidence(
            Ticker::new("AAPL"),
            &snapshots,
            None,
            &ChainAnalyzer::default(),
            today(),
        )
        .unwrap();

        assert!(skipped.is_empty());
        assert_eq!(evidence.spot, Observed::Present(100.0));
        assert_eq!(evidence.analytics.contracts_used, 2);
        assert_eq!(evidence.flow.ratio_opi, Observed::Present(50.0));
        assert_eq!(evidence.flow.call_put_volume_ratio, Observed::Present(3.0));
        assert_eq!(evidence.flow.dark_pool_pct, Observed::Present(48.0));
        assert_eq!(evidence.squeeze.score, 40);
        assert_eq!(
            evidence.macro_backdrop.index_change_pct,
            Observed::Absent(AbsenceReason::Unavailable)
        );
    }
}
