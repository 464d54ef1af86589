//! Options-pressure index (OPI).

use crate::domain::options_analytics::value_objects::{OptionContract, OptionsPressure};

/// Delta-weighted open-interest pressure.
///
/// Balanced pressure (including no pressure at all) yields a ratio of 0.
#[must_use]
pub fn options_pressure(contracts: &[OptionContract]) -> OptionsPressure {
    let mut call_pressure = 0.0;
    let mut put_pressure = 0.0;

    for contract in contracts {
        let Some(delta) = contract.delta() else {
            continue;
        };
        let oi = contract.open_interest() as f64;
        if contract.is_call() && delta > 0.0 {
            call_pressure += delta * oi;
        } else if contract.is_put() && delta < 0.0 {
            put_pressure += delta.abs() * oi;
        }
    }

    let raw = call_pressure - put_pressure;
    let gross = call_pressure + put_pressure;
    let ratio = if gross > 0.0 {
        (raw / gross * 100.0).clamp(-100.0, 100.0)
    } else {
        0.0
    };

    OptionsPressure {
        call_pressure,
        put_pressure,
        raw,
        ratio,
    }
}
