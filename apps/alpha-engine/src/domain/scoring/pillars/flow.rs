//! Flow pillar: options pressure, call/put volume, dark pool.

use super::tier_at_least;
use crate::domain::evidence::Evidence;
use crate::domain::scoring::pillar::{Factor, MissingInputs, PillarName, PillarScore};

fn pressure_points(ratio_opi: f64) -> u8 {
    if ratio_opi > 0.0 {
        tier_at_least(ratio_opi, &[(40.0, 8), (20.0, 5)]).max(2)
    } else {
        0
    }
}

fn call_put_points(ratio: f64) -> u8 {
    tier_at_least(ratio, &[(2.0, 6), (1.3, 3)])
}

fn dark_pool_points(pct: f64) -> u8 {
    tier_at_least(pct, &[(50.0, 6), (40.0, 3)])
}

/// Score the flow pillar.
pub fn score(evidence: &Evidence, max: u8) -> PillarScore {
    let flow = &evidence.flow;
    let mut missing = MissingInputs::default();

    let pressure = missing.require("ratioOpi", flow.ratio_opi.get()).map_or_else(
        || Factor::missing("optionsPressure", 8),
        |ratio| Factor::new("optionsPressure", pressure_points(ratio), 8, format!("ratioOPI {ratio:.1}")),
    );
    let call_put = missing
        .require("callPutVolumeRatio", flow.call_put_volume_ratio.get())
        .map_or_else(
            || Factor::missing("callPutVolume", 6),
            |ratio| Factor::new("callPutVolume", call_put_points(ratio), 6, format!("c/p {ratio:.2}")),
        );
    let dark_pool = missing.require("darkPoolPct", flow.dark_pool_pct.get()).map_or_else(
        || Factor::missing("darkPool", 6),
        |pct| Factor::new("darkPool", dark_pool_points(pct), 6, format!("dark pool {pct:.1}%")),
    );

    PillarScore::from_factors(
        PillarName::Flow,
        max,
        vec![pressure, call_put, dark_pool],
        missing.into_inner(),
    )
}
