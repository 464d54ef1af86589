//! Pillar scoring functions.
//!
//! Each pillar reads [`Evidence`](crate::domain::evidence::Evidence) only and
//! degrades a factor to 0 when its inputs are absent.

pub mod catalyst;
pub mod flow;
pub mod momentum;
pub mod regime;
pub mod structure;

/// First tier whose threshold `value` meets, or 0.
///
/// `tiers` are `(threshold, points)` in descending threshold order.
pub(crate) fn tier_at_least(value: f64, tiers: &[(f64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map_or(0, |(_, points)| *points)
}

/// First tier whose threshold `value` stays below, or 0.
///
/// `tiers` are `(threshold, points)` in ascending threshold order.
pub(crate) fn tier_below(value: f64, tiers: &[(f64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map_or(0, |(_, points)| *points)
}
