//! Data Completeness Grader
//!
//! Grades each ticker's evidence against a fixed checklist, independent of
//! the score:
//!
//! - `GRA`: every group complete and options not pending; the score drives.
//! - `GRB`: price, options (or an explicit no-options answer) and macro
//!   complete; advisory.
//! - `GRC`: anything less; never ENTER or REPLACE.

use serde::{Deserialize, Serialize};

use crate::domain::evidence::{Evidence, OptionsState};
use crate::domain::scoring::PillarName;

/// Completeness grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompletenessGrade {
    /// Complete.
    #[serde(rename = "GRA")]
    Gra,
    /// Advisory.
    #[serde(rename = "GRB")]
    Grb,
    /// Insufficient.
    #[serde(rename = "GRC")]
    Grc,
}

impl CompletenessGrade {
    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gra => "GRA",
            Self::Grb => "GRB",
            Self::Grc => "GRC",
        }
    }
}

/// Checklist result for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCompleteness {
    /// Group (pillar) name.
    pub group: PillarName,
    /// Present fields.
    pub present: u8,
    /// Checklist size.
    pub total: u8,
}

impl GroupCompleteness {
    /// Every field present.
    pub const fn is_complete(&self) -> bool {
        self.present == self.total
    }
}

/// Completeness report for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// Grade.
    pub grade: CompletenessGrade,
    /// Present checklist fields.
    pub present: u8,
    /// Checklist size.
    pub total: u8,
    /// Absent checklist fields.
    pub missing: Vec<String>,
    /// Per-group breakdown.
    pub groups: Vec<GroupCompleteness>,
}

impl CompletenessReport {
    fn group(&self, name: PillarName) -> bool {
        self.groups
            .iter()
            .any(|g| g.group == name && g.is_complete())
    }
}

fn checklist(evidence: &Evidence) -> Vec<(PillarName, &'static str, bool)> {
    let p = &evidence.price;
    let f = &evidence.flow;
    let m = &evidence.macro_backdrop;
    let s = &evidence.short;
    vec![
        (PillarName::Momentum, "last", p.last.is_present()),
        (PillarName::Momentum, "previousClose", p.previous_close.is_present()),
        (PillarName::Momentum, "dayVolume", p.day_volume.is_present()),
        (PillarName::Momentum, "vwap", p.vwap.is_present()),
        (PillarName::Structure, "optionsChain", evidence.options.is_ready()),
        (PillarName::Flow, "ratioOpi", f.ratio_opi.is_present()),
        (PillarName::Flow, "callPutVolumeRatio", f.call_put_volume_ratio.is_present()),
        (PillarName::Flow, "darkPoolPct", f.dark_pool_pct.is_present()),
        (PillarName::Regime, "indexChangePct", m.index_change_pct.is_present()),
        (PillarName::Regime, "volatilityIndex", m.volatility_index.is_present()),
        (PillarName::Regime, "rateProxyChange", m.rate_proxy_change.is_present()),
        (PillarName::Regime, "dollarIndexChange", m.dollar_index_change.is_present()),
        (PillarName::Catalyst, "shortInterestPct", s.short_interest_pct.is_present()),
        (PillarName::Catalyst, "daysToCover", s.days_to_cover.is_present()),
        (PillarName::Catalyst, "shortInterestDelta", s.short_interest_delta.is_present()),
        (PillarName::Catalyst, "shortVolumePct", s.short_volume_pct.is_present()),
    ]
}

/// Grade evidence completeness.
pub fn grade_completeness(evidence: &Evidence) -> CompletenessReport {
    let items = checklist(evidence);

    let groups: Vec<GroupCompleteness> = PillarName::ALL
        .iter()
        .map(|name| {
            let in_group = items.iter().filter(|(g, _, _)| g == name);
            GroupCompleteness {
                group: *name,
                present: in_group.clone().filter(|(_, _, ok)| *ok).count() as u8,
                total: in_group.count() as u8,
            }
        })
        .collect();

    let missing: Vec<String> = items
        .iter()
        .filter(|(_, _, ok)| !ok)
        .map(|(_, field, _)| (*field).to_string())
        .collect();
    let total = items.len() as u8;
    let present = total - missing.len() as u8;

    let mut report = CompletenessReport {
        grade: CompletenessGrade::Grc,
        present,
        total,
        missing,
        groups,
    };

    let all_complete = PillarName::ALL.iter().all(|name| report.group(*name));
    let options_settled =
        report.group(PillarName::Structure) || matches!(evidence.options, OptionsState::NoOptions);

    report.grade = if all_complete && !evidence.options.is_pending() {
        CompletenessGrade::Gra
    } else if report.group(PillarName::Momentum) && options_settled && report.group(PillarName::Regime)
    {
        CompletenessGrade::Grb
    } else {
        CompletenessGrade::Grc
    };
    report
}


#[cfg(test)]
mod tests {
    use super::fixtures::complete_evidence;
    use super::*;
    use crate::domain::evidence::{AbsenceReason, Observed};
    use crate::domain::scoring::scorer::fixtures::empty_evidence;

    #[test]
    fn complete_evidence_is_gra() {
        let report = grade_completeness(&complete_evidence("AAPL"));
        assert_eq!(report.grade, CompletenessGrade::Gra);
        assert_eq!(report.present, 16);
        assert_eq!(report.total, 16);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn missing_short_data_is_grb() {
        let mut e = complete_evidence("AAPL");
        e.short.days_to_cover = Observed::Absent(AbsenceReason::Unavailable);
        let report = grade_completeness(&e);
        assert_eq!(report.grade, CompletenessGrade::Grb);
        assert_eq!(report.missing, vec!["daysToCover".to_string()]);
    }

    #[test]
    fn no_options_ticker_can_be_grb() {
        let mut e = complete_evidence("BRK.B");
        e.options = OptionsState::NoOptions;
        e.flow.ratio_opi = Observed::Absent(AbsenceReason::NotReported);
        assert_eq!(grade_completeness(&e).grade, CompletenessGrade::Grb);
    }

    #[test]
    fn pending_chain_is_grc() {
        let mut e = complete_evidence("AAPL");
        e.options = OptionsState::Pending;
        assert_eq!(grade_completeness(&e).grade, CompletenessGrade::Grc);
    }

    #[test]
    fn missing_macro_is_grc() {
        let mut e = complete_evidence("AAPL");
        e.macro_backdrop.volatility_index = Observed::Absent(AbsenceReason::Unavailable);
        assert_eq!(grade_completeness(&e).grade, CompletenessGrade::Grc);
        assert_eq!(grade_completeness(&empty_evidence("X")).grade, CompletenessGrade::Grc);
    }
}
