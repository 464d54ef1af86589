//! Scoring report DTOs
//!
//! Wire shape consumed by the dashboard: camelCase JSON, `decisionSSOT` as
//! the single source of truth for the action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::services::ScoredTicker;
use crate::domain::decision::{
    Action, CompletenessGrade, CompletenessReport, ContinuityRecord, Decision,
};
use crate::domain::options_analytics::{OptionsAnalytics, SqueezeScore};
use crate::domain::scoring::{GateCode, GateResult, Grade, PillarSet};
use crate::domain::shared::Ticker;
use crate::domain::volatility_regime::VolatilityRegime;

/// Version tag stamped on every report.
pub const ENGINE_VERSION: &str = "alpha-engine/1";

/// Full report for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerReportDto {
    /// Ticker.
    pub ticker: Ticker,
    /// Final score.
    pub score: u8,
    /// Score before gates.
    pub raw_score: u8,
    /// Letter grade.
    pub grade: Grade,
    /// Engine version.
    pub engine_version: String,
    /// Pillar scores keyed by pillar name.
    pub pillars: PillarSet,
    /// Fired gate codes in priority order.
    pub gates_applied: Vec<GateCode>,
    /// Fired gates with their effects.
    pub gate_details: Vec<GateResult>,
    /// Completeness grade.
    pub data_completeness: CompletenessGrade,
    /// Completeness checklist.
    pub completeness: CompletenessReport,
    /// The decision.
    #[serde(rename = "decisionSSOT")]
    pub decision_ssot: Decision,
    /// Chain analytics.
    pub analytics: OptionsAnalytics,
    /// Squeeze score.
    pub squeeze: SqueezeScore,
    /// Volatility regime.
    pub regime: VolatilityRegime,
    /// Chain entries skipped as malformed.
    pub malformed_contracts: usize,
    /// Session the report belongs to.
    pub as_of: NaiveDate,
}

impl TickerReportDto {
    /// Build a report from a scored ticker and its decision.
    #[must_use]
    pub fn from_scored(scored: &ScoredTicker, decision: Decision) -> Self {
        Self {
            ticker: scored.ticker.clone(),
            score: scored.score(),
            raw_score: scored.gates.raw_score,
            grade: scored.grade,
            engine_version: ENGINE_VERSION.to_string(),
            pillars: scored.pillars.clone(),
            gates_applied: scored.gates.codes(),
            gate_details: scored.gates.gates.clone(),
            data_completeness: scored.completeness.grade,
            completeness: scored.completeness.clone(),
            decision_ssot: decision,
            analytics: scored.analytics.clone(),
            squeeze: scored.squeeze,
            regime: scored.regime,
            malformed_contracts: scored.malformed_contracts,
            as_of: scored.as_of,
        }
    }

    /// Get the action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.decision_ssot.action
    }
}

/// One row of the top-N table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntryDto {
    /// Position in the ranking (1-based).
    pub rank: u32,
    /// Ticker.
    pub ticker: Ticker,
    /// Final score.
    pub score: u8,
    /// Letter grade.
    pub grade: Grade,
    /// Action.
    pub action: Action,
}

/// Report for a scored batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportDto {
    /// Engine version.
    pub engine_version: String,
    /// Session the batch belongs to.
    pub as_of: NaiveDate,
    /// Every report, score descending then ticker ascending.
    pub ranked: Vec<TickerReportDto>,
    /// Leading rows of `ranked`.
    #[serde(rename = "topN")]
    pub top_n: Vec<TopEntryDto>,
    /// Records to pass into the next run.
    pub continuity: Vec<ContinuityRecord>,
}

impl BatchReportDto {
    /// Rank reports and build the top-N table.
    #[must_use]
    pub fn ranked(
        as_of: NaiveDate,
        mut reports: Vec<TickerReportDto>,
        top_n: usize,
        continuity: Vec<ContinuityRecord>,
    ) -> Self {
        reports.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.ticker.cmp(&b.ticker)));

        let top = reports
            .iter()
            .take(top_n)
            .zip(1u32..)
            .map(|(r, rank)| TopEntryDto {
                rank,
                ticker: r.ticker.clone(),
                score: r.score,
                grade: r.grade,
                action: r.action(),
            })
            .collect();

        Self {
            engine_version: ENGINE_VERSION.to_string(),
            as_of,
            ranked: reports,
            top_n: top,
            continuity,
        }
    }

    /// Find a ticker's report.
    #[must_use]
    pub fn report(&self, ticker: &str) -> Option<&TickerReportDto> {
        self.ranked.iter().find(|r| r.ticker.as_str() == ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::TickerScorer;
    use crate::domain::decision::Confidence;
    use crate::domain::decision::completeness::fixtures::complete_evidence;

    fn report(ticker: &str, score: u8, action: Action) -> TickerReportDto {
        let scored = TickerScorer::default().score(&complete_evidence(ticker));
        let mut report = TickerReportDto::from_scored(
            &scored,
            Decision::new(action, Confidence::High, Vec::new(), 0),
        );
        report.score = score;
        report.grade = Grade::from_score(score);
        report
    }

    #[test]
    fn serializes_wire_field_names() {
        let json = serde_json::to_value(report("NVDA", 70, Action::Enter)).unwrap();

        for key in [
            "score",
            "grade",
            "engineVersion",
            "pillars",
            "gatesApplied",
            "dataCompleteness",
            "decisionSSOT",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["dataCompleteness"], "GRA");
        assert_eq!(json["decisionSSOT"]["action"], "ENTER");
        assert!(json["decisionSSOT"].get("triggersKR").is_some());
    }

    #[test]
    fn ranks_by_score_then_ticker() {
        let batch = BatchReportDto::ranked(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            vec![
                report("MSFT", 60, Action::Caution),
                report("TSLA", 72, Action::Enter),
                report("AAPL", 72, Action::Maintain),
            ],
            2,
            Vec::new(),
        );

        let order: Vec<&str> = batch.ranked.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["AAPL", "TSLA", "MSFT"]);
        assert_eq!(batch.top_n.len(), 2);
        assert_eq!(batch.top_n[0].rank, 1);
        assert_eq!(batch.top_n[0].action, Action::Maintain);
        assert_eq!(batch.top_n[1].ticker, Ticker::new("TSLA"));
    }

    #[test]
    fn top_n_serializes_as_top_n_key() {
        let batch = BatchReportDto::ranked(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            vec![report("AAPL", 50, Action::Caution)],
            5,
            Vec::new(),
        );
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["topN"][0]["ticker"], "AAPL");
        assert!(batch.report("AAPL").is_some());
    }
}
