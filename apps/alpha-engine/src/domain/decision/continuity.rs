//! Continuity / Anti-Churn Booster
//!
//! Resolves slot competition between the previous run's incumbents and this
//! run's challengers. Incumbents that are not exiting hold their slots;
//! qualifying challengers fill free slots by score, then challenge the
//! weakest incumbent. An incumbent within a small margin of being replaced
//! gets a bounded boost on its comparison score, never on its displayed
//! score, and never above the entry threshold.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::action::{Action, Candidate, Confidence, ContinuityRecord, Decision};
use super::completeness::CompletenessGrade;
use super::reasons::ReasonCode;
use super::state_machine::{DecisionStateMachine, DecisionThresholds};
use crate::domain::shared::Ticker;

/// Why a previous-run record was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IgnoredRecord {
    /// Ticker appears more than once.
    Duplicate,
    /// Score above 100 or rank 0.
    OutOfRange,
    /// Ticker not scored in this run.
    NotInRun,
    /// Action does not hold a slot.
    NotHeld,
}

/// Result of resolving one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityOutcome {
    /// Decisions aligned with the input candidates.
    pub decisions: Vec<Decision>,
    /// Records for the next run: held tickers, ranked.
    pub snapshot: Vec<ContinuityRecord>,
    /// Previous records that were ignored.
    pub ignored: Vec<(Ticker, IgnoredRecord)>,
}

struct Working {
    action: Action,
    reasons: Vec<ReasonCode>,
    boost: u8,
    incumbent: bool,
}

/// Incumbent score plus its continuity boost.
fn comparison(score: u8, boost: u8) -> u16 {
    u16::from(score) + u16::from(boost)
}

/// Anti-churn slot resolver.
#[derive(Debug, Clone, Default)]
pub struct ContinuityBooster {
    thresholds: DecisionThresholds,
}

impl ContinuityBooster {
    /// Create a booster with the given thresholds.
    pub const fn new(thresholds: DecisionThresholds) -> Self {
        Self { thresholds }
    }

    /// Get the thresholds.
    pub const fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    /// Boost an incumbent earns against `challenger`.
    ///
    /// A challenger replaces an incumbent only when it beats
    /// `incumbent + boost + margin` outright.
    ///
    /// Non-zero only when
    /// `challenger − margin − band ≤ incumbent < challenger − margin`, and
    /// capped so `incumbent + boost ≤ entry`.
    pub fn boost_for(&self, incumbent: u8, challenger: u8) -> u8 {
        let t = &self.thresholds;
        let upper = i32::from(challenger) - i32::from(t.replace_margin);
        let lower = upper - i32::from(t.boost_band);
        let score = i32::from(incumbent);
        if score >= lower && score < upper {
            t.max_boost.min(t.entry.saturating_sub(incumbent))
        } else {
            0
        }
    }

    fn validate_previous<'a>(
        candidates: &[Candidate],
        previous: &'a [ContinuityRecord],
    ) -> (HashMap<&'a Ticker, &'a ContinuityRecord>, Vec<(Ticker, IgnoredRecord)>) {
        let mut held = HashMap::new();
        let mut ignored = Vec::new();
        let mut seen: HashMap<&Ticker, usize> = HashMap::new();
        for record in previous {
            *seen.entry(&record.ticker).or_insert(0) += 1;
        }

        for record in previous {
            let reason = if seen.get(&record.ticker).copied().unwrap_or(0) > 1 {
                Some(IgnoredRecord::Duplicate)
            } else if record.score > 100 || record.rank == 0 {
                Some(IgnoredRecord::OutOfRange)
            } else if !candidates.iter().any(|c| c.ticker == record.ticker) {
                Some(IgnoredRecord::NotInRun)
            } else if !record.action.holds_slot() {
                Some(IgnoredRecord::NotHeld)
            } else {
                None
            };

            match reason {
                Some(reason) => ignored.push((record.ticker.clone(), reason)),
                None => {
                    held.insert(&record.ticker, record);
                }
            }
        }
        (held, ignored)
    }

    /// Decide every candidate of a run against the previous run's records.
    pub fn resolve(
        &self,
        candidates: &[Candidate],
        previous: &[ContinuityRecord],
    ) -> ContinuityOutcome {
        let t = &self.thresholds;
        let (held, ignored) = Self::validate_previous(candidates, previous);

        let mut work: Vec<Working> = candidates
            .iter()
            .map(|c| {
                let incumbent = held.contains_key(&c.ticker);
                let base = DecisionStateMachine::decide(c, incumbent, t);
                Working {
                    action: base.action,
                    reasons: base.reasons,
                    boost: 0,
                    incumbent,
                }
            })
            .collect();

        let by_strength = |a: &usize, b: &usize| -> Ordering {
            candidates[*b]
                .score
                .cmp(&candidates[*a].score)
                .then_with(|| candidates[*a].ticker.cmp(&candidates[*b].ticker))
        };

        let mut holders: Vec<usize> = (0..candidates.len())
            .filter(|i| {
                work[*i].incumbent && matches!(work[*i].action, Action::Maintain | Action::Caution)
            })
            .collect();
        let mut challengers: Vec<usize> = (0..candidates.len())
            .filter(|i| !work[*i].incumbent && work[*i].action == Action::Enter)
            .collect();
        challengers.sort_by(by_strength);

        let mut free = t.slots.saturating_sub(holders.len());
        for c in challengers {
            if free > 0 {
                free -= 1;
                holders.push(c);
                continue;
            }

            let challenger_score = candidates[c].score;
            let contenders: Vec<(usize, u8)> = holders
                .iter()
                .copied()
                .filter(|h| work[*h].incumbent && candidates[*h].completeness != CompletenessGrade::Grc)
                .map(|h| (h, self.boost_for(candidates[h].score, challenger_score)))
                .collect();
            let weakest = contenders.iter().copied().min_by(|(a, a_boost), (b, b_boost)| {
                comparison(candidates[*a].score, *a_boost)
                    .cmp(&comparison(candidates[*b].score, *b_boost))
                    .then_with(|| candidates[*b].ticker.cmp(&candidates[*a].ticker))
            });
            let Some((w, boost)) = weakest else {
                work[c].action = Action::Caution;
                work[c].reasons.push(ReasonCode::SlotsFull);
                continue;
            };

            let needed = comparison(candidates[w].score, boost) + u16::from(t.replace_margin);
            if u16::from(challenger_score) > needed {
                work[w].action = Action::Replace;
                work[w].boost = work[w].boost.max(boost);
                work[w].reasons.push(ReasonCode::ReplacedBy {
                    challenger: candidates[c].ticker.clone(),
                    score: challenger_score,
                });
                work[c].reasons.push(ReasonCode::Replacing {
                    incumbent: candidates[w].ticker.clone(),
                });
                holders.retain(|h| *h != w);
                holders.push(c);
            } else {
                // Every boosted contender held its slot only through its boost
                work[c].action = Action::Caution;
                work[c].reasons.push(ReasonCode::SlotsFull);
                for (h, boost) in contenders {
                    work[h].boost = work[h].boost.max(boost);
                }
            }
        }

        let decisions = candidates
            .iter()
            .zip(work.iter_mut())
            .map(|(candidate, w)| {
                if candidate.completeness == CompletenessGrade::Grc
                    && matches!(w.action, Action::Enter | Action::Replace)
                {
                    w.action = Action::Caution;
                    w.reasons.push(ReasonCode::InsufficientData);
                }
                if w.boost > 0 {
                    w.reasons.push(ReasonCode::ContinuityBoost { amount: w.boost });
                }
                Decision::new(
                    w.action,
                    Confidence::from(candidate.completeness),
                    std::mem::take(&mut w.reasons),
                    w.boost,
                )
            })
            .collect::<Vec<_>>();

        let mut kept: Vec<usize> = (0..candidates.len())
            .filter(|i| {
                let action = decisions[*i].action;
                (matches!(action, Action::Maintain | Action::Caution) && work[*i].incumbent)
                    || action == Action::Enter
            })
            .collect();
        kept.sort_by(by_strength);

        let snapshot = kept
            .into_iter()
            .enumerate()
            .map(|(rank, i)| ContinuityRecord {
                ticker: candidates[i].ticker.clone(),
                rank: rank as u32 + 1,
                score: candidates[i].score,
                action: decisions[i].action,
            })
            .collect();

        ContinuityOutcome {
            decisions,
            snapshot,
            ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::GateCode;
    use proptest::prelude::*;

    fn candidate(ticker: &str, score: u8) -> Candidate {
        Candidate {
            ticker: Ticker::new(ticker),
            score,
            gates: Vec::new(),
            completeness: CompletenessGrade::Gra,
        }
    }

    fn held(ticker: &str, score: u8, rank: u32) -> ContinuityRecord {
        ContinuityRecord {
            ticker: Ticker::new(ticker),
            rank,
            score,
            action: Action::Maintain,
        }
    }

    fn one_slot() -> ContinuityBooster {
        ContinuityBooster::new(DecisionThresholds {
            slots: 1,
            ..DecisionThresholds::default()
        })
    }

    #[test]
    fn free_slots_fill_by_score() {
        let booster = ContinuityBooster::new(DecisionThresholds {
            slots: 2,
            ..DecisionThresholds::default()
        });
        let candidates = vec![candidate("AAA", 75), candidate("BBB", 90), candidate("CCC", 80)];
        let outcome = booster.resolve(&candidates, &[]);

        let actions: Vec<Action> = outcome.decisions.iter().map(|d| d.action).collect();
        assert_eq!(actions, vec![Action::Caution, Action::Enter, Action::Enter]);
        assert_eq!(outcome.snapshot[0].ticker, Ticker::new("BBB"));
        assert_eq!(outcome.snapshot[0].rank, 1);
        assert_eq!(outcome.snapshot.len(), 2);
    }

    #[test]
    fn materially_stronger_challenger_replaces() {
        let candidates = vec![candidate("OLD", 60), candidate("NEW", 85)];
        let outcome = one_slot().resolve(&candidates, &[held("OLD", 72, 1)]);
        assert_eq!(outcome.decisions[0].action, Action::Replace);
        assert_eq!(outcome.decisions[1].action, Action::Enter);
        assert_eq!(outcome.snapshot.len(), 1);
        assert_eq!(outcome.snapshot[0].ticker, Ticker::new("NEW"));
    }

    #[test]
    fn near_miss_incumbent_is_boosted_and_kept() {
        // challenger 78: band is [63, 68); incumbent 65 gets min(5, 70 - 65) = 5
        let candidates = vec![candidate("OLD", 65), candidate("NEW", 78)];
        let outcome = one_slot().resolve(&candidates, &[held("OLD", 66, 1)]);
        let old = &outcome.decisions[0];
        assert_eq!(old.action, Action::Maintain);
        assert!(old.is_boosted);
        assert_eq!(old.boost_amount, 5);
        assert_eq!(outcome.decisions[1].action, Action::Caution);
        assert_eq!(outcome.snapshot[0].score, 65);
    }

    #[test]
    fn incumbent_at_lower_band_edge_holds_its_slot() {
        // challenger 78: incumbent 63 compares as 68, and 78 does not beat 68 + 10
        let candidates = vec![candidate("OLD", 63), candidate("NEW", 78)];
        let outcome = one_slot().resolve(&candidates, &[held("OLD", 63, 1)]);
        let old = &outcome.decisions[0];
        assert_eq!(old.action, Action::Maintain);
        assert!(old.is_boosted);
        assert_eq!(old.boost_amount, 5);
        assert_eq!(outcome.decisions[1].action, Action::Caution);
        assert!(outcome.decisions[1].reason_codes.contains(&ReasonCode::SlotsFull));
        assert_eq!(outcome.snapshot.len(), 1);
        assert_eq!(outcome.snapshot[0].ticker, Ticker::new("OLD"));
    }

    #[test]
    fn replaced_incumbent_still_reports_its_boost() {
        // challenger 84: incumbent 69 gets min(5, 70 - 69) = 1 and compares as 70
        let candidates = vec![candidate("OLD", 69), candidate("NEW", 84)];
        let outcome = one_slot().resolve(&candidates, &[held("OLD", 70, 1)]);
        let old = &outcome.decisions[0];
        assert_eq!(old.action, Action::Replace);
        assert!(old.is_boosted);
        assert_eq!(old.boost_amount, 1);
        assert_eq!(outcome.decisions[1].action, Action::Enter);
    }

    #[test]
    fn every_incumbent_saved_by_a_boost_shows_it() {
        // challenger 76: band is [61, 66); AAA compares as 67, BBB as 69
        let booster = ContinuityBooster::new(DecisionThresholds {
            slots: 2,
            ..DecisionThresholds::default()
        });
        let candidates = vec![candidate("AAA", 62), candidate("BBB", 64), candidate("NEW", 76)];
        let outcome = booster.resolve(&candidates, &[held("AAA", 62, 1), held("BBB", 64, 2)]);

        assert_eq!(outcome.decisions[0].boost_amount, 5);
        assert_eq!(outcome.decisions[1].boost_amount, 5);
        assert_eq!(outcome.decisions[2].action, Action::Caution);
        assert_eq!(outcome.snapshot.len(), 2);
    }

    #[test]
    fn weakest_incumbent_is_chosen_by_comparison_score() {
        // challenger 76: AAA (62) compares as 67, BBB (66) sits above the band at 66
        let booster = ContinuityBooster::new(DecisionThresholds {
            slots: 2,
            ..DecisionThresholds::default()
        });
        let candidates = vec![candidate("AAA", 62), candidate("BBB", 66), candidate("NEW", 76)];
        let outcome = booster.resolve(&candidates, &[held("AAA", 62, 1), held("BBB", 66, 2)]);

        assert_eq!(outcome.decisions[0].action, Action::Maintain);
        assert_eq!(outcome.decisions[1].action, Action::Maintain);
        assert_eq!(outcome.decisions[1].boost_amount, 0);
        assert!(
            !outcome.decisions[1]
                .reason_codes
                .iter()
                .any(|r| matches!(r, ReasonCode::ReplacedBy { .. }))
        );
        assert_eq!(outcome.decisions[2].action, Action::Caution);
    }

    #[test]
    fn boost_not_applied_outside_band() {
        let booster = ContinuityBooster::default();
        assert_eq!(booster.boost_for(60, 78), 0);
        assert_eq!(booster.boost_for(68, 78), 0);
        assert_eq!(booster.boost_for(63, 78), 5);
        assert_eq!(booster.boost_for(67, 78), 3);
    }

    #[test]
    fn exiting_incumbent_frees_slot() {
        let candidates = vec![candidate("OLD", 30), candidate("NEW", 72)];
        let outcome = one_slot().resolve(&candidates, &[held("OLD", 60, 1)]);
        assert_eq!(outcome.decisions[0].action, Action::Exit);
        assert_eq!(outcome.decisions[1].action, Action::Enter);
    }

    #[test]
    fn grc_incumbent_cannot_be_replaced_and_grc_never_enters() {
        let mut old = candidate("OLD", 56);
        old.completeness = CompletenessGrade::Grc;
        let mut thin = candidate("THIN", 99);
        thin.completeness = CompletenessGrade::Grc;
        let candidates = vec![old, candidate("NEW", 90), thin];

        let outcome = one_slot().resolve(&candidates, &[held("OLD", 60, 1)]);
        assert_eq!(outcome.decisions[0].action, Action::Maintain);
        assert_eq!(outcome.decisions[1].action, Action::Caution);
        assert_eq!(outcome.decisions[2].action, Action::Caution);
        assert_eq!(outcome.decisions[2].confidence, Confidence::Low);
    }

    #[test]
    fn inconsistent_records_are_ignored() {
        let candidates = vec![candidate("AAA", 80), candidate("BBB", 50), candidate("CCC", 50)];
        let previous = vec![
            held("ZZZ", 70, 1),
            held("AAA", 200, 2),
            ContinuityRecord {
                action: Action::Exit,
                ..held("BBB", 60, 3)
            },
            held("CCC", 60, 4),
            held("CCC", 61, 5),
        ];
        let outcome = ContinuityBooster::default().resolve(&candidates, &previous);
        assert_eq!(
            outcome.ignored,
            vec![
                (Ticker::new("ZZZ"), IgnoredRecord::NotInRun),
                (Ticker::new("AAA"), IgnoredRecord::OutOfRange),
                (Ticker::new("BBB"), IgnoredRecord::NotHeld),
                (Ticker::new("CCC"), IgnoredRecord::Duplicate),
                (Ticker::new("CCC"), IgnoredRecord::Duplicate),
            ]
        );
        assert_eq!(outcome.decisions[0].action, Action::Enter);
        assert_eq!(outcome.decisions[1].action, Action::Caution);
    }

    #[test]
    fn blocking_gate_exits_incumbent() {
        let mut pumped = candidate("PUMP", 80);
        pumped.gates = vec![GateCode::FakePump];
        let outcome = ContinuityBooster::default().resolve(&[pumped], &[held("PUMP", 70, 1)]);
        assert_eq!(outcome.decisions[0].action, Action::Exit);
        assert!(outcome.snapshot.is_empty());
    }

    proptest! {
        #[test]
        fn boost_never_lifts_above_entry(incumbent in 0u8..70, challenger in 0u8..=100) {
            let booster = ContinuityBooster::default();
            let boost = booster.boost_for(incumbent, challenger);
            prop_assert!(u16::from(incumbent) + u16::from(boost) <= 70);
            prop_assert!(boost <= 5);
        }

        #[test]
        fn boosted_incumbent_is_never_replaced_by_the_challenger_it_was_boosted_against(
            incumbent in 55u8..70,
            challenger in 70u8..=100,
        ) {
            let candidates = vec![candidate("OLD", incumbent), candidate("NEW", challenger)];
            let outcome = one_slot().resolve(&candidates, &[held("OLD", incumbent, 1)]);
            let old = &outcome.decisions[0];
            if one_slot().boost_for(incumbent, challenger) > 0 && incumbent + 5 < 70 {
                prop_assert_ne!(old.action, Action::Replace);
                prop_assert!(old.is_boosted);
            }
        }

        #[test]
        fn grc_never_enters_or_replaces(
            scores in prop::collection::vec((0u8..=100, any::<bool>()), 1..12),
            held_mask in any::<u16>(),
        ) {
            let candidates: Vec<Candidate> = scores
                .iter()
                .enumerate()
                .map(|(i, (score, grc))| Candidate {
                    completeness: if *grc { CompletenessGrade::Grc } else { CompletenessGrade::Gra },
                    ..candidate(&format!("T{i}"), *score)
                })
                .collect();
            let previous: Vec<ContinuityRecord> = (0..candidates.len())
                .filter(|i| held_mask & (1 << i) != 0)
                .map(|i| held(&format!("T{i}"), 60, i as u32 + 1))
                .collect();

            let outcome = one_slot().resolve(&candidates, &previous);
            for (c, d) in candidates.iter().zip(&outcome.decisions) {
                if c.completeness == CompletenessGrade::Grc {
                    prop_assert!(!matches!(d.action, Action::Enter | Action::Replace));
                }
            }
        }
    }
}
