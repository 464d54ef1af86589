//! Typed decision reasons and their Korean rendering.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::GateCode;
use crate::domain::shared::Ticker;

/// Why a decision was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Score cleared the entry threshold.
    EntryThresholdMet {
        /// Final score.
        score: u8,
        /// Threshold applied.
        threshold: u8,
    },
    /// Score below the entry threshold.
    BelowEntryThreshold {
        /// Final score.
        score: u8,
        /// Threshold applied.
        threshold: u8,
    },
    /// Incumbent cleared the maintenance threshold.
    MaintainThresholdMet {
        /// Final score.
        score: u8,
        /// Threshold applied.
        threshold: u8,
    },
    /// Incumbent fell below maintenance but above the exit floor.
    Degraded {
        /// Final score.
        score: u8,
        /// Maintenance threshold.
        threshold: u8,
    },
    /// Incumbent fell below the exit floor.
    BelowExitFloor {
        /// Final score.
        score: u8,
        /// Exit floor.
        threshold: u8,
    },
    /// A gate fired.
    GateFired {
        /// Gate code.
        gate: GateCode,
    },
    /// A blocking gate fired.
    BlockingGate {
        /// Gate code.
        gate: GateCode,
    },
    /// Incumbent replaced by a stronger candidate.
    ReplacedBy {
        /// Challenger.
        challenger: Ticker,
        /// Challenger score.
        score: u8,
    },
    /// Candidate entered by replacing an incumbent.
    Replacing {
        /// Displaced incumbent.
        incumbent: Ticker,
    },
    /// No slot available for a qualifying candidate.
    SlotsFull,
    /// Continuity boost defended the slot.
    ContinuityBoost {
        /// Boost points.
        amount: u8,
    },
    /// Advisory evidence raises the entry bar.
    AdvisoryEntryBuffer {
        /// Added points.
        buffer: u8,
    },
    /// Evidence too thin for entry or replacement.
    InsufficientData,
    /// Score-driven exit held back by thin evidence.
    ExitDeferred,
    /// Options chain still pending.
    OptionsPending,
}

impl ReasonCode {
    /// Korean display text.
    pub fn render_kr(&self) -> String {
        match self {
            Self::EntryThresholdMet { score, threshold } => {
                format!("진입 기준 충족 (점수 {score} ≥ {threshold})")
            }
            Self::BelowEntryThreshold { score, threshold } => {
                format!("진입 기준 미달 (점수 {score} < {threshold})")
            }
            Self::MaintainThresholdMet { score, threshold } => {
                format!("유지 기준 충족 (점수 {score} ≥ {threshold})")
            }
            Self::Degraded { score, threshold } => {
                format!("점수 약화: 유지 기준 미달 (점수 {score} < {threshold})")
            }
            Self::BelowExitFloor { score, threshold } => {
                format!("청산 기준 하회 (점수 {score} < {threshold})")
            }
            Self::GateFired { gate } => gate_text(*gate).to_string(),
            Self::BlockingGate { gate } => format!("차단 게이트 발동: {}", gate_text(*gate)),
            Self::ReplacedBy { challenger, score } => {
                format!("더 강한 후보 {challenger}({score}점)로 교체")
            }
            Self::Replacing { incumbent } => format!("{incumbent} 자리를 대체하여 진입"),
            Self::SlotsFull => "보유 슬롯이 모두 찼음: 관찰 유지".to_string(),
            Self::ContinuityBoost { amount } => format!("연속성 보정 +{amount}점 적용"),
            Self::AdvisoryEntryBuffer { buffer } => {
                format!("데이터 완결성 B등급: 진입 기준 +{buffer}점 상향")
            }
            Self::InsufficientData => "데이터 불충분(C등급): 진입·교체 제한".to_string(),
            Self::ExitDeferred => "데이터 불충분으로 점수 기반 청산 보류".to_string(),
            Self::OptionsPending => "옵션 체인 데이터 대기 중".to_string(),
        }
    }
}

const fn gate_text(gate: GateCode) -> &'static str {
    match gate {
        GateCode::WallRejection => "콜월 저항 근접, 수급 확인 부족 (WALL_REJECTION)",
        GateCode::FakePump => "수급 확인 없는 상승 (FAKE_PUMP)",
        GateCode::ShortStorm => "공매도 스퀴즈 위험과 약세 감마 구조 (SHORT_STORM)",
    }
}
