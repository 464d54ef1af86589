//! Letter grade from the final score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// ≥ 80.
    A,
    /// ≥ 65.
    B,
    /// ≥ 50.
    C,
    /// ≥ 35.
    D,
    /// Below 35.
    F,
}

impl Grade {
    /// Grade a final score.
    pub const fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::A,
            65..=79 => Self::B,
            50..=64 => Self::C,
            35..=49 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(100 => Grade::A)]
    #[test_case(80 => Grade::A)]
    #[test_case(79 => Grade::B)]
    #[test_case(65 => Grade::B)]
    #[test_case(50 => Grade::C)]
    #[test_case(35 => Grade::D)]
    #[test_case(34 => Grade::F)]
    #[test_case(0 => Grade::F)]
    fn grade_from_score(score: u8) -> Grade {
        Grade::from_score(score)
    }
}
