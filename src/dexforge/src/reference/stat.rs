//! Boostable stats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lookup, UnknownName};

/// A stat that can be raised or lowered in stages.
///
/// Ordering follows the corpus convention (`atk, def, spa, spd, spe`) so that
/// boost maps render in the same order the corpus writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "atk")]
    Attack,
    #[serde(rename = "def")]
    Defense,
    #[serde(rename = "spa")]
    SpecialAttack,
    #[serde(rename = "spd")]
    SpecialDefense,
    #[serde(rename = "spe")]
    Speed,
    #[serde(rename = "accuracy")]
    Accuracy,
    #[serde(rename = "evasion")]
    Evasion,
}

/// All boostable stats
pub const STATS: &[Stat] = &[
    Stat::Attack,
    Stat::Defense,
    Stat::SpecialAttack,
    Stat::SpecialDefense,
    Stat::Speed,
    Stat::Accuracy,
    Stat::Evasion,
];

impl Stat {
    /// Key used in `boosts: { ... }` blocks
    pub fn code(&self) -> &'static str {
        match self {
            Stat::Attack => "atk",
            Stat::Defense => "def",
            Stat::SpecialAttack => "spa",
            Stat::SpecialDefense => "spd",
            Stat::Speed => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Atk",
            Stat::SpecialDefense => "Sp. Def",
            Stat::Speed => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }
}

impl FromStr for Stat {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(STATS, s, Stat::code).ok_or_else(|| UnknownName::new("stat", s))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
