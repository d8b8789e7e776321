//! Non-volatile status conditions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lookup, UnknownName};

/// Major status condition, stored in the corpus as a 3-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCondition {
    #[serde(rename = "par")]
    Paralysis,
    #[serde(rename = "brn")]
    Burn,
    #[serde(rename = "psn")]
    Poison,
    #[serde(rename = "tox")]
    Toxic,
    #[serde(rename = "slp")]
    Sleep,
    #[serde(rename = "frz")]
    Freeze,
}

/// All status conditions
pub const STATUS_CONDITIONS: &[StatusCondition] = &[
    StatusCondition::Paralysis,
    StatusCondition::Burn,
    StatusCondition::Poison,
    StatusCondition::Toxic,
    StatusCondition::Sleep,
    StatusCondition::Freeze,
];

impl StatusCondition {
    /// Canonical 3-letter code
    pub fn code(&self) -> &'static str {
        match self {
            StatusCondition::Paralysis => "par",
            StatusCondition::Burn => "brn",
            StatusCondition::Poison => "psn",
            StatusCondition::Toxic => "tox",
            StatusCondition::Sleep => "slp",
            StatusCondition::Freeze => "frz",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StatusCondition::Paralysis => "Paralysis",
            StatusCondition::Burn => "Burn",
            StatusCondition::Poison => "Poison",
            StatusCondition::Toxic => "Bad Poison",
            StatusCondition::Sleep => "Sleep",
            StatusCondition::Freeze => "Freeze",
        }
    }
}

impl FromStr for StatusCondition {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(STATUS_CONDITIONS, s, StatusCondition::code)
            .ok_or_else(|| UnknownName::new("status condition", s))
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
