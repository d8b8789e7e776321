//! Targeting modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lookup, UnknownName};

/// Who a move can be aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    Normal,
    #[serde(rename = "self")]
    User,
    AdjacentAlly,
    AdjacentAllyOrSelf,
    AdjacentFoe,
    AllAdjacent,
    AllAdjacentFoes,
    Allies,
    AllySide,
    AllyTeam,
    Any,
    FoeSide,
    RandomNormal,
    Scripted,
    All,
}

/// All targeting modes
pub const TARGETS: &[Target] = &[
    Target::Normal,
    Target::User,
    Target::AdjacentAlly,
    Target::AdjacentAllyOrSelf,
    Target::AdjacentFoe,
    Target::AllAdjacent,
    Target::AllAdjacentFoes,
    Target::Allies,
    Target::AllySide,
    Target::AllyTeam,
    Target::Any,
    Target::FoeSide,
    Target::RandomNormal,
    Target::Scripted,
    Target::All,
];

impl Target {
    /// Corpus spelling of the targeting mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Normal => "normal",
            Target::User => "self",
            Target::AdjacentAlly => "adjacentAlly",
            Target::AdjacentAllyOrSelf => "adjacentAllyOrSelf",
            Target::AdjacentFoe => "adjacentFoe",
            Target::AllAdjacent => "allAdjacent",
            Target::AllAdjacentFoes => "allAdjacentFoes",
            Target::Allies => "allies",
            Target::AllySide => "allySide",
            Target::AllyTeam => "allyTeam",
            Target::Any => "any",
            Target::FoeSide => "foeSide",
            Target::RandomNormal => "randomNormal",
            Target::Scripted => "scripted",
            Target::All => "all",
        }
    }
}

impl FromStr for Target {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(TARGETS, s, Target::as_str).ok_or_else(|| UnknownName::new("target", s))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
