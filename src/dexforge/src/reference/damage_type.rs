//! Elemental damage type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lookup, UnknownName};

/// Elemental type of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DamageType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    Stellar,
}

/// All damage types in type-chart order
pub const DAMAGE_TYPES: &[DamageType] = &[
    DamageType::Normal,
    DamageType::Fire,
    DamageType::Water,
    DamageType::Electric,
    DamageType::Grass,
    DamageType::Ice,
    DamageType::Fighting,
    DamageType::Poison,
    DamageType::Ground,
    DamageType::Flying,
    DamageType::Psychic,
    DamageType::Bug,
    DamageType::Rock,
    DamageType::Ghost,
    DamageType::Dragon,
    DamageType::Dark,
    DamageType::Steel,
    DamageType::Fairy,
    DamageType::Stellar,
];

impl DamageType {
    /// Get the type name as written in the corpus
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Normal => "Normal",
            DamageType::Fire => "Fire",
            DamageType::Water => "Water",
            DamageType::Electric => "Electric",
            DamageType::Grass => "Grass",
            DamageType::Ice => "Ice",
            DamageType::Fighting => "Fighting",
            DamageType::Poison => "Poison",
            DamageType::Ground => "Ground",
            DamageType::Flying => "Flying",
            DamageType::Psychic => "Psychic",
            DamageType::Bug => "Bug",
            DamageType::Rock => "Rock",
            DamageType::Ghost => "Ghost",
            DamageType::Dragon => "Dragon",
            DamageType::Dark => "Dark",
            DamageType::Steel => "Steel",
            DamageType::Fairy => "Fairy",
            DamageType::Stellar => "Stellar",
        }
    }
}

impl FromStr for DamageType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(DAMAGE_TYPES, s, DamageType::name).ok_or_else(|| UnknownName::new("damage type", s))
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
