//! Named effects and the record channel each one resolves to

use std::fmt;
use std::str::FromStr;

use crate::record::{Ratio, SecondaryEffect, SecondaryKind, StatBoosts};
use crate::reference::{Category, Stat, StatusCondition};

/// Stats covered by the `*_all` effects
const CORE_STATS: [Stat; 5] = [
    Stat::Attack,
    Stat::Defense,
    Stat::SpecialAttack,
    Stat::SpecialDefense,
    Stat::Speed,
];

/// Canonical names of every effect the compiler knows
pub const EFFECT_NAMES: &[&str] = &[
    "paralyze",
    "burn",
    "poison",
    "toxic",
    "sleep",
    "freeze",
    "boost_attack",
    "boost_defense",
    "boost_special_attack",
    "boost_special_defense",
    "boost_speed",
    "boost_all",
    "lower_attack",
    "lower_defense",
    "lower_special_attack",
    "lower_special_defense",
    "lower_speed",
    "lower_all",
    "drain",
    "recoil",
    "flinch",
    "confusion",
    "high_crit",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect {0:?}")]
pub struct UnknownEffect(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Raise,
    Lower,
}

impl Direction {
    fn sign(&self) -> i8 {
        match self {
            Direction::Raise => 1,
            Direction::Lower => -1,
        }
    }
}

/// Which stats a stat effect touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatScope {
    One(Stat),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    pub direction: Direction,
    pub scope: StatScope,
}

impl StatChange {
    /// Stage vector for this change, `stages` deep
    pub fn delta(&self, stages: u8) -> StatBoosts {
        let stages = i8::try_from(stages).unwrap_or(i8::MAX) * self.direction.sign();
        match self.scope {
            StatScope::One(stat) => StatBoosts::new().with(stat, stages),
            StatScope::All => CORE_STATS.iter().map(|&stat| (stat, stages)).collect(),
        }
    }
}

/// A named effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Status(StatusCondition),
    Stat(StatChange),
    Drain,
    Recoil,
    Flinch,
    Confusion,
    HighCrit,
}

/// The single record channel an effect populates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Secondary(SecondaryEffect),
    DirectBoosts(StatBoosts),
    Drain(Ratio),
    Recoil(Ratio),
    CritRatio(u8),
}

impl Effect {
    /// Chance used when the intent gives none (or 0)
    pub fn default_chance(&self) -> u8 {
        match self {
            Effect::Flinch => 30,
            Effect::Confusion => 10,
            _ => 100,
        }
    }

    /// Magnitude used when the intent gives none
    pub fn default_value(&self) -> u8 {
        match self {
            Effect::Drain => 50,
            Effect::Recoil => 25,
            Effect::HighCrit => 2,
            _ => 1,
        }
    }

    /// Drain, recoil and crit ratio only make sense on a damaging move
    pub fn needs_damage(&self) -> bool {
        matches!(self, Effect::Drain | Effect::Recoil | Effect::HighCrit)
    }

    /// Map this effect onto exactly one record channel
    pub fn resolve(&self, category: Category, chance: Option<u8>, value: Option<u8>) -> Resolution {
        let chance = match chance {
            Some(c) if c > 0 => c,
            _ => self.default_chance(),
        };
        let value = value.unwrap_or_else(|| self.default_value());
        let secondary = |effect| {
            Resolution::Secondary(SecondaryEffect {
                chance: Some(chance),
                effect,
            })
        };

        match self {
            Effect::Status(status) => secondary(SecondaryKind::Status(*status)),
            Effect::Stat(change) if category == Category::Status => {
                Resolution::DirectBoosts(change.delta(value))
            }
            Effect::Stat(change) => secondary(SecondaryKind::Boosts(change.delta(1))),
            Effect::Drain => Resolution::Drain(Ratio(u32::from(value), 100)),
            Effect::Recoil => Resolution::Recoil(recoil_ratio(value)),
            Effect::Flinch => secondary(SecondaryKind::VolatileStatus("flinch".to_string())),
            Effect::Confusion => secondary(SecondaryKind::VolatileStatus("confusion".to_string())),
            Effect::HighCrit => Resolution::CritRatio(value.max(2)),
        }
    }
}

/// 25, 33 and 50 percent map to the exact fractions the corpus uses
fn recoil_ratio(percent: u8) -> Ratio {
    match percent {
        25 => Ratio(1, 4),
        33 => Ratio(1, 3),
        50 => Ratio(1, 2),
        other => Ratio(u32::from(other), 100),
    }
}

fn stat_key(stat: Stat) -> &'static str {
    match stat {
        Stat::Attack => "attack",
        Stat::Defense => "defense",
        Stat::SpecialAttack => "special_attack",
        Stat::SpecialDefense => "special_defense",
        Stat::Speed => "speed",
        Stat::Accuracy => "accuracy",
        Stat::Evasion => "evasion",
    }
}

fn status_key(status: StatusCondition) -> &'static str {
    match status {
        StatusCondition::Paralysis => "paralyze",
        StatusCondition::Burn => "burn",
        StatusCondition::Poison => "poison",
        StatusCondition::Toxic => "toxic",
        StatusCondition::Sleep => "sleep",
        StatusCondition::Freeze => "freeze",
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    /// Case-insensitive; `-` and spaces are read as `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        let effect = match key.as_str() {
            "paralyze" => Effect::Status(StatusCondition::Paralysis),
            "burn" => Effect::Status(StatusCondition::Burn),
            "poison" => Effect::Status(StatusCondition::Poison),
            "toxic" => Effect::Status(StatusCondition::Toxic),
            "sleep" => Effect::Status(StatusCondition::Sleep),
            "freeze" => Effect::Status(StatusCondition::Freeze),
            "drain" => Effect::Drain,
            "recoil" => Effect::Recoil,
            "flinch" => Effect::Flinch,
            "confusion" | "confuse" => Effect::Confusion,
            "high_crit" => Effect::HighCrit,
            other => {
                let (direction, rest) = if let Some(rest) = other.strip_prefix("boost_") {
                    (Direction::Raise, rest)
                } else if let Some(rest) = other.strip_prefix("lower_") {
                    (Direction::Lower, rest)
                } else {
                    return Err(UnknownEffect(s.trim().to_string()));
                };
                let scope = match rest {
                    "all" => StatScope::All,
                    "attack" => StatScope::One(Stat::Attack),
                    "defense" => StatScope::One(Stat::Defense),
                    "special_attack" => StatScope::One(Stat::SpecialAttack),
                    "special_defense" => StatScope::One(Stat::SpecialDefense),
                    "speed" => StatScope::One(Stat::Speed),
                    _ => return Err(UnknownEffect(s.trim().to_string())),
                };
                Effect::Stat(StatChange { direction, scope })
            }
        };
        Ok(effect)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Status(status) => f.write_str(status_key(*status)),
            Effect::Stat(change) => {
                let prefix = match change.direction {
                    Direction::Raise => "boost",
                    Direction::Lower => "lower",
                };
                let stat = match change.scope {
                    StatScope::All => "all",
                    StatScope::One(stat) => stat_key(stat),
                };
                write!(f, "{}_{}", prefix, stat)
            }
            Effect::Drain => f.write_str("drain"),
            Effect::Recoil => f.write_str("recoil"),
            Effect::Flinch => f.write_str("flinch"),
            Effect::Confusion => f.write_str("confusion"),
            Effect::HighCrit => f.write_str("high_crit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for name in EFFECT_NAMES {
            let effect: Effect = name.parse().unwrap();
            assert_eq!(effect.to_string(), *name);
        }
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(
            "Boost-Attack".parse::<Effect>(),
            Ok(Effect::Stat(StatChange {
                direction: Direction::Raise,
                scope: StatScope::One(Stat::Attack),
            }))
        );
        assert_eq!("high crit".parse::<Effect>(), Ok(Effect::HighCrit));
        assert_eq!("confuse".parse::<Effect>(), Ok(Effect::Confusion));
        assert_eq!(
            "boost_luck".parse::<Effect>(),
            Err(UnknownEffect("boost_luck".into()))
        );
    }

    #[test]
    fn test_default_chances() {
        let secondary_chance =
            |effect: Effect| match effect.resolve(Category::Physical, None, None) {
                Resolution::Secondary(secondary) => secondary.chance,
                other => panic!("unexpected {:?}", other),
            };
        assert_eq!(secondary_chance(Effect::Flinch), Some(30));
        assert_eq!(secondary_chance(Effect::Confusion), Some(10));
        assert_eq!(secondary_chance(Effect::Status(StatusCondition::Burn)), Some(100));
        // zero means "use the default"
        assert_eq!(
            Effect::Flinch.resolve(Category::Physical, Some(0), None),
            Effect::Flinch.resolve(Category::Physical, None, None)
        );
    }

    #[test]
    fn test_recoil_ratios() {
        assert_eq!(recoil_ratio(25), Ratio(1, 4));
        assert_eq!(recoil_ratio(33), Ratio(1, 3));
        assert_eq!(recoil_ratio(50), Ratio(1, 2));
        assert_eq!(recoil_ratio(40), Ratio(40, 100));
    }

    #[test]
    fn test_stat_effect_channel_depends_on_category() {
        let lower_all: Effect = "lower_all".parse().unwrap();
        match lower_all.resolve(Category::Status, None, Some(2)) {
            Resolution::DirectBoosts(boosts) => {
                assert_eq!(boosts.len(), 5);
                assert!(boosts.iter().all(|(_, stages)| stages == -2));
            }
            other => panic!("unexpected {:?}", other),
        }
        match lower_all.resolve(Category::Special, Some(20), Some(2)) {
            Resolution::Secondary(secondary) => {
                assert_eq!(secondary.chance, Some(20));
                assert!(matches!(secondary.effect, SecondaryKind::Boosts(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_crit_ratio_floor() {
        assert_eq!(
            Effect::HighCrit.resolve(Category::Physical, None, Some(1)),
            Resolution::CritRatio(2)
        );
        assert_eq!(
            Effect::HighCrit.resolve(Category::Physical, None, Some(3)),
            Resolution::CritRatio(3)
        );
    }
}
