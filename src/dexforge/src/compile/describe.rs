//! Generated short descriptions
//!
//! Clauses are joined in a fixed order: priority first, then the effect.

use super::effect::Resolution;
use crate::record::{SecondaryKind, StatBoosts};
use crate::reference::{Stat, StatusCondition};

pub const NO_EFFECT: &str = "No additional effect.";

/// Build the description for a move with the given priority and resolved effect
pub fn describe(priority: i8, resolution: Option<&Resolution>) -> String {
    let mut clauses = Vec::new();

    match priority {
        p if p > 0 => clauses.push("Usually goes first.".to_string()),
        p if p < 0 => clauses.push("Goes last.".to_string()),
        _ => {}
    }

    if let Some(clause) = resolution.and_then(effect_clause) {
        clauses.push(clause);
    }

    if clauses.is_empty() {
        return NO_EFFECT.to_string();
    }
    clauses.join(" ")
}

fn effect_clause(resolution: &Resolution) -> Option<String> {
    let clause = match resolution {
        Resolution::Secondary(secondary) => {
            let chance = secondary.chance.unwrap_or(100);
            match &secondary.effect {
                SecondaryKind::Status(status) => chance_clause(chance, status_verb(*status)),
                SecondaryKind::Boosts(boosts) => {
                    chance_clause(chance, boost_verb(boosts, "the target's"))
                }
                SecondaryKind::VolatileStatus(volatile) => match volatile.as_str() {
                    "flinch" => chance_clause(chance, ("flinch", "Makes the target flinch")),
                    "confusion" => {
                        chance_clause(chance, ("confuse the target", "Confuses the target"))
                    }
                    _ => return None,
                },
                SecondaryKind::Custom => return None,
            }
        }
        Resolution::DirectBoosts(boosts) => {
            let raising = boosts.iter().all(|(_, stages)| stages > 0);
            let whose = if raising { "the user's" } else { "the target's" };
            format!("{}.", boost_verb(boosts, whose).1)
        }
        Resolution::Drain(_) => "User recovers HP equal to damage dealt.".to_string(),
        Resolution::Recoil(_) => "User takes recoil damage.".to_string(),
        Resolution::CritRatio(_) => "High critical hit ratio.".to_string(),
    };
    Some(clause)
}

/// `"N% chance to <verb>."` below 100%, the sentence form otherwise
fn chance_clause<V: AsRef<str>, S: AsRef<str>>(chance: u8, forms: (V, S)) -> String {
    let (verb, sentence) = forms;
    if chance < 100 {
        format!("{}% chance to {}.", chance, verb.as_ref())
    } else {
        format!("{}.", sentence.as_ref())
    }
}

fn status_verb(status: StatusCondition) -> (&'static str, &'static str) {
    match status {
        StatusCondition::Paralysis => ("paralyze", "Paralyzes the target"),
        StatusCondition::Burn => ("burn", "Burns the target"),
        StatusCondition::Poison => ("poison", "Poisons the target"),
        StatusCondition::Toxic => ("badly poison", "Badly poisons the target"),
        StatusCondition::Sleep => ("put the target to sleep", "Puts the target to sleep"),
        StatusCondition::Freeze => ("freeze", "Freezes the target"),
    }
}

/// Infinitive and sentence forms for a stat change, e.g.
/// `("raise the user's Attack by 1", "Raises the user's Attack by 1")`
fn boost_verb(boosts: &StatBoosts, whose: &str) -> (String, String) {
    let lowering = boosts.iter().any(|(_, stages)| stages < 0);
    let (verb, sentence) = if lowering {
        ("lower", "Lowers")
    } else {
        ("raise", "Raises")
    };
    let stages = boosts
        .iter()
        .map(|(_, stages)| stages.unsigned_abs())
        .max()
        .unwrap_or(1);
    let tail = format!("{} {} by {}", whose, stat_list(boosts), stages);
    (format!("{} {}", verb, tail), format!("{} {}", sentence, tail))
}

fn stat_list(boosts: &StatBoosts) -> String {
    let core = [
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];
    if boosts.len() == core.len() && core.iter().all(|stat| boosts.get(*stat).is_some()) {
        return "stats".to_string();
    }

    let names: Vec<&str> = boosts.iter().map(|(stat, _)| stat.name()).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        _ => names.join(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Ratio, SecondaryEffect};

    fn secondary(chance: u8, effect: SecondaryKind) -> Resolution {
        Resolution::Secondary(SecondaryEffect {
            chance: Some(chance),
            effect,
        })
    }

    #[test]
    fn test_priority_then_effect() {
        let paralyze = secondary(10, SecondaryKind::Status(StatusCondition::Paralysis));
        assert_eq!(
            describe(1, Some(&paralyze)),
            "Usually goes first. 10% chance to paralyze."
        );
        assert_eq!(describe(-3, None), "Goes last.");
        assert_eq!(describe(0, None), NO_EFFECT);
    }

    #[test]
    fn test_full_chance_uses_sentence() {
        let burn = secondary(100, SecondaryKind::Status(StatusCondition::Burn));
        assert_eq!(describe(0, Some(&burn)), "Burns the target.");

        let flinch = secondary(100, SecondaryKind::VolatileStatus("flinch".into()));
        assert_eq!(describe(0, Some(&flinch)), "Makes the target flinch.");
    }

    #[test]
    fn test_volatile_clauses() {
        let flinch = secondary(30, SecondaryKind::VolatileStatus("flinch".into()));
        assert_eq!(describe(0, Some(&flinch)), "30% chance to flinch.");

        let confusion = secondary(10, SecondaryKind::VolatileStatus("confusion".into()));
        assert_eq!(describe(0, Some(&confusion)), "10% chance to confuse the target.");
    }

    #[test]
    fn test_boost_clauses() {
        let lower = secondary(
            20,
            SecondaryKind::Boosts(StatBoosts::new().with(Stat::Defense, -1)),
        );
        assert_eq!(
            describe(0, Some(&lower)),
            "20% chance to lower the target's Defense by 1."
        );

        let raise = Resolution::DirectBoosts(StatBoosts::new().with(Stat::Attack, 2));
        assert_eq!(describe(0, Some(&raise)), "Raises the user's Attack by 2.");

        let growl = Resolution::DirectBoosts(StatBoosts::new().with(Stat::Attack, -1));
        assert_eq!(describe(0, Some(&growl)), "Lowers the target's Attack by 1.");

        let all: StatBoosts = [
            Stat::Attack,
            Stat::Defense,
            Stat::SpecialAttack,
            Stat::SpecialDefense,
            Stat::Speed,
        ]
        .into_iter()
        .map(|stat| (stat, 1))
        .collect();
        assert_eq!(
            describe(0, Some(&Resolution::DirectBoosts(all))),
            "Raises the user's stats by 1."
        );

        let pair = Resolution::DirectBoosts(
            StatBoosts::new()
                .with(Stat::SpecialAttack, 1)
                .with(Stat::SpecialDefense, 1),
        );
        assert_eq!(
            describe(0, Some(&pair)),
            "Raises the user's Sp. Atk and Sp. Def by 1."
        );
    }

    #[test]
    fn test_fixed_phrases() {
        assert_eq!(
            describe(0, Some(&Resolution::Drain(Ratio(50, 100)))),
            "User recovers HP equal to damage dealt."
        );
        assert_eq!(
            describe(0, Some(&Resolution::Recoil(Ratio(1, 3)))),
            "User takes recoil damage."
        );
        assert_eq!(
            describe(2, Some(&Resolution::CritRatio(2))),
            "Usually goes first. High critical hit ratio."
        );
    }
}
