//! Reference lookup over an extracted record map
//!
//! Both lookups walk the map in id order, so results are stable for a given
//! corpus.

use std::collections::BTreeMap;

use crate::compile::Effect;
use crate::record::{MoveData, Record, SecondaryKind};
use crate::reference::{Category, DamageType};

/// Result limit used when a query sets none
pub const DEFAULT_LIMIT: usize = 10;

/// Filters for a move search. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveQuery {
    pub damage_type: Option<DamageType>,
    pub category: Option<Category>,
    /// Inclusive lower bound on base power; undeclared power counts as 0
    pub power_min: Option<u16>,
    /// Inclusive upper bound on base power
    pub power_max: Option<u16>,
    /// `Some(true)` keeps only moves with non-zero priority, `Some(false)` only zero
    pub has_priority: Option<bool>,
    /// `Some(true)` keeps only moves with a non-null secondary effect
    pub has_secondary: Option<bool>,
    pub limit: Option<usize>,
}

impl MoveQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a single record passes every filter. Abilities never match.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(data) = record.as_move() else {
            return false;
        };

        if self.damage_type.is_some() && data.damage_type != self.damage_type {
            return false;
        }
        if self.category.is_some() && data.category != self.category {
            return false;
        }

        let power = data.power.unwrap_or(0);
        if self.power_min.is_some_and(|min| power < min) {
            return false;
        }
        if self.power_max.is_some_and(|max| power > max) {
            return false;
        }

        if let Some(wanted) = self.has_priority {
            if wanted != (data.priority.unwrap_or(0) != 0) {
                return false;
            }
        }
        if let Some(wanted) = self.has_secondary {
            if wanted != data.secondary.is_some() {
                return false;
            }
        }
        true
    }

    /// Matching records in id order, at most `limit` of them
    pub fn run<'a>(&self, records: &'a BTreeMap<String, Record>) -> Vec<(&'a str, &'a Record)> {
        records
            .iter()
            .filter(|(_, record)| self.matches(record))
            .take(self.limit.unwrap_or(DEFAULT_LIMIT))
            .map(|(id, record)| (id.as_str(), record))
            .collect()
    }
}

/// First move that already uses the record channel `effect` resolves to.
///
/// Handy as a template when writing a custom move by hand.
pub fn reference_for_effect<'a>(
    records: &'a BTreeMap<String, Record>,
    effect: &Effect,
) -> Option<(&'a str, &'a Record)> {
    records
        .iter()
        .find(|(_, record)| record.as_move().is_some_and(|data| uses_channel(data, effect)))
        .map(|(id, record)| (id.as_str(), record))
}

fn uses_channel(data: &MoveData, effect: &Effect) -> bool {
    let secondary = data.secondary.as_ref().map(|secondary| &secondary.effect);
    match effect {
        Effect::Status(status) => {
            matches!(secondary, Some(SecondaryKind::Status(found)) if found == status)
        }
        Effect::Stat(_) => matches!(secondary, Some(SecondaryKind::Boosts(_))),
        Effect::Drain => data.drain.is_some(),
        Effect::Recoil => data.recoil.is_some(),
        Effect::Flinch => is_volatile(secondary, "flinch"),
        Effect::Confusion => is_volatile(secondary, "confusion"),
        Effect::HighCrit => data.crit_ratio.is_some_and(|ratio| ratio > 1),
    }
}

fn is_volatile(secondary: Option<&SecondaryKind>, name: &str) -> bool {
    matches!(secondary, Some(SecondaryKind::VolatileStatus(found)) if found == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::record::Kind;

    const CORPUS: &str = r#"export const Moves = {
	absorb: {
		num: 71, name: "Absorb", type: "Grass", category: "Special",
		basePower: 20, accuracy: 100, pp: 25, priority: 0,
		flags: {protect: 1, mirror: 1, heal: 1}, drain: [1, 2], secondary: null,
		target: "normal",
	},
	bite: {
		num: 44, name: "Bite", type: "Dark", category: "Physical",
		basePower: 60, accuracy: 100, pp: 25, priority: 0,
		flags: {contact: 1, protect: 1}, secondary: {chance: 30, volatileStatus: 'flinch'},
		target: "normal",
	},
	ember: {
		num: 52, name: "Ember", type: "Fire", category: "Special",
		basePower: 40, accuracy: 100, pp: 25, priority: 0,
		flags: {protect: 1}, secondary: {chance: 10, status: 'brn'},
		target: "normal",
	},
	quickattack: {
		num: 98, name: "Quick Attack", type: "Normal", category: "Physical",
		basePower: 40, accuracy: 100, pp: 30, priority: 1,
		flags: {contact: 1, protect: 1}, secondary: null,
		target: "normal",
	},
	slash: {
		num: 163, name: "Slash", type: "Normal", category: "Physical",
		basePower: 70, accuracy: 100, pp: 20, priority: 0, critRatio: 2,
		flags: {contact: 1, protect: 1}, secondary: null,
		target: "normal",
	},
	swordsdance: {
		num: 14, name: "Swords Dance", type: "Normal", category: "Status",
		basePower: 0, accuracy: true, pp: 20, priority: 0,
		flags: {snatch: 1}, boosts: {atk: 2}, secondary: null,
		target: "self",
	},
};
"#;

    fn records() -> BTreeMap<String, Record> {
        extract(CORPUS, Kind::Move).records
    }

    fn ids<'a>(results: &[(&'a str, &'a Record)]) -> Vec<&'a str> {
        results.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = records();
        let results = MoveQuery::new().run(&records);
        assert_eq!(
            ids(&results),
            vec!["absorb", "bite", "ember", "quickattack", "slash", "swordsdance"]
        );
    }

    #[test]
    fn test_filters() {
        let records = records();

        let normal_physical = MoveQuery {
            damage_type: Some(DamageType::Normal),
            category: Some(Category::Physical),
            ..MoveQuery::default()
        };
        assert_eq!(ids(&normal_physical.run(&records)), vec!["quickattack", "slash"]);

        let mid_power = MoveQuery {
            power_min: Some(40),
            power_max: Some(60),
            ..MoveQuery::default()
        };
        assert_eq!(ids(&mid_power.run(&records)), vec!["bite", "ember", "quickattack"]);

        let priority = MoveQuery {
            has_priority: Some(true),
            ..MoveQuery::default()
        };
        assert_eq!(ids(&priority.run(&records)), vec!["quickattack"]);

        let plain = MoveQuery {
            has_secondary: Some(false),
            power_min: Some(1),
            ..MoveQuery::default()
        };
        assert_eq!(ids(&plain.run(&records)), vec!["absorb", "quickattack", "slash"]);
    }

    #[test]
    fn test_limit() {
        let records = records();
        let query = MoveQuery {
            limit: Some(2),
            ..MoveQuery::default()
        };
        assert_eq!(ids(&query.run(&records)), vec!["absorb", "bite"]);
    }

    #[test]
    fn test_abilities_never_match() {
        let mut records = records();
        records.insert(
            "static".into(),
            Record::new("static", "Static", Kind::Ability),
        );
        let all = MoveQuery {
            limit: Some(100),
            ..MoveQuery::default()
        };
        assert!(all.run(&records).iter().all(|(id, _)| *id != "static"));
    }

    #[test]
    fn test_reference_for_effect() {
        let records = records();
        let lookup = |name: &str| {
            let effect: Effect = name.parse().unwrap();
            reference_for_effect(&records, &effect).map(|(id, _)| id)
        };
        assert_eq!(lookup("burn"), Some("ember"));
        assert_eq!(lookup("drain"), Some("absorb"));
        assert_eq!(lookup("flinch"), Some("bite"));
        assert_eq!(lookup("high_crit"), Some("slash"));
        assert_eq!(lookup("paralyze"), None);
        assert_eq!(lookup("recoil"), None);
        assert_eq!(lookup("confusion"), None);
        // direct boosts are not a secondary channel
        assert_eq!(lookup("boost_attack"), None);
    }
}
