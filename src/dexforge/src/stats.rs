//! Corpus statistics

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::record::{Body, Record};
use crate::reference::{Category, DamageType};

/// Base power bucket of a damaging move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PowerBand {
    #[serde(rename = "<50")]
    Weak,
    #[serde(rename = "50-79")]
    Moderate,
    #[serde(rename = "80-99")]
    Strong,
    #[serde(rename = "100-119")]
    Heavy,
    #[serde(rename = ">=120")]
    Extreme,
}

impl PowerBand {
    pub fn of(power: u16) -> Self {
        match power {
            0..=49 => PowerBand::Weak,
            50..=79 => PowerBand::Moderate,
            80..=99 => PowerBand::Strong,
            100..=119 => PowerBand::Heavy,
            _ => PowerBand::Extreme,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerBand::Weak => "<50",
            PowerBand::Moderate => "50-79",
            PowerBand::Strong => "80-99",
            PowerBand::Heavy => "100-119",
            PowerBand::Extreme => ">=120",
        }
    }
}

impl fmt::Display for PowerBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base power spread over damaging moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerSummary {
    pub min: u16,
    pub max: u16,
    pub mean: f64,
}

/// Counts over one extracted collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStats {
    pub records: usize,
    pub moves: usize,
    pub abilities: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_type: BTreeMap<DamageType, usize>,
    pub by_priority: BTreeMap<i8, usize>,
    pub with_secondary: usize,
    pub without_secondary: usize,
    /// Flag name and number of records carrying it, most common first
    pub flags: Vec<(String, usize)>,
    pub power: Option<PowerSummary>,
    pub power_bands: BTreeMap<PowerBand, usize>,
    /// Ability rating (one decimal) and number of abilities with it
    pub ratings: BTreeMap<String, usize>,
}

impl CorpusStats {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut stats = CorpusStats::default();
        let mut flags: BTreeMap<&str, usize> = BTreeMap::new();
        let mut powers: Vec<u16> = Vec::new();

        for record in records {
            stats.records += 1;
            for flag in record.flags.iter() {
                *flags.entry(flag).or_default() += 1;
            }

            match &record.body {
                Body::Move(data) => {
                    stats.moves += 1;
                    if let Some(category) = data.category {
                        *stats.by_category.entry(category).or_default() += 1;
                    }
                    if let Some(damage_type) = data.damage_type {
                        *stats.by_type.entry(damage_type).or_default() += 1;
                    }
                    *stats.by_priority.entry(data.priority.unwrap_or(0)).or_default() += 1;
                    if data.secondary.is_some() {
                        stats.with_secondary += 1;
                    } else {
                        stats.without_secondary += 1;
                    }
                    if let Some(power) = data.power.filter(|power| *power > 0) {
                        powers.push(power);
                        *stats.power_bands.entry(PowerBand::of(power)).or_default() += 1;
                    }
                }
                Body::Ability(data) => {
                    stats.abilities += 1;
                    if let Some(rating) = data.rating {
                        *stats.ratings.entry(format!("{:.1}", rating)).or_default() += 1;
                    }
                }
            }
        }

        stats.power = summarize(&powers);

        let mut flags: Vec<(String, usize)> = flags
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        // stable sort keeps names alphabetical within a count
        flags.sort_by(|a, b| b.1.cmp(&a.1));
        stats.flags = flags;

        stats
    }
}

fn summarize(powers: &[u16]) -> Option<PowerSummary> {
    let min = *powers.iter().min()?;
    let max = *powers.iter().max()?;
    let total: u64 = powers.iter().map(|&power| u64::from(power)).sum();
    Some(PowerSummary {
        min,
        max,
        mean: total as f64 / powers.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::record::Kind;

    const MOVES: &str = r#"const Moves = {
	ember: {
		num: 52, name: "Ember", type: "Fire", category: "Special",
		basePower: 40, accuracy: 100, pp: 25, priority: 0,
		flags: {protect: 1, mirror: 1}, secondary: {chance: 10, status: 'brn'},
	},
	flamethrower: {
		num: 53, name: "Flamethrower", type: "Fire", category: "Special",
		basePower: 90, accuracy: 100, pp: 15, priority: 0,
		flags: {protect: 1, mirror: 1}, secondary: {chance: 10, status: 'brn'},
	},
	quickattack: {
		num: 98, name: "Quick Attack", type: "Normal", category: "Physical",
		basePower: 40, accuracy: 100, pp: 30, priority: 1,
		flags: {contact: 1, protect: 1}, secondary: null,
	},
	hyperbeam: {
		num: 63, name: "Hyper Beam", type: "Normal", category: "Special",
		basePower: 150, accuracy: 90, pp: 5, priority: 0,
		flags: {recharge: 1, protect: 1, mirror: 1}, secondary: null,
	},
	growl: {
		num: 45, name: "Growl", type: "Normal", category: "Status",
		basePower: 0, accuracy: 100, pp: 40, priority: 0,
		flags: {sound: 1, protect: 1}, boosts: {atk: -1}, secondary: null,
	},
};
"#;

    fn stats() -> CorpusStats {
        let extraction = extract(MOVES, Kind::Move);
        CorpusStats::collect(extraction.records.values())
    }

    #[test]
    fn test_counts() {
        let stats = stats();
        assert_eq!(stats.records, 5);
        assert_eq!(stats.moves, 5);
        assert_eq!(stats.abilities, 0);
        assert_eq!(stats.by_category.get(&Category::Special), Some(&3));
        assert_eq!(stats.by_category.get(&Category::Status), Some(&1));
        assert_eq!(stats.by_type.get(&DamageType::Normal), Some(&3));
        assert_eq!(stats.by_priority.get(&1), Some(&1));
        assert_eq!(stats.by_priority.get(&0), Some(&4));
        assert_eq!((stats.with_secondary, stats.without_secondary), (2, 3));
    }

    #[test]
    fn test_flag_frequency_order() {
        let stats = stats();
        assert_eq!(stats.flags[0], ("protect".to_string(), 5));
        assert_eq!(stats.flags[1], ("mirror".to_string(), 3));
        // ties are alphabetical
        let singles: Vec<&str> = stats.flags[2..].iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(singles, vec!["contact", "recharge", "sound"]);
    }

    #[test]
    fn test_power_summary_skips_status_moves() {
        let stats = stats();
        let power = stats.power.unwrap();
        assert_eq!((power.min, power.max), (40, 150));
        assert!((power.mean - 80.0).abs() < f64::EPSILON);

        assert_eq!(stats.power_bands.get(&PowerBand::Weak), Some(&2));
        assert_eq!(stats.power_bands.get(&PowerBand::Strong), Some(&1));
        assert_eq!(stats.power_bands.get(&PowerBand::Extreme), Some(&1));
        assert_eq!(stats.power_bands.get(&PowerBand::Moderate), None);
    }

    #[test]
    fn test_power_band_edges() {
        assert_eq!(PowerBand::of(49), PowerBand::Weak);
        assert_eq!(PowerBand::of(50), PowerBand::Moderate);
        assert_eq!(PowerBand::of(99), PowerBand::Strong);
        assert_eq!(PowerBand::of(100), PowerBand::Heavy);
        assert_eq!(PowerBand::of(120), PowerBand::Extreme);
    }

    #[test]
    fn test_abilities() {
        let text = r#"export const Abilities = {
	static: { name: "Static", rating: 2, num: 9 },
	intimidate: { name: "Intimidate", rating: 3.5, num: 22 },
	levitate: { name: "Levitate", rating: 3.5, num: 26 },
};"#;
        let extraction = extract(text, Kind::Ability);
        let stats = CorpusStats::collect(extraction.records.values());
        assert_eq!((stats.records, stats.abilities), (3, 3));
        assert_eq!(stats.ratings.get("3.5"), Some(&2));
        assert_eq!(stats.ratings.get("2.0"), Some(&1));
        assert_eq!(stats.power, None);
    }

    #[test]
    fn test_empty() {
        let stats = CorpusStats::collect(std::iter::empty());
        assert_eq!(stats, CorpusStats::default());
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_value(stats()).unwrap();
        assert_eq!(json["by_category"]["Special"], 3);
        assert_eq!(json["power_bands"][">=120"], 1);
    }
}
