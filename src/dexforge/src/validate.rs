//! Validation of rendered move source
//!
//! Rendered text is read back through the extractor, so a record passes only
//! if the same tolerant reader that consumes corpora can recover it.

use crate::extract::extract;
use crate::record::{Kind, MoveData, Record};
use crate::reference::Category;

/// Key given to a standalone `{ ... }` record so the extractor can find it
const CANDIDATE_ID: &str = "candidate";

/// Fields every custom move must declare
const REQUIRED_FIELDS: &[&str] = &["num", "name", "type", "category", "basePower", "accuracy", "pp"];

/// Outcome of validating one piece of source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    /// No errors. Warnings do not make a record invalid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the source of one move record (a standalone `{ ... }`, a
/// `key: { ... },` entry or a full collection).
pub fn validate_move_source(text: &str) -> Validation {
    let mut validation = Validation::default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        validation.errors.push("input is empty".to_string());
        return validation;
    }

    let source = if trimmed.starts_with('{') {
        format!("\t{}: {}\n", CANDIDATE_ID, trimmed)
    } else {
        text.to_string()
    };

    let extraction = extract(&source, Kind::Move);
    for skipped in &extraction.skipped {
        validation.errors.push(format!(
            "record {} (line {}) could not be read: {}",
            skipped.id, skipped.line, skipped.reason
        ));
    }
    if extraction.is_empty() {
        if extraction.skipped.is_empty() {
            validation.errors.push("no record found".to_string());
        }
        return validation;
    }

    let several = extraction.len() > 1;
    for (id, record) in &extraction.records {
        let prefix = if several {
            format!("{}: ", id)
        } else {
            String::new()
        };
        let mut checked = Validation::default();
        check_record(record, &mut checked);
        validation
            .errors
            .extend(checked.errors.into_iter().map(|e| format!("{}{}", prefix, e)));
        validation
            .warnings
            .extend(checked.warnings.into_iter().map(|w| format!("{}{}", prefix, w)));
    }
    validation
}

fn check_record(record: &Record, validation: &mut Validation) {
    let Some(data) = record.as_move() else {
        validation.errors.push("record is not a move".to_string());
        return;
    };

    check_required(record, data, validation);
    check_num(record, validation);
    check_damage_channels(data, validation);
    check_direct_boosts(data, validation);

    if record.short_desc.is_none() {
        validation.warnings.push("missing shortDesc".to_string());
    }
}

/// Required fields that are absent, or present with a value the extractor rejected
fn check_required(record: &Record, data: &MoveData, validation: &mut Validation) {
    for &field in REQUIRED_FIELDS {
        let present = match field {
            "num" => record.num.is_some(),
            "name" => !record.name.is_empty(),
            "type" => data.damage_type.is_some(),
            "category" => data.category.is_some(),
            "basePower" => data.power.is_some(),
            "accuracy" => data.accuracy.is_some(),
            "pp" => data.pp.is_some(),
            _ => true,
        };
        if !present {
            validation
                .errors
                .push(format!("missing or invalid required field `{}`", field));
        }
    }
}

fn check_num(record: &Record, validation: &mut Validation) {
    if let Some(num) = record.num.filter(|num| *num >= 0) {
        validation.warnings.push(format!(
            "num {} is not negative; custom moves should use negative numbers",
            num
        ));
    }
}

/// Drain, recoil and crit ratio only work on a move that deals damage, and a
/// move uses at most one of drain and recoil
fn check_damage_channels(data: &MoveData, validation: &mut Validation) {
    if data.category == Some(Category::Status) && data.is_damaging() {
        validation
            .errors
            .push("Status moves must have basePower 0".to_string());
    }

    if !data.is_damaging() {
        let channels = [
            ("drain", data.drain.is_some()),
            ("recoil", data.recoil.is_some()),
            ("critRatio", data.crit_ratio.is_some()),
        ];
        for (field, _) in channels.iter().filter(|(_, set)| *set) {
            validation
                .errors
                .push(format!("{} requires basePower above 0", field));
        }
    }

    if data.drain.is_some() && data.recoil.is_some() {
        validation
            .errors
            .push("drain and recoil cannot both be set".to_string());
    }
}

fn check_direct_boosts(data: &MoveData, validation: &mut Validation) {
    let has_boosts = data.boosts.as_ref().is_some_and(|boosts| !boosts.is_empty());
    if has_boosts && data.category.is_some_and(|category| category != Category::Status) {
        validation.warnings.push(
            "direct boosts on a damaging move apply every time; use secondary for a chance"
                .to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{compile, Intent};
    use crate::reference::DamageType;

    #[test]
    fn test_compiled_source_is_valid() {
        let mut intent = Intent::new("Thunder Strike", DamageType::Electric, Category::Physical);
        intent.power = 90;
        intent.effect_name = Some("paralyze".into());
        intent.effect_chance = Some(10);
        let compiled = compile(&intent).unwrap();

        let validation = validate_move_source(&compiled.source);
        assert!(validation.is_valid(), "{:?}", validation.errors);
        assert!(validation.warnings.is_empty(), "{:?}", validation.warnings);
    }

    #[test]
    fn test_standalone_object() {
        let text = r#"{
	num: -10001,
	name: "Pebble Toss",
	type: "Rock",
	category: "Physical",
	basePower: 30,
	accuracy: 95,
	pp: 20,
	shortDesc: "No additional effect.",
}"#;
        let validation = validate_move_source(text);
        assert_eq!(validation, Validation::default());
    }

    #[test]
    fn test_empty_input() {
        let validation = validate_move_source("  \n\t");
        assert_eq!(validation.errors, vec!["input is empty".to_string()]);
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_missing_fields() {
        let validation = validate_move_source(r#"{ name: "Half Done", type: "Fire", basePower: 40 }"#);
        let missing: Vec<&str> = validation
            .errors
            .iter()
            .filter_map(|e| e.strip_prefix("missing or invalid required field "))
            .collect();
        assert_eq!(missing, vec!["`num`", "`category`", "`accuracy`", "`pp`"]);
        assert_eq!(validation.warnings, vec!["missing shortDesc".to_string()]);
    }

    #[test]
    fn test_invalid_value_counts_as_missing() {
        let validation = validate_move_source(
            r#"{ num: -1, name: "Odd", type: "Plasma", category: "Special", basePower: 40, accuracy: 100, pp: 10, shortDesc: "x" }"#,
        );
        assert_eq!(
            validation.errors,
            vec!["missing or invalid required field `type`".to_string()]
        );
    }

    #[test]
    fn test_non_negative_num_warns() {
        let validation = validate_move_source(
            r#"{ num: 42, name: "Borrowed", type: "Fire", category: "Special", basePower: 40, accuracy: 100, pp: 10, shortDesc: "x" }"#,
        );
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.warnings[0].starts_with("num 42"));
    }

    #[test]
    fn test_damage_channel_errors() {
        let validation = validate_move_source(
            r#"{ num: -1, name: "Leech", type: "Grass", category: "Status", basePower: 0, accuracy: 100, pp: 10, drain: [1, 2], shortDesc: "x" }"#,
        );
        assert_eq!(
            validation.errors,
            vec!["drain requires basePower above 0".to_string()]
        );

        let validation = validate_move_source(
            r#"{ num: -1, name: "Both", type: "Grass", category: "Physical", basePower: 80, accuracy: 100, pp: 10, drain: [1, 2], recoil: [1, 4], shortDesc: "x" }"#,
        );
        assert_eq!(
            validation.errors,
            vec!["drain and recoil cannot both be set".to_string()]
        );
    }

    #[test]
    fn test_unreadable_record() {
        let validation = validate_move_source("{ basePower: 40, type: \"Fire\" }");
        assert_eq!(validation.errors.len(), 1);
        assert!(validation.errors[0].starts_with("record candidate (line 1)"));

        let validation = validate_move_source("just some words");
        assert_eq!(validation.errors, vec!["no record found".to_string()]);
    }

    #[test]
    fn test_collection_prefixes_ids() {
        let text = r#"export const Moves = {
	one: { num: -1, name: "One", type: "Fire", category: "Special", basePower: 40, accuracy: 100, pp: 10, shortDesc: "x" },
	two: { num: -2, name: "Two", type: "Fire", category: "Special", basePower: 40, accuracy: 100, shortDesc: "x" },
};"#;
        let validation = validate_move_source(text);
        assert_eq!(
            validation.errors,
            vec!["two: missing or invalid required field `pp`".to_string()]
        );
    }
}
