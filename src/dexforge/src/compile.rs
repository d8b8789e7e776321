//! Effect compiler: intent in, complete move record out
//!
//! Compilation validates the whole intent first, then derives flags,
//! resolves the named effect onto a single record channel, writes a
//! description when none was supplied and renders the corpus text.

pub mod describe;
pub mod effect;
pub mod flags;
pub mod intent;

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::record::{Body, MoveData, Record};
use crate::reference::{Category, Target};
use crate::render::render_entry;

pub use describe::describe;
pub use effect::{Effect, Resolution, UnknownEffect, EFFECT_NAMES};
pub use flags::resolve_flags;
pub use intent::{Intent, IntentAccuracy, IntentError};

/// First numeric id handed out to custom records
pub const DEFAULT_NUM_START: i32 = -10001;

/// Knobs for a compilation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Numeric id of the record; for a batch, the id of the first intent
    pub num: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            num: DEFAULT_NUM_START,
        }
    }
}

/// Non-fatal findings surfaced with a compiled record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The effect name matched nothing; the move was compiled without an effect
    UnknownEffect(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownEffect(name) => {
                write!(f, "unknown effect {:?}, compiled with no effect", name)
            }
        }
    }
}

/// A compiled record with its rendered corpus entry
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub record: Record,
    /// Corpus notation of the record, as one collection entry
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile one intent with the default numeric id
pub fn compile(intent: &Intent) -> Result<Compiled, IntentError> {
    compile_with(intent, &CompileOptions::default())
}

/// Compile one intent
pub fn compile_with(intent: &Intent, options: &CompileOptions) -> Result<Compiled, IntentError> {
    if options.num >= 0 {
        return Err(IntentError::NonNegativeNum(options.num));
    }
    let checked = intent.check()?;

    let mut diagnostics = Vec::new();
    if let Some(unknown) = &checked.unknown_effect {
        warn!(name = %intent.name, effect = %unknown.0, "unknown effect, compiling without one");
        diagnostics.push(Diagnostic::UnknownEffect(unknown.0.clone()));
    }

    let resolution = checked
        .effect
        .map(|effect| effect.resolve(intent.category, checked.chance, checked.value));

    let mut data = MoveData {
        damage_type: Some(intent.damage_type),
        category: Some(intent.category),
        power: Some(checked.power),
        accuracy: Some(checked.accuracy),
        pp: Some(checked.power_points),
        priority: Some(checked.priority),
        target: Some(target_for(intent.category, resolution.as_ref())),
        ..MoveData::default()
    };
    match resolution.clone() {
        Some(Resolution::Secondary(secondary)) => data.secondary = Some(secondary),
        Some(Resolution::DirectBoosts(boosts)) => data.boosts = Some(boosts),
        Some(Resolution::Drain(ratio)) => data.drain = Some(ratio),
        Some(Resolution::Recoil(ratio)) => data.recoil = Some(ratio),
        Some(Resolution::CritRatio(ratio)) => data.crit_ratio = Some(ratio),
        None => {}
    }

    let short_desc = match intent.description.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => describe(checked.priority, resolution.as_ref()),
    };

    let record = Record {
        id: checked.id,
        name: intent.name.clone(),
        num: Some(options.num),
        flags: resolve_flags(intent),
        short_desc: Some(short_desc),
        body: Body::Move(data),
    };
    let source = render_entry(&record);

    debug!(id = %record.id, num = options.num, "compiled move");
    Ok(Compiled {
        record,
        source,
        diagnostics,
    })
}

/// Status moves that only raise stats aim at the user
fn target_for(category: Category, resolution: Option<&Resolution>) -> Target {
    match resolution {
        Some(Resolution::DirectBoosts(boosts))
            if category == Category::Status && boosts.iter().all(|(_, stages)| stages > 0) =>
        {
            Target::User
        }
        _ => Target::Normal,
    }
}

/// An intent of a batch that failed to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the intent in the batch
    pub index: usize,
    pub name: String,
    pub error: IntentError,
}

/// Outcome of [`compile_batch`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub compiled: Vec<Compiled>,
    pub failures: Vec<BatchFailure>,
}

/// Compile a list of intents.
///
/// The intent at position `i` gets numeric id `options.num - i`, so ids stay
/// unique and stable within the batch even when some intents fail. A failing
/// intent does not stop the others.
pub fn compile_batch(intents: &[Intent], options: &CompileOptions) -> Batch {
    let mut batch = Batch::default();
    let mut seen = BTreeSet::new();

    for (index, intent) in intents.iter().enumerate() {
        let offset = i32::try_from(index).unwrap_or(i32::MAX);
        let num_options = CompileOptions {
            num: options.num.saturating_sub(offset),
        };
        let result = compile_with(intent, &num_options).and_then(|compiled| {
            if seen.insert(compiled.record.id.clone()) {
                Ok(compiled)
            } else {
                Err(IntentError::DuplicateId(compiled.record.id))
            }
        });

        match result {
            Ok(compiled) => batch.compiled.push(compiled),
            Err(error) => {
                debug!(index, name = %intent.name, "batch intent failed: {}", error);
                batch.failures.push(BatchFailure {
                    index,
                    name: intent.name.clone(),
                    error,
                });
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::record::{Accuracy, Kind, Ratio, SecondaryEffect, SecondaryKind, StatBoosts};
    use crate::reference::{DamageType, Stat, StatusCondition};
    use crate::render::wrap_collection;

    fn moved(compiled: &Compiled) -> &MoveData {
        compiled.record.as_move().unwrap()
    }

    fn thunder_strike() -> Intent {
        let mut intent = Intent::new("Thunder Strike", DamageType::Electric, Category::Physical);
        intent.power = 90;
        intent.accuracy = IntentAccuracy::Percent(100);
        intent.power_points = 15;
        intent.priority = 1;
        intent.effect_name = Some("paralyze".into());
        intent.effect_chance = Some(10);
        intent
    }

    #[test]
    fn test_thunder_strike() {
        let compiled = compile(&thunder_strike()).unwrap();
        let data = moved(&compiled);
        assert_eq!(
            data.secondary,
            Some(SecondaryEffect {
                chance: Some(10),
                effect: SecondaryKind::Status(StatusCondition::Paralysis),
            })
        );
        assert!(compiled.record.flags.contains("contact"));
        let desc = compiled.record.short_desc.as_deref().unwrap();
        assert!(desc.starts_with("Usually goes first."));
        assert!(desc.ends_with("10% chance to paralyze."));
        assert_eq!(compiled.record.num, Some(DEFAULT_NUM_START));
        assert!(compiled.diagnostics.is_empty());
    }

    #[test]
    fn test_drain_leaf() {
        let mut intent = Intent::new("Drain Leaf", DamageType::Grass, Category::Special);
        intent.power = 75;
        intent.power_points = 10;
        intent.effect_name = Some("drain".into());
        intent.effect_value = Some(50);

        let compiled = compile(&intent).unwrap();
        let data = moved(&compiled);
        assert_eq!(data.drain, Some(Ratio(50, 100)));
        assert_eq!(data.secondary, None);
        assert!(compiled.record.flags.contains("heal"));
        assert!(!compiled.record.flags.contains("contact"));
        assert_eq!(
            compiled.record.short_desc.as_deref(),
            Some("User recovers HP equal to damage dealt.")
        );
    }

    #[test]
    fn test_recoil_uses_exact_fraction() {
        let mut intent = Intent::new("Head Smash Jr", DamageType::Rock, Category::Physical);
        intent.power = 120;
        intent.effect_name = Some("recoil".into());
        intent.effect_value = Some(33);

        let compiled = compile(&intent).unwrap();
        assert_eq!(moved(&compiled).recoil, Some(Ratio(1, 3)));
    }

    #[test]
    fn test_status_move_boosts_self() {
        let mut intent = Intent::new("Power Up", DamageType::Normal, Category::Status);
        intent.effect_name = Some("boost_attack".into());
        intent.effect_value = Some(2);

        let compiled = compile(&intent).unwrap();
        let data = moved(&compiled);
        assert_eq!(data.boosts, Some(StatBoosts::new().with(Stat::Attack, 2)));
        assert_eq!(data.secondary, None);
        assert_eq!(data.target, Some(Target::User));
        assert!(compiled.record.flags.contains("snatch"));
        assert_eq!(
            compiled.record.short_desc.as_deref(),
            Some("Raises the user's Attack by 2.")
        );
    }

    #[test]
    fn test_status_move_lowering_targets_foe() {
        let mut intent = Intent::new("Snarl Lite", DamageType::Dark, Category::Status);
        intent.effect_name = Some("lower_attack".into());

        let compiled = compile(&intent).unwrap();
        assert_eq!(moved(&compiled).target, Some(Target::Normal));
    }

    #[test]
    fn test_unknown_effect_compiles_with_diagnostic() {
        let mut intent = thunder_strike();
        intent.effect_name = Some("teleport".into());
        intent.priority = 0;

        let compiled = compile(&intent).unwrap();
        assert_eq!(
            compiled.diagnostics,
            vec![Diagnostic::UnknownEffect("teleport".into())]
        );
        assert_eq!(moved(&compiled).secondary, None);
        assert_eq!(
            compiled.record.short_desc.as_deref(),
            Some(describe::NO_EFFECT)
        );
    }

    #[test]
    fn test_description_verbatim() {
        let mut intent = thunder_strike();
        intent.description = Some("A custom line.".into());
        let compiled = compile(&intent).unwrap();
        assert_eq!(compiled.record.short_desc.as_deref(), Some("A custom line."));
    }

    #[test]
    fn test_invalid_intent_produces_no_record() {
        let mut intent = thunder_strike();
        intent.accuracy = IntentAccuracy::Percent(0);
        let err = compile(&intent).unwrap_err();
        assert_eq!(err.field(), "accuracy");
        assert!(err.to_string().contains("between 1 and 100"));
    }

    #[test]
    fn test_non_negative_num_rejected() {
        let err = compile_with(&thunder_strike(), &CompileOptions { num: 5 }).unwrap_err();
        assert_eq!(err, IntentError::NonNegativeNum(5));
    }

    #[test]
    fn test_always_hits_accuracy() {
        let mut intent = thunder_strike();
        intent.accuracy = IntentAccuracy::Flag(true);
        let compiled = compile(&intent).unwrap();
        assert_eq!(moved(&compiled).accuracy, Some(Accuracy::AlwaysHits));
        assert!(compiled.source.contains("\t\taccuracy: true,\n"));
    }

    #[test]
    fn test_effect_channels_are_exclusive() {
        for category in [Category::Physical, Category::Special, Category::Status] {
            for name in EFFECT_NAMES {
                let mut intent = Intent::new("Probe", DamageType::Normal, category);
                intent.power = if category == Category::Status { 0 } else { 80 };
                intent.effect_name = Some(name.to_string());
                let Ok(compiled) = compile(&intent) else {
                    // drain/recoil/high_crit are rejected on Status moves
                    continue;
                };
                let data = moved(&compiled);
                let channels = [
                    data.drain.is_some(),
                    data.recoil.is_some(),
                    data.secondary.is_some(),
                    data.boosts.is_some(),
                    data.crit_ratio.is_some(),
                ];
                assert_eq!(
                    channels.iter().filter(|set| **set).count(),
                    1,
                    "{} on {:?}",
                    name,
                    category
                );
                if data.boosts.is_some() {
                    assert_eq!(category, Category::Status);
                }
            }
        }
    }

    #[test]
    fn test_non_damaging_moves_have_no_damage_channels() {
        for name in EFFECT_NAMES {
            let mut intent = Intent::new("Quiet", DamageType::Fairy, Category::Status);
            intent.effect_name = Some(name.to_string());
            if let Ok(compiled) = compile(&intent) {
                let data = moved(&compiled);
                assert!(data.drain.is_none() && data.recoil.is_none() && data.crit_ratio.is_none());
            }
        }
    }

    #[test]
    fn test_compile_then_extract_round_trip() {
        let mut intents = vec![thunder_strike()];
        for name in EFFECT_NAMES {
            let status_only = name.starts_with("boost_") || name.starts_with("lower_");
            for category in [Category::Special, Category::Status] {
                if category == Category::Status && !status_only {
                    continue;
                }
                let mut intent = Intent::new(
                    format!("Round {} {:?}", name, category),
                    DamageType::Water,
                    category,
                );
                intent.power = if category == Category::Status { 0 } else { 70 };
                intent.priority = -1;
                intent.effect_name = Some(name.to_string());
                intent.effect_chance = Some(40);
                intents.push(intent);
            }
        }

        let batch = compile_batch(&intents, &CompileOptions::default());
        assert!(batch.failures.is_empty(), "{:?}", batch.failures);

        for compiled in &batch.compiled {
            let corpus = wrap_collection(Kind::Move, [&compiled.record]);
            let extraction = extract(&corpus, Kind::Move);
            assert_eq!(
                extraction.get(&compiled.record.id),
                Some(&compiled.record),
                "{}",
                corpus
            );
        }

        // the rendered entry alone is extractable too
        for compiled in &batch.compiled {
            let extraction = extract(&compiled.source, Kind::Move);
            assert_eq!(extraction.get(&compiled.record.id), Some(&compiled.record));
        }
    }

    #[test]
    fn test_batch_numbers_and_failures() {
        let mut bad = thunder_strike();
        bad.name = "Bad".into();
        bad.power_points = 0;

        let mut twin = thunder_strike();
        twin.name = "thunder-strike".into();

        let mut other = thunder_strike();
        other.name = "Other".into();

        let batch = compile_batch(
            &[thunder_strike(), bad, twin, other],
            &CompileOptions { num: -20000 },
        );

        let nums: Vec<_> = batch.compiled.iter().map(|c| c.record.num).collect();
        assert_eq!(nums, vec![Some(-20000), Some(-20003)]);

        let failed: Vec<_> = batch.failures.iter().map(|f| (f.index, f.error.field())).collect();
        assert_eq!(failed, vec![(1, "powerPoints"), (2, "name")]);
        assert_eq!(
            batch.failures[1].error,
            IntentError::DuplicateId("thunderstrike".into())
        );
    }

    #[test]
    fn test_compiled_nums_are_negative() {
        let batch = compile_batch(&vec![thunder_strike(); 3], &CompileOptions::default());
        // duplicates fail, the first still compiles
        assert_eq!(batch.compiled.len(), 1);
        assert!(batch
            .compiled
            .iter()
            .all(|c| c.record.num.is_some_and(|n| n < 0)));
    }
}
