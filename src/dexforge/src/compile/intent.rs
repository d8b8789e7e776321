//! Effect intents and their validation

use serde::{Deserialize, Serialize};

use super::effect::{Effect, UnknownEffect};
use crate::record::{to_id, Accuracy};
use crate::reference::{Category, DamageType};

/// Highest base power accepted for a custom move
pub const MAX_POWER: i64 = 999;
/// Highest PP accepted for a custom move
pub const MAX_POWER_POINTS: i64 = 64;
/// Priority bracket bounds
pub const PRIORITY_RANGE: (i64, i64) = (-7, 5);
/// Stat stages can change by at most this much in one step
pub const MAX_STAGES: i64 = 6;
/// Highest critical-hit stage a move can declare
pub const MAX_CRIT_RATIO: i64 = 5;

/// Abstract description of a move to compile.
///
/// Deserializes from the camelCase layout used by batch files; the corpus
/// spellings `type`, `basePower`, `pp`, `effect` and `contact` are accepted
/// as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(alias = "type")]
    pub damage_type: DamageType,
    pub category: Category,
    #[serde(default, alias = "basePower")]
    pub power: i64,
    #[serde(default)]
    pub accuracy: IntentAccuracy,
    #[serde(default = "default_power_points", alias = "pp")]
    pub power_points: i64,
    #[serde(default)]
    pub priority: i64,
    #[serde(default, alias = "effect", skip_serializing_if = "Option::is_none")]
    pub effect_name: Option<String>,
    /// Percent chance; 0 or absent means the effect's default chance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_chance: Option<i64>,
    /// Effect magnitude: drain/recoil percent, stat stages or crit stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "contact", skip_serializing_if = "Option::is_none")]
    pub force_contact: Option<bool>,
}

fn default_power_points() -> i64 {
    10
}

/// Requested accuracy: a percentage or `true` for a move that never misses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntentAccuracy {
    Flag(bool),
    Percent(i64),
}

impl Default for IntentAccuracy {
    fn default() -> Self {
        IntentAccuracy::Percent(100)
    }
}

/// Why an intent was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("name {0:?} has no letters or digits to derive an id from")]
    InvalidName(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("accuracy must be a percentage or `true`, got `false`")]
    AccuracyFlag,

    #[error("power must be 0 for a Status move, got {0}")]
    StatusPower(i64),

    #[error("effect {effect} requires power above 0")]
    NeedsDamage { effect: String },

    #[error("numeric id must be negative for custom records, got {0}")]
    NonNegativeNum(i32),

    #[error("id {0:?} is already used by another intent in this batch")]
    DuplicateId(String),
}

impl IntentError {
    /// The intent field the error is about
    pub fn field(&self) -> &'static str {
        match self {
            IntentError::InvalidName(_) | IntentError::DuplicateId(_) => "name",
            IntentError::OutOfRange { field, .. } => *field,
            IntentError::AccuracyFlag => "accuracy",
            IntentError::StatusPower(_) => "power",
            IntentError::NeedsDamage { .. } => "effectName",
            IntentError::NonNegativeNum(_) => "num",
        }
    }
}

/// An intent whose fields passed validation, converted to record types
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Checked {
    pub id: String,
    pub power: u16,
    pub accuracy: Accuracy,
    pub power_points: u8,
    pub priority: i8,
    pub chance: Option<u8>,
    pub value: Option<u8>,
    pub effect: Option<Effect>,
    pub unknown_effect: Option<UnknownEffect>,
}

fn in_range<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<T, IntentError> {
    let out_of_range = IntentError::OutOfRange {
        field,
        value,
        min,
        max,
    };
    if !(min..=max).contains(&value) {
        return Err(out_of_range);
    }
    T::try_from(value).map_err(|_| out_of_range)
}

impl Intent {
    /// Intent with default numbers: power 0, accuracy 100, 10 PP, priority 0
    pub fn new(name: impl Into<String>, damage_type: DamageType, category: Category) -> Self {
        Self {
            name: name.into(),
            damage_type,
            category,
            power: 0,
            accuracy: IntentAccuracy::default(),
            power_points: default_power_points(),
            priority: 0,
            effect_name: None,
            effect_chance: None,
            effect_value: None,
            description: None,
            force_contact: None,
        }
    }

    /// The named effect, if any. Blank names count as no effect.
    pub fn effect(&self) -> Option<Result<Effect, UnknownEffect>> {
        let name = self.effect_name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.parse())
    }

    /// Validate every field before anything is derived from them
    pub(crate) fn check(&self) -> Result<Checked, IntentError> {
        let id = to_id(&self.name);
        if id.is_empty() {
            return Err(IntentError::InvalidName(self.name.clone()));
        }

        let power: u16 = in_range("power", self.power, 0, MAX_POWER)?;
        let accuracy = match self.accuracy {
            IntentAccuracy::Flag(true) => Accuracy::AlwaysHits,
            IntentAccuracy::Flag(false) => return Err(IntentError::AccuracyFlag),
            IntentAccuracy::Percent(v) => Accuracy::Percent(in_range("accuracy", v, 1, 100)?),
        };
        let power_points: u8 = in_range("powerPoints", self.power_points, 1, MAX_POWER_POINTS)?;
        let priority: i8 = in_range(
            "priority",
            self.priority,
            PRIORITY_RANGE.0,
            PRIORITY_RANGE.1,
        )?;
        let chance: Option<u8> = self
            .effect_chance
            .map(|c| in_range("effectChance", c, 0, 100))
            .transpose()?;
        let value: Option<u8> = self
            .effect_value
            .map(|v| in_range("effectValue", v, 1, 100))
            .transpose()?;

        if self.category == Category::Status && power > 0 {
            return Err(IntentError::StatusPower(self.power));
        }

        let (effect, unknown_effect) = match self.effect() {
            None => (None, None),
            Some(Ok(effect)) => (Some(effect), None),
            Some(Err(unknown)) => (None, Some(unknown)),
        };

        if let Some(effect) = &effect {
            if effect.needs_damage() && power == 0 {
                return Err(IntentError::NeedsDamage {
                    effect: effect.to_string(),
                });
            }
            let max = match effect {
                Effect::Stat(_) => Some(MAX_STAGES),
                Effect::HighCrit => Some(MAX_CRIT_RATIO),
                _ => None,
            };
            if let (Some(max), Some(v)) = (max, self.effect_value) {
                in_range::<u8>("effectValue", v, 1, max)?;
            }
        }

        Ok(Checked {
            id,
            power,
            accuracy,
            power_points,
            priority,
            chance,
            value,
            effect,
            unknown_effect,
        })
    }
}
