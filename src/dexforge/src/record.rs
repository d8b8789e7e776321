//! Record data model shared by extracted and compiled entries
//!
//! A [`Record`] is one move or ability. Corpus extraction and the effect
//! compiler both produce this exact shape, so records from either source can
//! be compared, searched or mixed. Field names serialize with the corpus
//! spelling (`basePower`, `critRatio`, `shortDesc`, ...).

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::reference::{Category, DamageType, Stat, StatusCondition, Target};

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Move,
    Ability,
}

impl Kind {
    /// Name of the collection that declares records of this kind
    pub fn collection_name(&self) -> &'static str {
        match self {
            Kind::Move => "Moves",
            Kind::Ability => "Abilities",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Move => "move",
            Kind::Ability => "ability",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single move or ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    /// Numeric id: negative for custom entries, non-negative for corpus entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<i32>,
    #[serde(default, skip_serializing_if = "Flags::is_empty")]
    pub flags: Flags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
    #[serde(flatten)]
    pub body: Body,
}

impl Record {
    /// Create an empty record of the given kind
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: Kind) -> Self {
        let body = match kind {
            Kind::Move => Body::Move(MoveData::default()),
            Kind::Ability => Body::Ability(AbilityData::default()),
        };
        Self {
            id: id.into(),
            name: name.into(),
            num: None,
            flags: Flags::default(),
            short_desc: None,
            body,
        }
    }

    pub fn kind(&self) -> Kind {
        match self.body {
            Body::Move(_) => Kind::Move,
            Body::Ability(_) => Kind::Ability,
        }
    }

    /// Move-specific fields, if this is a move
    pub fn as_move(&self) -> Option<&MoveData> {
        match &self.body {
            Body::Move(data) => Some(data),
            Body::Ability(_) => None,
        }
    }

    /// Ability-specific fields, if this is an ability
    pub fn as_ability(&self) -> Option<&AbilityData> {
        match &self.body {
            Body::Ability(data) => Some(data),
            Body::Move(_) => None,
        }
    }
}

/// Kind-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Move(MoveData),
    Ability(AbilityData),
}

/// Fields meaningful for moves. Every field is optional because extraction
/// omits whatever a corpus entry does not declare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<DamageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "basePower", default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pp: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drain: Option<Ratio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoil: Option<Ratio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit_ratio: Option<u8>,
    /// Stat changes the move always applies (Status moves)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boosts: Option<StatBoosts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multihit: Option<MultiHit>,
    /// Chance-based side effect; `None` covers both `secondary: null` and absence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryEffect>,
}

impl MoveData {
    /// A move with zero (or undeclared) base power deals no direct damage
    pub fn is_damaging(&self) -> bool {
        self.power.is_some_and(|power| power > 0)
    }
}

/// Fields meaningful for abilities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// Move accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawAccuracy")]
pub enum Accuracy {
    /// Hit chance in percent (1-100)
    Percent(u8),
    /// Never misses (`accuracy: true` in the corpus)
    AlwaysHits,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccuracyError {
    #[error("accuracy must be between 1 and 100, got {0}")]
    OutOfRange(i64),

    #[error("accuracy flag must be `true`")]
    FalseFlag,
}

impl Accuracy {
    pub fn percent(value: i64) -> Result<Self, AccuracyError> {
        match u8::try_from(value) {
            Ok(v @ 1..=100) => Ok(Accuracy::Percent(v)),
            _ => Err(AccuracyError::OutOfRange(value)),
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Percent(v) => write!(f, "{}", v),
            Accuracy::AlwaysHits => f.write_str("true"),
        }
    }
}

impl Serialize for Accuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Accuracy::Percent(v) => serializer.serialize_u8(*v),
            Accuracy::AlwaysHits => serializer.serialize_bool(true),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccuracy {
    Flag(bool),
    Percent(i64),
}

impl TryFrom<RawAccuracy> for Accuracy {
    type Error = AccuracyError;

    fn try_from(raw: RawAccuracy) -> Result<Self, Self::Error> {
        match raw {
            RawAccuracy::Flag(true) => Ok(Accuracy::AlwaysHits),
            RawAccuracy::Flag(false) => Err(AccuracyError::FalseFlag),
            RawAccuracy::Percent(v) => Accuracy::percent(v),
        }
    }
}

/// A `[numerator, denominator]` pair used by drain and recoil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio(pub u32, pub u32);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// Hit count of a multi-strike move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultiHit {
    Fixed(u8),
    Range(u8, u8),
}

/// Stat stage changes, ordered `atk, def, spa, spd, spe, accuracy, evasion`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatBoosts(pub BTreeMap<Stat, i8>);

impl StatBoosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stat: Stat, stages: i8) -> Self {
        self.0.insert(stat, stages);
        self
    }

    pub fn get(&self, stat: Stat) -> Option<i8> {
        self.0.get(&stat).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i8)> + '_ {
        self.0.iter().map(|(stat, stages)| (*stat, *stages))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Stat, i8)> for StatBoosts {
    fn from_iter<I: IntoIterator<Item = (Stat, i8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Capability tags, written in the corpus as `flags: {contact: 1, protect: 1}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u8>", into = "BTreeMap<String, u8>")]
pub struct Flags(BTreeSet<String>);

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: impl Into<String>) -> bool {
        self.0.insert(flag.into())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for Flags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, u8>> for Flags {
    fn from(map: BTreeMap<String, u8>) -> Self {
        map.into_iter()
            .filter(|(_, set)| *set != 0)
            .map(|(name, _)| name)
            .collect()
    }
}

impl From<Flags> for BTreeMap<String, u8> {
    fn from(flags: Flags) -> Self {
        flags.0.into_iter().map(|name| (name, 1)).collect()
    }
}

/// Chance-based side effect of a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSecondary", into = "RawSecondary")]
pub struct SecondaryEffect {
    /// Percent chance; `None` when the corpus entry omits it
    pub chance: Option<u8>,
    pub effect: SecondaryKind,
}

/// What a secondary effect does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryKind {
    /// Inflicts a major status condition
    Status(StatusCondition),
    /// Changes stat stages
    Boosts(StatBoosts),
    /// Applies a volatile condition such as `flinch` or `confusion`
    VolatileStatus(String),
    /// Behavior expressed in code or nested blocks the extractor does not model
    Custom,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSecondary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<StatusCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    boosts: Option<StatBoosts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volatile_status: Option<String>,
}

impl From<RawSecondary> for SecondaryEffect {
    fn from(raw: RawSecondary) -> Self {
        let effect = if let Some(status) = raw.status {
            SecondaryKind::Status(status)
        } else if let Some(boosts) = raw.boosts {
            SecondaryKind::Boosts(boosts)
        } else if let Some(volatile) = raw.volatile_status {
            SecondaryKind::VolatileStatus(volatile)
        } else {
            SecondaryKind::Custom
        };
        SecondaryEffect {
            chance: raw.chance,
            effect,
        }
    }
}

impl From<SecondaryEffect> for RawSecondary {
    fn from(secondary: SecondaryEffect) -> Self {
        let mut raw = RawSecondary {
            chance: secondary.chance,
            status: None,
            boosts: None,
            volatile_status: None,
        };
        match secondary.effect {
            SecondaryKind::Status(status) => raw.status = Some(status),
            SecondaryKind::Boosts(boosts) => raw.boosts = Some(boosts),
            SecondaryKind::VolatileStatus(volatile) => raw.volatile_status = Some(volatile),
            SecondaryKind::Custom => {}
        }
        raw
    }
}

/// Derive a record id from a display name: lowercase ASCII alphanumerics only
///
/// ```
/// assert_eq!(dexforge::to_id("Thunder Strike"), "thunderstrike");
/// assert_eq!(dexforge::to_id("U-turn"), "uturn");
/// ```
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
