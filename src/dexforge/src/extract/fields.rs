//! Per-field probes over one record span
//!
//! Each probe is an independent regex over the record's top-level view, so
//! field order does not matter and nested code never leaks into a field.
//! A probe that finds nothing leaves the field out of the record.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::scanner::{block_at, literal_mask, top_level};
use super::ExtractError;
use crate::record::{
    AbilityData, Accuracy, Body, Flags, Kind, MoveData, MultiHit, Ratio, Record,
    SecondaryEffect, SecondaryKind, StatBoosts,
};
use crate::reference::{Stat, StatusCondition};

/// Key prefix: start of text or a non-identifier character, optional quotes
macro_rules! key {
    ($keys:literal, $value:literal) => {
        concat!(r#"(?:^|[^\w$.])["']?("#, $keys, r#")["']?\s*:\s*"#, $value)
    };
}

static STRING_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(key!(
        "name|type|category|target|shortDesc|status|volatileStatus",
        r#"(?:"((?:[^"\\\n]|\\.)*)"|'((?:[^'\\\n]|\\.)*)')"#
    ))
    .unwrap()
});

static INT_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(key!(
        "num|basePower|pp|priority|critRatio|chance",
        r"(-?\d+)\b"
    ))
    .unwrap()
});

static ACCURACY: Lazy<Regex> =
    Lazy::new(|| Regex::new(key!("accuracy", r"(true|\d+)\b")).unwrap());

static RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(key!("rating", r"(-?\d+(?:\.\d+)?)")).unwrap());

static PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(key!("drain|recoil", r"\[\s*(\d+)\s*,\s*(\d+)\s*\]")).unwrap());

static MULTIHIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(key!("multihit", r"(?:(\d+)\b|\[\s*(\d+)\s*,\s*(\d+)\s*\])")).unwrap()
});

static BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(key!("flags|boosts|secondary|self", r"(\{|null\b)")).unwrap());

static FLAG_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']?([A-Za-z_$][\w$]*)["']?\s*:\s*1\b"#).unwrap());

static BOOST_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?(atk|def|spa|spd|spe|accuracy|evasion)["']?\s*:\s*(-?\d+)"#).unwrap()
});

/// Top-level fields of one `{ ... }` span
struct Fields<'a> {
    span: &'a str,
    view: String,
    literal: Vec<bool>,
}

impl<'a> Fields<'a> {
    fn new(span: &'a str) -> Self {
        Self {
            span,
            view: top_level(span),
            literal: literal_mask(span),
        }
    }

    /// First match of `re` whose key capture equals `key`, skipping matches
    /// that start inside a string literal.
    ///
    /// A rejected match may overlap the real key, so the search resumes one
    /// character past its start rather than past its end.
    fn probe(&self, re: &Regex, key: &str) -> Option<Captures<'_>> {
        let mut from = 0;
        while let Some(caps) = re.captures_at(&self.view, from) {
            let m = caps.get(0)?;
            if &caps[1] == key && !self.literal[m.start()] {
                return Some(caps);
            }
            from = m.start() + self.view[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    fn string(&self, key: &str) -> Option<String> {
        let caps = self.probe(&STRING_FIELD, key)?;
        let raw = caps.get(2).or_else(|| caps.get(3))?;
        Some(unescape(raw.as_str()))
    }

    fn int<T: TryFrom<i64>>(&self, key: &str) -> Option<T> {
        let caps = self.probe(&INT_FIELD, key)?;
        let value: i64 = caps[2].parse().ok()?;
        T::try_from(value).ok()
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.string(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(field = key, "ignoring field: {}", e);
                None
            }
        }
    }

    fn accuracy(&self) -> Option<Accuracy> {
        let caps = self.probe(&ACCURACY, "accuracy")?;
        match &caps[2] {
            "true" => Some(Accuracy::AlwaysHits),
            digits => Accuracy::percent(digits.parse().ok()?).ok(),
        }
    }

    fn rating(&self) -> Option<f32> {
        let caps = self.probe(&RATING, "rating")?;
        caps[2].parse().ok()
    }

    fn ratio(&self, key: &str) -> Option<Ratio> {
        let caps = self.probe(&PAIR, key)?;
        Some(Ratio(caps[2].parse().ok()?, caps[3].parse().ok()?))
    }

    fn multihit(&self) -> Option<MultiHit> {
        let caps = self.probe(&MULTIHIT, "multihit")?;
        if let Some(fixed) = caps.get(2) {
            return Some(MultiHit::Fixed(fixed.as_str().parse().ok()?));
        }
        Some(MultiHit::Range(caps[3].parse().ok()?, caps[4].parse().ok()?))
    }

    /// Nested `{ ... }` block for `key`; `Some(None)` for an explicit `null`
    fn block(&self, key: &str) -> Option<Option<&'a str>> {
        let caps = self.probe(&BLOCK, key)?;
        let value = caps.get(2)?;
        if value.as_str() == "null" {
            return Some(None);
        }
        Some(block_at(self.span, value.start()))
    }

    fn flags(&self) -> Flags {
        self.block("flags")
            .flatten()
            .map(|block| {
                FLAG_ENTRY
                    .captures_iter(block)
                    .map(|caps| caps[1].to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn boosts(&self) -> Option<StatBoosts> {
        let block = self.block("boosts")??;
        let boosts: StatBoosts = BOOST_ENTRY
            .captures_iter(block)
            .filter_map(|caps| {
                let stat: Stat = caps[1].parse().ok()?;
                let stages: i8 = caps[2].parse().ok()?;
                Some((stat, stages))
            })
            .collect();
        (!boosts.is_empty()).then_some(boosts)
    }

    fn secondary(&self) -> Option<SecondaryEffect> {
        let block = self.block("secondary")??;
        Some(secondary_from(&Fields::new(block)))
    }
}

fn secondary_from(fields: &Fields<'_>) -> SecondaryEffect {
    let chance = fields.int("chance");
    let effect = if let Some(status) = fields.parsed::<StatusCondition>("status") {
        SecondaryKind::Status(status)
    } else if let Some(boosts) = fields.boosts() {
        SecondaryKind::Boosts(boosts)
    } else if let Some(volatile) = fields.string("volatileStatus") {
        SecondaryKind::VolatileStatus(volatile)
    } else {
        SecondaryKind::Custom
    };
    SecondaryEffect { chance, effect }
}

/// Build a record from one span. Only a missing `name` is fatal.
pub(crate) fn parse_record(id: &str, span: &str, kind: Kind) -> Result<Record, ExtractError> {
    let fields = Fields::new(span);
    let name = fields.string("name").ok_or(ExtractError::MissingName)?;

    let body = match kind {
        Kind::Move => Body::Move(MoveData {
            damage_type: fields.parsed("type"),
            category: fields.parsed("category"),
            power: fields.int("basePower"),
            accuracy: fields.accuracy(),
            pp: fields.int("pp"),
            priority: fields.int("priority"),
            target: fields.parsed("target"),
            drain: fields.ratio("drain"),
            recoil: fields.ratio("recoil"),
            crit_ratio: fields.int("critRatio"),
            boosts: fields.boosts(),
            multihit: fields.multihit(),
            secondary: fields.secondary(),
        }),
        Kind::Ability => Body::Ability(AbilityData {
            rating: fields.rating(),
        }),
    };

    Ok(Record {
        id: id.to_string(),
        name,
        num: fields.int("num"),
        flags: fields.flags(),
        short_desc: fields.string("shortDesc"),
        body,
    })
}

/// Resolve backslash escapes of a quoted corpus string
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
