//! Rendering records back into corpus notation
//!
//! Output uses tab indentation, unquoted keys, double-quoted strings and
//! trailing commas, matching the dialect [`crate::extract`] reads.

use std::fmt::Write;

use crate::record::{
    Accuracy, Body, Kind, MoveData, MultiHit, Record, SecondaryEffect, SecondaryKind, StatBoosts,
};

/// Render a record as a standalone `{ ... }` block
pub fn render_record(record: &Record) -> String {
    let mut out = String::from("{\n");
    write_fields(&mut out, record, 1);
    out.push('}');
    out
}

/// Render a record as one collection entry: `\t<id>: { ... },\n`
pub fn render_entry(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\t{}: {{", key(&record.id));
    write_fields(&mut out, record, 2);
    out.push_str("\t},\n");
    out
}

/// Wrap entries in a named collection declaration for `kind`
pub fn wrap_collection<'a>(kind: Kind, records: impl IntoIterator<Item = &'a Record>) -> String {
    let mut out = format!("export const {} = {{\n", kind.collection_name());
    for record in records {
        out.push_str(&render_entry(record));
    }
    out.push_str("};\n");
    out
}

fn write_fields(out: &mut String, record: &Record, depth: usize) {
    let indent = "\t".repeat(depth);
    let mut field = |name: &str, value: String| {
        let _ = writeln!(out, "{}{}: {},", indent, name, value);
    };

    if let Some(num) = record.num {
        field("num", num.to_string());
    }
    field("name", quote(&record.name));

    match &record.body {
        Body::Move(data) => {
            write_move_fields(&mut field, record, data);
            if let Some(desc) = &record.short_desc {
                field("shortDesc", quote(desc));
            }
        }
        Body::Ability(data) => {
            if let Some(rating) = data.rating {
                field("rating", rating.to_string());
            }
            field("flags", flags(record));
            if let Some(desc) = &record.short_desc {
                field("shortDesc", quote(desc));
            }
        }
    }
}

fn write_move_fields(field: &mut impl FnMut(&str, String), record: &Record, data: &MoveData) {
    if let Some(damage_type) = data.damage_type {
        field("type", quote(damage_type.name()));
    }
    if let Some(category) = data.category {
        field("category", quote(category.name()));
    }
    if let Some(power) = data.power {
        field("basePower", power.to_string());
    }
    if let Some(accuracy) = data.accuracy {
        field("accuracy", accuracy_literal(accuracy));
    }
    if let Some(pp) = data.pp {
        field("pp", pp.to_string());
    }
    if let Some(priority) = data.priority {
        field("priority", priority.to_string());
    }
    field("flags", flags(record));
    if let Some(drain) = data.drain {
        field("drain", drain.to_string());
    }
    if let Some(recoil) = data.recoil {
        field("recoil", recoil.to_string());
    }
    if let Some(crit_ratio) = data.crit_ratio {
        field("critRatio", crit_ratio.to_string());
    }
    if let Some(boosts) = &data.boosts {
        field("boosts", boosts_literal(boosts));
    }
    if let Some(multihit) = data.multihit {
        field(
            "multihit",
            match multihit {
                MultiHit::Fixed(n) => n.to_string(),
                MultiHit::Range(min, max) => format!("[{}, {}]", min, max),
            },
        );
    }
    field(
        "secondary",
        data.secondary
            .as_ref()
            .map_or_else(|| "null".to_string(), secondary_literal),
    );
    if let Some(target) = data.target {
        field("target", quote(target.as_str()));
    }
}

fn accuracy_literal(accuracy: Accuracy) -> String {
    accuracy.to_string()
}

fn flags(record: &Record) -> String {
    let entries: Vec<String> = record.flags.iter().map(|f| format!("{}: 1", key(f))).collect();
    format!("{{{}}}", entries.join(", "))
}

fn boosts_literal(boosts: &StatBoosts) -> String {
    let entries: Vec<String> = boosts
        .iter()
        .map(|(stat, stages)| format!("{}: {}", stat.code(), stages))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn secondary_literal(secondary: &SecondaryEffect) -> String {
    let mut entries = Vec::new();
    if let Some(chance) = secondary.chance {
        entries.push(format!("chance: {}", chance));
    }
    match &secondary.effect {
        SecondaryKind::Status(status) => entries.push(format!("status: {}", quote(status.code()))),
        SecondaryKind::Boosts(boosts) => {
            entries.push(format!("boosts: {}", boosts_literal(boosts)))
        }
        SecondaryKind::VolatileStatus(volatile) => {
            entries.push(format!("volatileStatus: {}", quote(volatile)))
        }
        SecondaryKind::Custom => {}
    }
    format!("{{{}}}", entries.join(", "))
}

/// Object key, quoted only when it is not a plain identifier
fn key(name: &str) -> String {
    let plain = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Double-quoted string literal with escapes
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
