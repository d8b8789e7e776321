//! Intent flags for the compile command

use anyhow::{Context, Result};
use clap::Args;

use dexforge::compile::IntentAccuracy;
use dexforge::reference::{Category, DamageType};
use dexforge::Intent;

#[derive(Args, Debug, Clone, Default)]
pub struct IntentArgs {
    /// Display name of the move
    #[arg(long, required_unless_present = "intent")]
    pub name: Option<String>,

    /// Damage type (e.g. Electric)
    #[arg(long = "type", value_name = "TYPE")]
    pub damage_type: Option<DamageType>,

    /// Physical, Special or Status
    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long, default_value_t = 0)]
    pub power: i64,

    /// Hit chance 1-100, or `true` for a move that never misses
    #[arg(long, value_parser = parse_accuracy)]
    pub accuracy: Option<IntentAccuracy>,

    #[arg(long, default_value_t = 10)]
    pub pp: i64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub priority: i64,

    /// Named effect (paralyze, boost_attack, drain, ...)
    #[arg(long)]
    pub effect: Option<String>,

    /// Effect chance in percent (defaults per effect)
    #[arg(long)]
    pub chance: Option<i64>,

    /// Effect magnitude: drain/recoil percent, stat stages or crit stage
    #[arg(long)]
    pub value: Option<i64>,

    /// Use this description instead of generating one
    #[arg(long)]
    pub description: Option<String>,

    /// Force the contact flag on or off
    #[arg(long)]
    pub contact: Option<bool>,
}

fn parse_accuracy(raw: &str) -> Result<IntentAccuracy, String> {
    match raw.trim() {
        "true" => Ok(IntentAccuracy::Flag(true)),
        "false" => Ok(IntentAccuracy::Flag(false)),
        number => number
            .parse()
            .map(IntentAccuracy::Percent)
            .map_err(|_| format!("expected a percentage or `true`, got {:?}", raw)),
    }
}

impl IntentArgs {
    /// Build an intent from the flags; name, type and category are required
    pub fn into_intent(self) -> Result<Intent> {
        let name = self.name.context("--name is required")?;
        let damage_type = self.damage_type.context("--type is required")?;
        let category = self.category.context("--category is required")?;

        let mut intent = Intent::new(name, damage_type, category);
        intent.power = self.power;
        if let Some(accuracy) = self.accuracy {
            intent.accuracy = accuracy;
        }
        intent.power_points = self.pp;
        intent.priority = self.priority;
        intent.effect_name = self.effect;
        intent.effect_chance = self.chance;
        intent.effect_value = self.value;
        intent.description = self.description;
        intent.force_contact = self.contact;
        Ok(intent)
    }
}
