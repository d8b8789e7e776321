//! Corpus command CLI definitions

use clap::{Args, ValueEnum};

use dexforge::reference::{Category, DamageType};
use dexforge::{Kind, MoveQuery};

/// Record kind selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[default]
    Move,
    Ability,
}

impl From<KindArg> for Kind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Move => Kind::Move,
            KindArg::Ability => Kind::Ability,
        }
    }
}

/// Filters for `search`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchFilters {
    /// Damage type
    #[arg(long = "type", value_name = "TYPE")]
    pub damage_type: Option<DamageType>,

    #[arg(long)]
    pub category: Option<Category>,

    /// Minimum base power
    #[arg(long)]
    pub power_min: Option<u16>,

    /// Maximum base power
    #[arg(long)]
    pub power_max: Option<u16>,

    /// true: only moves with non-zero priority, false: only priority 0
    #[arg(long)]
    pub has_priority: Option<bool>,

    /// true: only moves with a secondary effect, false: only without
    #[arg(long)]
    pub has_secondary: Option<bool>,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl SearchFilters {
    pub fn to_query(&self, default_limit: usize) -> MoveQuery {
        MoveQuery {
            damage_type: self.damage_type,
            category: self.category,
            power_min: self.power_min,
            power_max: self.power_max,
            has_priority: self.has_priority,
            has_secondary: self.has_secondary,
            limit: Some(self.limit.unwrap_or(default_limit)),
        }
    }
}
