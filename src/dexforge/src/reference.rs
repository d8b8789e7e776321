//! Reference data for battle records
//!
//! Hardcoded enumerations for game concepts like damage types, move
//! categories, targeting modes, status conditions and boostable stats.
//! These are the closed vocabularies shared by extracted corpus records and
//! compiled custom records.

pub mod category;
pub mod damage_type;
pub mod flag;
pub mod stat;
pub mod status;
pub mod target;

pub use category::{Category, CATEGORIES};
pub use damage_type::{DamageType, DAMAGE_TYPES};
pub use stat::{Stat, STATS};
pub use status::{StatusCondition, STATUS_CONDITIONS};
pub use target::{Target, TARGETS};

/// A name that is not part of one of the reference vocabularies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Find the entry of `table` whose name matches `name` (ASCII case-insensitive)
pub(crate) fn lookup<T: Copy>(
    table: &[T],
    name: &str,
    name_of: impl Fn(&T) -> &'static str,
) -> Option<T> {
    let name = name.trim();
    table
        .iter()
        .find(|entry| name_of(entry).eq_ignore_ascii_case(name))
        .copied()
}
