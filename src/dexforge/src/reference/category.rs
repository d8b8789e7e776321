//! Move category definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lookup, UnknownName};

/// Damage class of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Physical,
    Special,
    Status,
}

/// All move categories
pub const CATEGORIES: &[Category] = &[Category::Physical, Category::Special, Category::Status];

impl Category {
    /// Get category name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Physical => "Physical",
            Category::Special => "Special",
            Category::Status => "Status",
        }
    }

    /// Physical and Special moves deal damage, Status moves never do
    pub fn is_damaging(&self) -> bool {
        !matches!(self, Category::Status)
    }
}

impl FromStr for Category {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(CATEGORIES, s, Category::name).ok_or_else(|| UnknownName::new("category", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
