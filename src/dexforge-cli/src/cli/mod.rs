//! CLI argument definitions for dexforge
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod compile;
mod core;
mod corpus;

pub use compile::IntentArgs;
pub use core::{Cli, Commands, ScriptArg};
pub use corpus::{KindArg, SearchFilters};
