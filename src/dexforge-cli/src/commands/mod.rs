//! Command handlers for the dexforge CLI
//!
//! Each subcommand group has its own module with handler functions.

pub mod compile;
pub mod configure;
pub mod corpus;
pub mod reflow;
pub mod validate;
