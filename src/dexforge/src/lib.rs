//! # dexforge
//!
//! Battle record tooling - corpus extraction, effect compilation and
//! description reflow.
//!
//! This library provides functionality to:
//! - Extract move and ability records from object-literal corpora that mix
//!   plain data with executable code
//! - Compile an abstract effect intent into a complete move record with
//!   derived flags and a generated description
//! - Render records back into corpus notation
//! - Insert soft-wrap points into CJK and Latin descriptions
//! - Search, summarize and validate record collections
//!
//! ## Example
//!
//! ```
//! use dexforge::{compile, extract, render, Intent, Kind};
//! use dexforge::reference::{Category, DamageType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut intent = Intent::new("Thunder Strike", DamageType::Electric, Category::Physical);
//! intent.power = 90;
//! intent.effect_name = Some("paralyze".to_string());
//! intent.effect_chance = Some(10);
//!
//! let compiled = compile(&intent)?;
//! println!("{}", compiled.source);
//!
//! // Compiled records extract back to the same structure
//! let corpus = render::wrap_collection(Kind::Move, [&compiled.record]);
//! let extraction = extract(&corpus, Kind::Move);
//! assert_eq!(extraction.records.get("thunderstrike"), Some(&compiled.record));
//! # Ok(())
//! # }
//! ```

pub mod compile;
pub mod extract;
pub mod record;
pub mod reference;
pub mod reflow;
pub mod render;
pub mod search;
pub mod stats;
pub mod validate;

// Re-export commonly used items
#[doc(inline)]
pub use compile::{
    compile, compile_batch, compile_with, CompileOptions, Compiled, Diagnostic, Effect, Intent,
    IntentError, DEFAULT_NUM_START,
};
#[doc(inline)]
pub use extract::{extract, ExtractError, Extraction, SkippedRecord};
#[doc(inline)]
pub use record::{
    to_id, AbilityData, Accuracy, Body, Flags, Kind, MoveData, MultiHit, Ratio, Record,
    SecondaryEffect, SecondaryKind, StatBoosts,
};
#[doc(inline)]
pub use reflow::{annotate, Script};
#[doc(inline)]
pub use search::{reference_for_effect, MoveQuery};
#[doc(inline)]
pub use stats::CorpusStats;
#[doc(inline)]
pub use validate::{validate_move_source, Validation};
