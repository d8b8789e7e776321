//! Tolerant record extraction from object-literal corpora
//!
//! A corpus declares one named collection whose entries look like
//! `key: { field: value, ... }` and may embed arbitrary code (callbacks,
//! nested conditions). Extraction never parses that code; it isolates each
//! entry by brace depth and reads the data fields it recognizes. Entries that
//! cannot be read are skipped with a diagnostic instead of failing the pass.

pub mod collection;
mod fields;
mod scanner;

use std::collections::BTreeMap;

use tracing::debug;

use crate::record::{Kind, Record};
use scanner::Scanned;

/// Why a corpus entry was left out of an extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("record has no name field")]
    MissingName,

    #[error("record is not closed before end of input (depth {depth})")]
    Unterminated { depth: usize },
}

/// A corpus entry that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    /// 1-based line where the entry starts
    pub line: usize,
    pub reason: ExtractError,
}

/// Result of one extraction pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Declared collection name, if a header was found
    pub collection: Option<String>,
    /// Records keyed by id, in id order
    pub records: BTreeMap<String, Record>,
    pub skipped: Vec<SkippedRecord>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }
}

/// Extract every readable record of `kind` from `text`.
///
/// An empty result is valid. The same input always yields the same output;
/// when an id appears twice the later entry wins.
pub fn extract(text: &str, kind: Kind) -> Extraction {
    let collection = collection::locate(text, kind);
    let mut extraction = Extraction {
        collection: collection.name.clone(),
        ..Extraction::default()
    };

    for scanned in scanner::scan(collection.body, collection.first_line) {
        match scanned {
            Scanned::Record { id, line, span } => match fields::parse_record(&id, &span, kind) {
                Ok(record) => {
                    if extraction.records.insert(id.clone(), record).is_some() {
                        debug!(id = %id, line, "duplicate record id, keeping the later entry");
                    }
                }
                Err(reason) => {
                    debug!(id = %id, line, "skipping record: {}", reason);
                    extraction.skipped.push(SkippedRecord { id, line, reason });
                }
            },
            Scanned::Unterminated { id, line, depth } => {
                let reason = ExtractError::Unterminated { depth };
                debug!(id = %id, line, "skipping record: {}", reason);
                extraction.skipped.push(SkippedRecord { id, line, reason });
            }
        }
    }

    debug!(
        collection = ?extraction.collection,
        records = extraction.records.len(),
        skipped = extraction.skipped.len(),
        "extracted {} corpus",
        kind
    );
    extraction
}
