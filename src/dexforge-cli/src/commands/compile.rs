//! Compile command handlers

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use dexforge::render::wrap_collection;
use dexforge::{compile_batch, compile_with, CompileOptions, Intent, Kind, Record};

use crate::file_utils::{read_text, write_output};

/// Serialization format of an intent file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("toml") => Ok(Format::Toml),
            _ => bail!(
                "Unsupported intent file {}: expected .json, .yaml, .yml or .toml",
                path.display()
            ),
        }
    }
}

/// A batch file: a bare list, or a table with an `intent` (or `intents`) list.
/// TOML files always use the table form (`[[intent]]`).
#[derive(Deserialize)]
#[serde(untagged)]
enum IntentList {
    List(Vec<Intent>),
    Table {
        #[serde(alias = "intents")]
        intent: Vec<Intent>,
    },
}

impl IntentList {
    fn into_vec(self) -> Vec<Intent> {
        match self {
            IntentList::List(intents) | IntentList::Table { intent: intents } => intents,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(text: &str, format: Format, path: &Path) -> Result<T> {
    let parsed = match format {
        Format::Json => serde_json::from_str(text).map_err(anyhow::Error::from),
        Format::Yaml => serde_yaml::from_str(text).map_err(anyhow::Error::from),
        Format::Toml => toml::from_str(text).map_err(anyhow::Error::from),
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load a single intent from a JSON, YAML or TOML file
pub fn load_intent(path: &Path) -> Result<Intent> {
    let format = Format::of(path)?;
    parse(&read_text(path)?, format, path)
}

/// Load a list of intents from a JSON, YAML or TOML file
pub fn load_intents(path: &Path) -> Result<Vec<Intent>> {
    let format = Format::of(path)?;
    let list: IntentList = parse(&read_text(path)?, format, path)?;
    Ok(list.into_vec())
}

/// Handle the compile command
pub fn compile(intent: &Intent, num: i32, json: bool) -> Result<()> {
    let compiled = compile_with(intent, &CompileOptions { num })
        .with_context(|| format!("Cannot compile {:?}", intent.name))?;

    for diagnostic in &compiled.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&compiled.record).context("Failed to serialize record")?
        );
    } else {
        print!("{}", compiled.source);
    }
    Ok(())
}

/// Handle the batch command
///
/// Writes every intent that compiled, then fails if any did not.
pub fn batch(file: &Path, num_start: i32, output: Option<&Path>, json: bool) -> Result<()> {
    let intents = load_intents(file)?;
    if intents.is_empty() {
        bail!("{} holds no intents", file.display());
    }

    let batch = compile_batch(&intents, &CompileOptions { num: num_start });

    for compiled in &batch.compiled {
        for diagnostic in &compiled.diagnostics {
            eprintln!("warning: {}: {}", compiled.record.id, diagnostic);
        }
    }
    for failure in &batch.failures {
        eprintln!(
            "error: intent {} ({:?}), field {}: {}",
            failure.index,
            failure.name,
            failure.error.field(),
            failure.error
        );
    }

    let records: Vec<&Record> = batch.compiled.iter().map(|c| &c.record).collect();
    if !records.is_empty() {
        let contents = if json {
            let by_id: BTreeMap<&str, &Record> =
                records.iter().map(|r| (r.id.as_str(), *r)).collect();
            let mut text =
                serde_json::to_string_pretty(&by_id).context("Failed to serialize records")?;
            text.push('\n');
            text
        } else {
            wrap_collection(Kind::Move, records.iter().copied())
        };
        write_output(output, &contents)?;
        if let Some(path) = output {
            eprintln!("Wrote {} moves to {}", records.len(), path.display());
        }
    }

    if !batch.failures.is_empty() {
        bail!(
            "{} of {} intents failed to compile",
            batch.failures.len(),
            intents.len()
        );
    }
    Ok(())
}
