//! Corpus command handlers: extract, search and stats

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, warn};

use dexforge::render::render_entry;
use dexforge::{extract as extract_records, reference_for_effect, CorpusStats, Effect, Kind, Record};

use crate::cli::SearchFilters;
use crate::config::Config;
use crate::file_utils::{corpus_files, corpus_path, read_text, write_output};

/// Extract every corpus file under `path` and merge the results.
///
/// Files are read in name order; a record id seen again in a later file
/// replaces the earlier one.
pub fn load_corpus(path: &Path, kind: Kind) -> Result<BTreeMap<String, Record>> {
    let mut records = BTreeMap::new();

    for file in corpus_files(path)? {
        let text = read_text(&file)?;
        let extraction = extract_records(&text, kind);
        for skipped in &extraction.skipped {
            warn!(
                file = %file.display(),
                id = %skipped.id,
                line = skipped.line,
                "skipped record: {}",
                skipped.reason
            );
        }
        debug!(
            file = %file.display(),
            records = extraction.len(),
            "loaded corpus file"
        );
        records.extend(extraction.records);
    }

    Ok(records)
}

fn load_configured(corpus: Option<&Path>, kind: Kind, config: &Config) -> Result<BTreeMap<String, Record>> {
    let path = corpus_path(corpus, kind, config)?;
    load_corpus(&path, kind)
}

/// Handle the extract command
pub fn extract(
    corpus: Option<&Path>,
    kind: Kind,
    output: Option<&Path>,
    compact: bool,
    config: &Config,
) -> Result<()> {
    let records = load_configured(corpus, kind, config)?;

    let mut json = if compact {
        serde_json::to_string(&records)
    } else {
        serde_json::to_string_pretty(&records)
    }
    .context("Failed to serialize records")?;
    json.push('\n');

    write_output(output, &json)?;
    if let Some(path) = output {
        eprintln!("Wrote {} {} records to {}", records.len(), kind, path.display());
    }
    Ok(())
}

/// Handle the search command
pub fn search(corpus: Option<&Path>, filters: &SearchFilters, json: bool, config: &Config) -> Result<()> {
    let records = load_configured(corpus, Kind::Move, config)?;
    let query = filters.to_query(config.search_limit);
    let results = query.run(&records);

    if json {
        let matches: BTreeMap<&str, &Record> = results.iter().copied().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&matches).context("Failed to serialize records")?
        );
        return Ok(());
    }

    if results.is_empty() {
        println!("No matching moves");
        return Ok(());
    }
    print!("{}", format_results(&results));
    println!();
    println!("{} shown", results.len());
    Ok(())
}

/// Handle `search --effect`
pub fn reference(corpus: Option<&Path>, effect: &str, json: bool, config: &Config) -> Result<()> {
    let effect: Effect = effect
        .parse()
        .with_context(|| format!("Cannot look up a reference for {:?}", effect))?;
    let records = load_configured(corpus, Kind::Move, config)?;

    match reference_for_effect(&records, &effect) {
        Some((_, record)) if json => println!(
            "{}",
            serde_json::to_string_pretty(record).context("Failed to serialize record")?
        ),
        Some((_, record)) => print!("{}", render_entry(record)),
        None => println!("No move in the corpus uses {}", effect),
    }
    Ok(())
}

/// Handle the stats command
pub fn stats(corpus: Option<&Path>, kind: Kind, json: bool, config: &Config) -> Result<()> {
    let records = load_configured(corpus, kind, config)?;
    let stats = CorpusStats::collect(records.values());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?
        );
    } else {
        print!("{}", format_stats(&stats));
    }
    Ok(())
}

/// One line per move: id, type, category, power, accuracy, PP, priority
fn format_results(results: &[(&str, &Record)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<9} {:<9} {:>5} {:>4} {:>3} {:>3}",
        "ID", "Type", "Category", "Power", "Acc", "PP", "Pri"
    );
    let _ = writeln!(out, "{}", "-".repeat(63));

    let dash = || "-".to_string();
    for (id, record) in results {
        let Some(data) = record.as_move() else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:<24} {:<9} {:<9} {:>5} {:>4} {:>3} {:>3}",
            id,
            data.damage_type.map_or_else(dash, |t| t.to_string()),
            data.category.map_or_else(dash, |c| c.to_string()),
            data.power.map_or_else(dash, |p| p.to_string()),
            data.accuracy.map_or_else(dash, |a| a.to_string()),
            data.pp.map_or_else(dash, |pp| pp.to_string()),
            data.priority.map_or_else(dash, |p| p.to_string()),
        );
    }
    out
}

fn format_stats(stats: &CorpusStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Records: {}", stats.records);

    if stats.moves > 0 {
        let _ = writeln!(out, "Moves: {}", stats.moves);
        let _ = writeln!(out);
        let _ = writeln!(out, "By category:");
        for (category, count) in &stats.by_category {
            let _ = writeln!(out, "  {:<10} {:>5}", category.name(), count);
        }
        let _ = writeln!(out, "By type:");
        for (damage_type, count) in &stats.by_type {
            let _ = writeln!(out, "  {:<10} {:>5}", damage_type.name(), count);
        }
        let _ = writeln!(out, "By priority:");
        for (priority, count) in &stats.by_priority {
            let _ = writeln!(out, "  {:<10} {:>5}", format!("{:+}", priority), count);
        }
        let _ = writeln!(
            out,
            "Secondary effect: {} with, {} without",
            stats.with_secondary, stats.without_secondary
        );
        if let Some(power) = &stats.power {
            let _ = writeln!(
                out,
                "Base power: min {}, max {}, mean {:.1}",
                power.min, power.max, power.mean
            );
            for (band, count) in &stats.power_bands {
                let _ = writeln!(out, "  {:<10} {:>5}", band.label(), count);
            }
        }
    }

    if stats.abilities > 0 {
        let _ = writeln!(out, "Abilities: {}", stats.abilities);
        let _ = writeln!(out, "By rating:");
        for (rating, count) in &stats.ratings {
            let _ = writeln!(out, "  {:<10} {:>5}", rating, count);
        }
    }

    if !stats.flags.is_empty() {
        let _ = writeln!(out, "Flags:");
        for (flag, count) in &stats.flags {
            let _ = writeln!(out, "  {:<16} {:>5}", flag, count);
        }
    }
    out
}
