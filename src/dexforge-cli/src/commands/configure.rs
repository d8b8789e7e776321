//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up dexforge defaults.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `reference_dir` - Directory holding the reference corpora
/// * `num_start` - First numeric id for compiled records
/// * `search_limit` - Default number of search results
/// * `show` - If true, show current configuration
pub fn handle(
    reference_dir: Option<PathBuf>,
    num_start: Option<i32>,
    search_limit: Option<usize>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, reference_dir, num_start, search_limit)? {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply the given settings; false when nothing was given
fn apply(
    config: &mut Config,
    reference_dir: Option<PathBuf>,
    num_start: Option<i32>,
    search_limit: Option<usize>,
) -> Result<bool> {
    let changed = reference_dir.is_some() || num_start.is_some() || search_limit.is_some();

    if let Some(dir) = reference_dir {
        if !dir.is_dir() {
            bail!("Reference directory does not exist: {}", dir.display());
        }
        config.reference_dir = Some(dir);
    }
    if let Some(num) = num_start {
        if num >= 0 {
            bail!("--num-start must be negative, got {}", num);
        }
        config.custom_num_start = num;
    }
    if let Some(limit) = search_limit {
        if limit == 0 {
            bail!("--search-limit must be at least 1");
        }
        config.search_limit = limit;
    }

    Ok(changed)
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.reference_dir {
        Some(dir) => println!("Reference directory: {}", dir.display()),
        None => println!("No reference directory configured"),
    }
    println!("First custom num: {}", config.custom_num_start);
    println!("Search limit: {}", config.search_limit);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: dexforge configure --reference-dir DIR");
    println!("   or: dexforge configure --num-start -10001 --search-limit 10");
    println!("   or: dexforge configure --show");
    println!();
    println!("Note: the reference directory should contain moves.ts (or .js)");
    println!("      and abilities.ts (or .js) from a battle simulator data folder.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_nothing() {
        let mut config = Config::default();
        assert!(!apply(&mut config, None, None, None).unwrap());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        let changed = apply(
            &mut config,
            Some(dir.path().to_path_buf()),
            Some(-30000),
            Some(5),
        )
        .unwrap();
        assert!(changed);
        assert_eq!(config.reference_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.custom_num_start, -30000);
        assert_eq!(config.search_limit, 5);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, None, Some(0), None).is_err());
        assert!(apply(&mut config, None, None, Some(0)).is_err());
        assert!(apply(&mut config, Some(PathBuf::from("/no/such/dir/here")), None, None).is_err());
    }
}
