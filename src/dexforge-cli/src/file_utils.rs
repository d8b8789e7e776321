//! File system helpers: corpus discovery and text input

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use dexforge::Kind;

use crate::config::Config;

/// Extensions a corpus file may have
pub const CORPUS_EXTENSIONS: &[&str] = &["ts", "js"];

/// File stem of the corpus holding records of `kind`
fn corpus_stem(kind: Kind) -> &'static str {
    match kind {
        Kind::Move => "moves",
        Kind::Ability => "abilities",
    }
}

/// Resolve the corpus to read: the explicit path if given, otherwise
/// `<reference_dir>/moves.{ts,js}` or `<reference_dir>/abilities.{ts,js}`
pub fn corpus_path(explicit: Option<&Path>, kind: Kind, config: &Config) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let Some(dir) = &config.reference_dir else {
        bail!(
            "No corpus given and no reference directory configured.\n\
             Pass a path or run: dexforge configure --reference-dir <DIR>"
        );
    };

    let stem = corpus_stem(kind);
    CORPUS_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|candidate| candidate.is_file())
        .with_context(|| format!("No {}.ts or {}.js in {}", stem, stem, dir.display()))
}

/// Walk files in a directory tree, filtering by extension
///
/// Extension should not include the dot (e.g., "ts" not ".ts").
pub fn walk_files_with_extension<F>(path: &Path, extensions: &[&str], mut handler: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();

        let matches = file_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)));

        if matches {
            handler(file_path)?;
        }
    }

    Ok(())
}

/// Corpus files under `path`: the file itself, or every `.ts`/`.js` file of a
/// directory tree in name order
pub fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("Corpus not found: {}", path.display());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    walk_files_with_extension(path, CORPUS_EXTENSIONS, |file_path| {
        files.push(file_path.to_path_buf());
        Ok(())
    })?;

    if files.is_empty() {
        bail!("No .ts or .js files under {}", path.display());
    }
    Ok(files)
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read a file, or stdin when the path is absent or `-`
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => read_text(path),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write to a file, or stdout when no path is given
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_corpus_path_prefers_explicit() {
        let config = Config::default();
        let path = corpus_path(Some(Path::new("x/moves.ts")), Kind::Move, &config).unwrap();
        assert_eq!(path, PathBuf::from("x/moves.ts"));
    }

    #[test]
    fn test_corpus_path_from_reference_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("moves.js"), "").unwrap();
        fs::write(dir.path().join("abilities.ts"), "").unwrap();
        let config = Config {
            reference_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        assert_eq!(
            corpus_path(None, Kind::Move, &config).unwrap(),
            dir.path().join("moves.js")
        );
        assert_eq!(
            corpus_path(None, Kind::Ability, &config).unwrap(),
            dir.path().join("abilities.ts")
        );
    }

    #[test]
    fn test_corpus_path_errors() {
        assert!(corpus_path(None, Kind::Move, &Config::default()).is_err());

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            reference_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let err = corpus_path(None, Kind::Move, &config).unwrap_err();
        assert!(err.to_string().contains("moves.ts"));
    }

    #[test]
    fn test_corpus_files_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("gen9")).unwrap();
        fs::write(dir.path().join("b.ts"), "").unwrap();
        fs::write(dir.path().join("a.JS"), "").unwrap();
        fs::write(dir.path().join("gen9").join("moves.ts"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let files = corpus_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.JS"),
                PathBuf::from("b.ts"),
                PathBuf::from("gen9").join("moves.ts"),
            ]
        );
    }

    #[test]
    fn test_corpus_files_single_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("moves.ts");
        fs::write(&file, "").unwrap();
        assert_eq!(corpus_files(&file).unwrap(), vec![file]);
        assert!(corpus_files(&dir.path().join("nope")).is_err());

        let empty = tempfile::tempdir().unwrap();
        assert!(corpus_files(empty.path()).is_err());
    }
}
