//! Locating the named collection inside a corpus file

use once_cell::sync::Lazy;
use regex::Regex;

use super::scanner::block_at;
use crate::record::Kind;

/// `export const Moves: {[k: string]: MoveData} = {` and `exports.Moves = {`
static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*(?:export[ \t]+)?(?:const|let|var)[ \t]+([A-Za-z_$][\w$]*)[ \t]*(?::[^=\n]*)?=[ \t]*\{",
        r"|^[ \t]*(?:module\.)?exports\.([A-Za-z_$][\w$]*)[ \t]*=[ \t]*\{",
    ))
    .unwrap()
});

/// The region of a corpus that holds records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<'a> {
    /// Declared collection name, `None` when no header was found
    pub name: Option<String>,
    /// Text between the collection's braces (or the whole input)
    pub body: &'a str,
    /// 1-based line number of `body`'s first line
    pub first_line: usize,
}

/// Find the collection for `kind`.
///
/// A header named after the kind (`Moves`, `Abilities`) is preferred, then
/// the first header of any name. Without a header the whole text is the body.
pub fn locate(text: &str, kind: Kind) -> Collection<'_> {
    let headers: Vec<_> = HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some((name, whole.end() - 1))
        })
        .collect();

    let chosen = headers
        .iter()
        .find(|(name, _)| *name == kind.collection_name())
        .or_else(|| headers.first());

    let Some(&(name, open)) = chosen else {
        return Collection {
            name: None,
            body: text,
            first_line: 1,
        };
    };

    let inner_start = open + 1;
    let body = match block_at(text, open) {
        Some(block) => &text[inner_start..open + block.len() - 1],
        None => &text[inner_start..],
    };

    Collection {
        name: Some(name.to_string()),
        body,
        first_line: line_of(text, inner_start),
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
