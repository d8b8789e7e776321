//! Brace-depth scanning over object-literal source
//!
//! The scanner is a partial lexer: it knows just enough about string
//! literals, regex literals and comments to keep braces inside them from
//! being counted. Everything else is opaque text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<key>: {` at the start of a line, key bare or quoted
static RECORD_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:"([^"\\]+)"|'([^'\\]+)'|([A-Za-z0-9_$]+))\s*:\s*\{"#).unwrap()
});

/// How a character should be treated by brace counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    Code,
    Literal,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Quoted(char),
    Escaped(char),
    Regex { class: bool },
    RegexEscaped { class: bool },
    LineComment,
    BlockOpen,
    Block,
    BlockClose,
}

/// Character classifier that carries string/comment state across calls
#[derive(Debug, Clone)]
pub(crate) struct Lexer {
    mode: Mode,
    /// Last non-blank code character, or the closing delimiter of a literal
    prev: Option<char>,
}

impl Lexer {
    pub(crate) fn new() -> Self {
        Self {
            mode: Mode::Code,
            prev: None,
        }
    }

    /// A `/` here starts a regex literal rather than a division
    fn regex_allowed(&self) -> bool {
        matches!(
            self.prev,
            None | Some('(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | ';')
        )
    }

    /// Classify every character of `text`, yielding `(byte offset, char, class)`
    pub(crate) fn feed<'a>(
        &'a mut self,
        text: &'a str,
    ) -> impl Iterator<Item = (usize, char, Class)> + 'a {
        let mut chars = text.char_indices().peekable();
        std::iter::from_fn(move || {
            let (i, c) = chars.next()?;
            let next = chars.peek().map(|&(_, n)| n);
            Some((i, c, self.classify(c, next)))
        })
    }

    /// Reset state that cannot survive a line break
    pub(crate) fn end_line(&mut self) {
        match self.mode {
            Mode::LineComment
            | Mode::Quoted('"' | '\'')
            | Mode::Escaped('"' | '\'')
            | Mode::Regex { .. }
            | Mode::RegexEscaped { .. } => self.mode = Mode::Code,
            _ => {}
        }
    }

    fn classify(&mut self, c: char, next: Option<char>) -> Class {
        match self.mode {
            Mode::Code => match c {
                '"' | '\'' | '`' => {
                    self.mode = Mode::Quoted(c);
                    Class::Literal
                }
                '/' if next == Some('/') => {
                    self.mode = Mode::LineComment;
                    Class::Comment
                }
                '/' if next == Some('*') => {
                    self.mode = Mode::BlockOpen;
                    Class::Comment
                }
                '/' if self.regex_allowed() => {
                    self.mode = Mode::Regex { class: false };
                    Class::Literal
                }
                _ => {
                    if !c.is_whitespace() {
                        self.prev = Some(c);
                    }
                    Class::Code
                }
            },
            Mode::Quoted(quote) => {
                if c == '\\' {
                    self.mode = Mode::Escaped(quote);
                } else if c == quote || (c == '\n' && quote != '`') {
                    self.mode = Mode::Code;
                    self.prev = Some(quote);
                }
                Class::Literal
            }
            Mode::Regex { class } => {
                match c {
                    '\\' => self.mode = Mode::RegexEscaped { class },
                    '[' => self.mode = Mode::Regex { class: true },
                    ']' => self.mode = Mode::Regex { class: false },
                    '/' if !class => {
                        self.mode = Mode::Code;
                        self.prev = Some('/');
                    }
                    '\n' => self.mode = Mode::Code,
                    _ => {}
                }
                Class::Literal
            }
            Mode::RegexEscaped { class } => {
                self.mode = Mode::Regex { class };
                Class::Literal
            }
            Mode::Escaped(quote) => {
                self.mode = Mode::Quoted(quote);
                Class::Literal
            }
            Mode::LineComment => {
                if c == '\n' {
                    self.mode = Mode::Code;
                }
                Class::Comment
            }
            Mode::BlockOpen => {
                self.mode = Mode::Block;
                Class::Comment
            }
            Mode::Block => {
                if c == '*' && next == Some('/') {
                    self.mode = Mode::BlockClose;
                }
                Class::Comment
            }
            Mode::BlockClose => {
                self.mode = Mode::Code;
                Class::Comment
            }
        }
    }
}

/// Output of one scan over a collection body
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Scanned {
    /// A complete record span, from its opening `{` to the matching `}`
    Record {
        id: String,
        line: usize,
        span: String,
    },
    /// Input ended while a record was still open
    Unterminated {
        id: String,
        line: usize,
        depth: usize,
    },
}

struct Open {
    id: String,
    line: usize,
    indent: String,
    depth: usize,
    span: String,
    /// The record's own layout marks where its fields end, so a sibling
    /// `key: {` at the record's indent can close it
    recoverable: bool,
}

impl Open {
    fn unterminated(self) -> Scanned {
        Scanned::Unterminated {
            id: self.id,
            line: self.line,
            depth: self.depth,
        }
    }
}

fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Adjust `depth` for the code braces of `text`. Returns the byte offset of the
/// `}` that brings the depth back to zero, if any.
fn close_offset(lexer: &mut Lexer, text: &str, depth: &mut usize) -> Option<usize> {
    for (i, c, class) in lexer.feed(text) {
        if class != Class::Code {
            continue;
        }
        match c {
            '{' => *depth += 1,
            '}' => {
                *depth = depth.saturating_sub(1);
                if *depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a collection body into top-level record spans.
///
/// Runs a two-state machine over the lines: outside any record, `key: {`
/// opens one; inside, braces are counted until the depth returns to zero.
/// Several records may share a line. A record that never closes is reported
/// as unterminated when a sibling opens at its indent, or at end of input.
/// `first_line` is the 1-based line number of `body`'s first line in the
/// original text.
pub(crate) fn scan(body: &str, first_line: usize) -> Vec<Scanned> {
    let mut out = Vec::new();
    let mut open: Option<Open> = None;
    let mut lexer = Lexer::new();

    for (index, line) in body.lines().enumerate() {
        let line_no = first_line + index;
        let indent = indent_of(line);
        let mut rest = line;

        if let Some(mut record) = open.take() {
            if record.recoverable && indent == record.indent && RECORD_OPEN.is_match(line) {
                out.push(record.unterminated());
                lexer = Lexer::new();
            } else {
                match close_offset(&mut lexer, line, &mut record.depth) {
                    Some(end) => {
                        record.span.push_str(&line[..=end]);
                        out.push(Scanned::Record {
                            id: record.id,
                            line: record.line,
                            span: record.span,
                        });
                        lexer = Lexer::new();
                        rest = &line[end + 1..];
                    }
                    None => {
                        if !line.trim().is_empty() && indent.len() > record.indent.len() {
                            record.recoverable = true;
                        }
                        record.span.push_str(line);
                        record.span.push('\n');
                        lexer.end_line();
                        open = Some(record);
                        continue;
                    }
                }
            }
        }

        loop {
            let trimmed = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
            let Some(caps) = RECORD_OPEN.captures(trimmed) else {
                break;
            };
            let (Some(whole), Some(key)) = (
                caps.get(0),
                caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)),
            ) else {
                break;
            };
            let id = key.as_str().to_string();
            let tail = &trimmed[whole.end() - 1..];

            let mut depth = 0;
            match close_offset(&mut lexer, tail, &mut depth) {
                Some(end) => {
                    out.push(Scanned::Record {
                        id,
                        line: line_no,
                        span: tail[..=end].to_string(),
                    });
                    lexer = Lexer::new();
                    rest = &tail[end + 1..];
                }
                None => {
                    lexer.end_line();
                    open = Some(Open {
                        id,
                        line: line_no,
                        indent: indent.to_string(),
                        depth,
                        recoverable: !tail[1..].trim().is_empty(),
                        span: format!("{}\n", tail),
                    });
                    break;
                }
            }
        }
    }

    if let Some(record) = open {
        out.push(record.unterminated());
    }

    out
}

/// The block starting at byte offset `open` (which must hold `{`), up to and
/// including its matching `}`
pub(crate) fn block_at(text: &str, open: usize) -> Option<&str> {
    if !text[open..].starts_with('{') {
        return None;
    }
    let mut depth = 0;
    let mut lexer = Lexer::new();
    let end = close_offset(&mut lexer, &text[open..], &mut depth)?;
    Some(&text[open..=open + end])
}

/// Per-byte flag, set where `text` is inside a string literal (quotes included)
pub(crate) fn literal_mask(text: &str) -> Vec<bool> {
    let mut mask = vec![false; text.len()];
    let mut lexer = Lexer::new();
    for (i, c, class) in lexer.feed(text) {
        if class == Class::Literal {
            mask[i..i + c.len_utf8()].fill(true);
        }
    }
    mask
}

/// View of a `{ ... }` span where only its own top level stays readable.
///
/// Nested blocks keep their braces but their contents are blanked, and
/// comments are blanked everywhere. Byte offsets match the input, so a match
/// found in the view can be resolved against the original with [`block_at`].
pub(crate) fn top_level(span: &str) -> String {
    let mut view = String::with_capacity(span.len());
    let mut depth = 0usize;
    let mut lexer = Lexer::new();

    for (_, c, class) in lexer.feed(span) {
        let keep = match (class, c) {
            (_, '\n') => true,
            (Class::Comment, _) => false,
            (Class::Code, '{') => {
                depth += 1;
                depth <= 2
            }
            (Class::Code, '}') => {
                let keep = depth <= 2;
                depth = depth.saturating_sub(1);
                keep
            }
            _ => depth <= 1,
        };
        if keep {
            view.push(c);
        } else {
            view.extend(std::iter::repeat(' ').take(c.len_utf8()));
        }
    }

    view
}
