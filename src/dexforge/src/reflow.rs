//! Soft-wrap annotation for generated descriptions
//!
//! The in-game text box wraps only at spaces. CJK text has none, so break
//! points are inserted after sentence punctuation and after common semantic
//! boundary words. Latin text gets two spaces after each punctuation mark.
//!
//! Annotation is idempotent: existing whitespace after a break point counts
//! as the break, so `annotate(annotate(t)) == annotate(t)`.

use std::fmt;
use std::str::FromStr;

/// Sentence punctuation that ends a CJK clause
const CJK_PUNCTUATION: &[char] = &['。', '，', '！', '？', '；', '：'];

/// Words after which a CJK line may break, tried in order (first match wins)
const CJK_BREAK_WORDS: &[&str] = &[
    // verbs
    "攻击", "进行", "提高", "降低", "回复", "给予", "使出", "发射", "释放",
    // connectives
    "从而", "并且", "同时", "然后", "接着", "之后",
    // nouns
    "对手", "自己", "宝可梦", "招式", "能力", "伤害", "状态",
];

const LATIN_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// Closing characters that stay attached to the punctuation before them
const LATIN_CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

/// Writing system of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Cjk,
    Latin,
}

impl Script {
    /// CJK when the text holds any CJK ideograph, kana or CJK punctuation
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_cjk) {
            Script::Cjk
        } else {
            Script::Latin
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Script::Cjk => "cjk",
            Script::Latin => "latin",
        }
    }
}

impl FromStr for Script {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cjk" | "zh" | "chinese" => Ok(Script::Cjk),
            "latin" | "en" | "english" => Ok(Script::Latin),
            other => Err(format!("unknown script {:?} (expected cjk or latin)", other)),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'   // CJK symbols and punctuation
        | '\u{3040}'..='\u{30FF}' // kana
        | '\u{3400}'..='\u{4DBF}' // extension A
        | '\u{4E00}'..='\u{9FFF}' // unified ideographs
        | '\u{FF00}'..='\u{FFEF}' // fullwidth forms
    )
}

/// Insert soft-wrap points into `text`. Trailing whitespace is removed.
pub fn annotate(text: &str, script: Script) -> String {
    let annotated = match script {
        Script::Cjk => annotate_cjk(text),
        Script::Latin => annotate_latin(text),
    };
    annotated.trim_end().to_string()
}

fn annotate_cjk(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if CJK_PUNCTUATION.contains(&c) {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            if rest.chars().next().is_some_and(|next| !next.is_whitespace()) {
                out.push(' ');
            }
            continue;
        }

        if let Some(word) = CJK_BREAK_WORDS.iter().find(|word| rest.starts_with(**word)) {
            out.push_str(word);
            rest = &rest[word.len()..];
            let breakable = rest
                .chars()
                .next()
                .is_some_and(|next| !next.is_whitespace() && !CJK_PUNCTUATION.contains(&next));
            if breakable {
                out.push(' ');
            }
            continue;
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn annotate_latin(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);

        if !LATIN_PUNCTUATION.contains(&c) || between_digits {
            out.push(c);
            i += 1;
            continue;
        }

        // one run of marks and closers is a single break point
        while i < chars.len()
            && (LATIN_PUNCTUATION.contains(&chars[i]) || LATIN_CLOSERS.contains(&chars[i]))
        {
            out.push(chars[i]);
            i += 1;
        }

        let mut next = i;
        while next < chars.len() && chars[next] == ' ' {
            next += 1;
        }
        match chars.get(next) {
            Some(following) if !following.is_whitespace() => {
                out.push_str("  ");
                i = next;
            }
            _ => {}
        }
    }

    out
}
