//! Support for the game's Lua data files.
//!
//! Two shapes are handled here:
//! - data scripts (`tips.lua`, `messages.lua`, ...) whose double-quoted
//!   literals are the translatable text, scanned by [`extract_literals`] and
//!   patched in place by [`replace_first_occurrences`];
//! - the flat literal table (`text.lua`) the game loads its translations
//!   from, modelled by [`LuaTable`].

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    static ref QUOTED_LITERAL_REGEX: Regex = Regex::new(r#""[^"]+""#).unwrap();
}

/// Everything from this marker on is generated web data and is never translated.
pub const UNTRANSLATED_SECTION_MARKER: &str = "web_header";

/// Literals with this many characters or fewer are not worth translating.
const MIN_LITERAL_CHARS: usize = 2;

/// Returns the translatable literals of a Lua data script in scan order.
///
/// The text is cut at [`UNTRANSLATED_SECTION_MARKER`], every `"..."` span
/// is unquoted, backslash-newline continuations (LF or CRLF) are removed, and
/// literals of two characters or fewer are dropped. Duplicates are kept.
pub fn extract_literals(source: &str) -> Vec<String> {
    let scanned = match source.find(UNTRANSLATED_SECTION_MARKER) {
        Some(end) => &source[..end],
        None => source,
    };

    QUOTED_LITERAL_REGEX
        .find_iter(scanned)
        .map(|m| {
            let quoted = m.as_str();
            quoted[1..quoted.len() - 1]
                .replace("\\\r\n", "")
                .replace("\\\n", "")
        })
        .filter(|literal| literal.chars().count() > MIN_LITERAL_CHARS)
        .collect()
}

/// Replaces the first occurrence of each source text with its translation,
/// in the given order. Returns the patched text.
///
/// Each pair replaces at most one span, so a string that appears twice in
/// `base` needs two pairs to be fully translated.
pub fn replace_first_occurrences<'a, I>(base: &str, replacements: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut text = base.to_string();
    for (source, translation) in replacements {
        if source.is_empty() {
            continue;
        }
        text = text.replacen(source, translation, 1);
    }
    text
}

/// The flat `{"source" = "translation", ...}` table read by the game.
///
/// Pairs are kept sorted by source text. Identity pairs are dropped on write,
/// since the game falls back to the source text anyway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LuaTable {
    pub pairs: BTreeMap<String, String>,
}

impl LuaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, translation: impl Into<String>) {
        self.pairs.insert(source.into(), translation.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.pairs.get(source).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl Parser for LuaTable {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        TableReader::new(&text).read()
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let body = self
            .pairs
            .iter()
            .filter(|(source, translation)| source != translation)
            .map(|(source, translation)| {
                format!("\"{}\" = \"{}\"", escape(source), escape(translation))
            })
            .collect::<Vec<_>>()
            .join(",\n");
        writer
            .write_all(format!("{{{}}}", body).as_bytes())
            .map_err(Error::Io)
    }
}

/// Escapes a string for the literal table: quotes and newlines only.
///
/// Backslashes are written unchanged. A value ending in `\` escapes its own
/// closing quote, and a literal `\n` in a value reads back as a newline, so
/// such tables do not survive [`LuaTable::read_from`].
pub fn escape(value: &str) -> String {
    value.replace('"', "\\\"").replace('\n', "\\n")
}

/// Inverse of [`escape`]. Other backslash sequences are kept as written.
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') => {
                    result.push('"');
                    chars.next();
                    continue;
                }
                Some('n') => {
                    result.push('\n');
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        result.push(c);
    }
    result
}

const FORMAT: &str = "Lua table";

struct TableReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TableReader<'a> {
    fn new(text: &'a str) -> Self {
        TableReader { text, pos: 0 }
    }

    fn line(&self) -> usize {
        self.text[..self.pos].matches('\n').count() + 1
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::parse_error(FORMAT, self.line(), message)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, token: char) -> Result<(), Error> {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", token)))
        }
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            true
        } else {
            false
        }
    }

    fn string(&mut self) -> Result<String, Error> {
        self.expect('"')?;
        let start = self.pos;
        let mut escaped = false;
        for (offset, c) in self.rest().char_indices() {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    let raw = &self.text[start..start + offset];
                    self.pos = start + offset + 1;
                    return Ok(unescape(raw));
                }
                _ => escaped = false,
            }
        }
        Err(self.error("unterminated string"))
    }

    fn read(mut self) -> Result<LuaTable, Error> {
        let mut table = LuaTable::new();
        self.expect('{')?;
        if self.eat('}') {
            return self.finish(table);
        }
        loop {
            let source = self.string()?;
            self.expect('=')?;
            let translation = self.string()?;
            table.insert(source, translation);
            if self.eat(',') {
                // Trailing comma before the closing brace is allowed.
                if self.eat('}') {
                    break;
                }
                continue;
            }
            self.expect('}')?;
            break;
        }
        self.finish(table)
    }

    fn finish(mut self, table: LuaTable) -> Result<LuaTable, Error> {
        self.skip_whitespace();
        if self.rest().is_empty() {
            Ok(table)
        } else {
            Err(self.error("unexpected text after table"))
        }
    }
}
