//! Support for Valve's KeyValues (`.vdf`) text format.
//!
//! Steam stores localized achievement and store text as
//! `"lang" { "<language>" { "Tokens" { "KEY" "value" ... } } }`.
//! Tables keep document order; duplicate keys are merged the way Steam does
//! (later values replace earlier ones, nested tables are combined).

use std::io::{BufRead, Write};
use std::iter::Peekable;
use std::str::Chars;

use crate::{error::Error, traits::Parser};

const FORMAT: &str = "VDF";

/// A value in a KeyValues document: either a string or a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Table(Table),
}

/// An ordered set of key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub pairs: Vec<(String, Value)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key. KeyValues keys are case-insensitive.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    pub fn get_table(&self, key: &str) -> Option<&Table> {
        match self.get(key) {
            Some(Value::Table(table)) => Some(table),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Inserts a pair, replacing a string or merging into a table under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self
            .pairs
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(index) => match (&mut self.pairs[index].1, value) {
                (Value::Table(existing), Value::Table(incoming)) => {
                    for (k, v) in incoming.pairs {
                        existing.insert(k, v);
                    }
                }
                (slot, value) => *slot = value,
            },
            None => self.pairs.push((key, value)),
        }
    }

    /// String-valued pairs in document order; nested tables are skipped.
    pub fn strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().filter_map(|(k, v)| match v {
            Value::String(s) => Some((k.as_str(), s.as_str())),
            Value::Table(_) => None,
        })
    }

    fn write(&self, content: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        for (key, value) in &self.pairs {
            match value {
                Value::String(s) => {
                    content.push_str(&format!(
                        "{}\"{}\"\t\t\"{}\"\n",
                        indent,
                        escape(key),
                        escape(s)
                    ));
                }
                Value::Table(table) => {
                    content.push_str(&format!("{}\"{}\"\n{}{{\n", indent, escape(key), indent));
                    table.write(content, depth + 1);
                    content.push_str(&format!("{}}}\n", indent));
                }
            }
        }
    }
}

/// A whole KeyValues document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vdf {
    pub root: Table,
}

impl Vdf {
    /// Follows a path of nested table keys from the root.
    pub fn table_at(&self, path: &[&str]) -> Option<&Table> {
        path.iter()
            .try_fold(&self.root, |table, key| table.get_table(key))
    }
}

impl Parser for Vdf {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut lexer = Lexer::new(&text);
        let root = parse_table(&mut lexer, true)?;
        Ok(Vdf { root })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        self.root.write(&mut content, 0);
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Text(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Lexer {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::parse_error(FORMAT, self.line, message)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if lookahead.peek() != Some(&'/') {
                        return;
                    }
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            self.skip_trivia();
            let token = match self.chars.peek().copied() {
                None => return Ok(None),
                Some('{') => {
                    self.bump();
                    Token::Open
                }
                Some('}') => {
                    self.bump();
                    Token::Close
                }
                Some('"') => {
                    self.bump();
                    Token::Text(self.quoted()?)
                }
                Some('[') => {
                    // Platform conditionals such as `[$WIN32]` apply to every platform here.
                    while let Some(c) = self.bump() {
                        if c == ']' {
                            break;
                        }
                    }
                    continue;
                }
                Some(_) => Token::Text(self.bare()),
            };
            return Ok(Some(token));
        }
    }

    fn quoted(&mut self) -> Result<String, Error> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated quoted string")),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some(other) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => return Err(self.error("unterminated quoted string")),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn bare(&mut self) -> String {
        let mut value = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '"' | '{' | '}') {
                break;
            }
            value.push(c);
            self.bump();
        }
        value
    }
}

fn parse_table(lexer: &mut Lexer<'_>, top_level: bool) -> Result<Table, Error> {
    let mut table = Table::new();
    loop {
        let key = match lexer.next_token()? {
            None if top_level => return Ok(table),
            None => return Err(lexer.error("unexpected end of input, expected `}`")),
            Some(Token::Close) if !top_level => return Ok(table),
            Some(Token::Close) => return Err(lexer.error("unexpected `}`")),
            Some(Token::Open) => return Err(lexer.error("expected key, found `{`")),
            Some(Token::Text(key)) => key,
        };
        let value = match lexer.next_token()? {
            Some(Token::Open) => Value::Table(parse_table(lexer, false)?),
            Some(Token::Text(value)) => Value::String(value),
            Some(Token::Close) | None => {
                return Err(lexer.error(format!("missing value for key `{}`", key)));
            }
        };
        table.insert(key, value);
    }
}

fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            other => result.push(other),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {r#"
        "lang"
        {
            "english"
            {
                // achievement names
                "Tokens"
                {
                    "NEW_ACHIEVEMENT_1_0_NAME"	"First Blood"
                    "NEW_ACHIEVEMENT_1_0_DESC"	"Destroy a \"hostile\" ship"
                }
            }
        }
    "#};

    #[test]
    fn test_parse_nested_tokens() {
        let vdf = Vdf::from_str(SAMPLE).unwrap();
        let tokens = vdf.table_at(&["lang", "english", "Tokens"]).unwrap();
        let pairs: Vec<_> = tokens.strings().collect();
        assert_eq!(
            pairs,
            vec![
                ("NEW_ACHIEVEMENT_1_0_NAME", "First Blood"),
                ("NEW_ACHIEVEMENT_1_0_DESC", "Destroy a \"hostile\" ship"),
            ]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let vdf = Vdf::from_str(SAMPLE).unwrap();
        assert!(vdf.table_at(&["Lang", "ENGLISH", "tokens"]).is_some());
        assert!(vdf.table_at(&["lang", "german"]).is_none());
    }

    #[test]
    fn test_parse_bare_tokens_and_conditionals() {
        let vdf = Vdf::from_str("root { key value [$WIN32] other \"x\" }").unwrap();
        let root = vdf.root.get_table("root").unwrap();
        assert_eq!(root.get_str("key"), Some("value"));
        assert_eq!(root.get_str("other"), Some("x"));
    }

    #[test]
    fn test_duplicate_keys_merge() {
        let vdf = Vdf::from_str(r#""a" { "x" "1" } "a" { "y" "2" "x" "3" }"#).unwrap();
        let a = vdf.root.get_table("a").unwrap();
        assert_eq!(a.pairs.len(), 2);
        assert_eq!(a.get_str("x"), Some("3"));
        assert_eq!(a.get_str("y"), Some("2"));
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = Vdf::from_str("\"lang\"\n{\n\"english\"\n").unwrap_err();
        assert!(err.to_string().contains("VDF parse error at line 4"));

        let err = Vdf::from_str("\"key\" }").unwrap_err();
        assert!(err.to_string().contains("missing value"));

        let err = Vdf::from_str("\"key\" \"unterminated").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_write_pretty_layout() {
        let mut tokens = Table::new();
        tokens.insert("KEY", Value::String("Wert \"eins\"\nzwei".to_string()));
        let mut german = Table::new();
        german.insert("Tokens", Value::Table(tokens));
        let mut lang = Table::new();
        lang.insert("german", Value::Table(german));
        let mut vdf = Vdf::default();
        vdf.root.insert("lang", Value::Table(lang));

        let output = vdf.write_to_string().unwrap();
        let expected = "\"lang\"\n{\n\t\"german\"\n\t{\n\t\t\"Tokens\"\n\t\t{\n\t\t\t\"KEY\"\t\t\"Wert \\\"eins\\\"\\nzwei\"\n\t\t}\n\t}\n}\n";
        assert_eq!(output, expected);

        let reparsed = Vdf::from_str(&output).unwrap();
        assert_eq!(reparsed, vdf);
    }
}
