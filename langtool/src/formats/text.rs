//! Plain-text formats: the one-name-per-line source list and the
//! annotation/translation store text handed to the storefront.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser};

/// A plain list file: one translatable unit per line.
///
/// Lines are trimmed; blank lines carry nothing to translate and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextList {
    pub lines: Vec<String>,
}

impl Parser for TextList {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
        Ok(TextList { lines })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

/// One block of store text: the annotation naming the field, then its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSection {
    pub annotation: String,
    pub text: String,
}

/// Store page text as `annotation\ntext\n\n` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreText {
    pub sections: Vec<StoreSection>,
}

impl Parser for StoreText {
    /// Splits blocks on blank lines; the first line of a block is its annotation.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut sections = Vec::new();
        let mut block: Vec<String> = Vec::new();
        let mut lines = reader.lines();
        loop {
            let line = lines.next().transpose()?;
            let at_break = match &line {
                Some(l) => l.trim().is_empty(),
                None => true,
            };
            if at_break {
                if let Some((annotation, text)) = block.split_first() {
                    sections.push(StoreSection {
                        annotation: annotation.clone(),
                        text: text.join("\n"),
                    });
                }
                block.clear();
            } else if let Some(l) = &line {
                block.push(l.trim_end_matches('\r').to_string());
            }
            if line.is_none() {
                break;
            }
        }
        Ok(StoreText { sections })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for section in &self.sections {
            writeln!(writer, "{}", section.annotation)?;
            writeln!(writer, "{}", section.text)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}
