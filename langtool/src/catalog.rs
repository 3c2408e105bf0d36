//! Catalog helpers on top of `rspolib`.
//!
//! A catalog is an `rspolib` [`POFile`]. Merging a fresh extraction into an
//! existing catalog uses [`rspolib::Merge`], which follows polib: each
//! reference entry refreshes the first entry with the same source text and
//! context, unmatched ones are appended, and entries that vanished from the
//! reference become obsolete.

use std::collections::HashMap;

use rspolib::{FileOptions, POEntry, POFile};

/// An empty catalog with no header and no metadata.
pub fn new_catalog() -> POFile {
    POFile::new(FileOptions::default())
}

/// An untranslated entry for `msgid`.
pub fn new_entry(msgid: impl Into<String>) -> POEntry {
    let mut entry = POEntry::new(0);
    entry.msgid = msgid.into();
    entry
}

/// An untranslated entry carrying `annotation` as its translator comment.
pub fn annotated_entry(msgid: impl Into<String>, annotation: impl Into<String>) -> POEntry {
    let mut entry = new_entry(msgid);
    entry.tcomment = Some(annotation.into());
    entry
}

/// The translation of a live entry, when it has a non-empty one.
///
/// Fuzzy entries count as translated; obsolete ones never do.
pub fn live_translation(entry: &POEntry) -> Option<&str> {
    if entry.obsolete {
        return None;
    }
    entry.msgstr.as_deref().filter(|msgstr| !msgstr.is_empty())
}

/// Translated entries with their translation, in file order.
pub fn translated(catalog: &POFile) -> impl Iterator<Item = (&POEntry, &str)> {
    catalog
        .entries
        .iter()
        .filter_map(|entry| live_translation(entry).map(|msgstr| (entry, msgstr)))
}

/// Maps source text to translation for every translated entry.
///
/// When the same source text appears more than once, the last translation wins.
pub fn translation_map(catalog: &POFile) -> HashMap<&str, &str> {
    translated(catalog)
        .map(|(entry, msgstr)| (entry.msgid.as_str(), msgstr))
        .collect()
}

/// Returns the first entry, live or obsolete, with the given source text and context.
pub fn find_entry<'a>(catalog: &'a POFile, msgid: &str, msgctxt: Option<&str>) -> Option<&'a POEntry> {
    catalog
        .entries
        .iter()
        .find(|entry| entry.msgid == msgid && entry.msgctxt.as_deref() == msgctxt)
}
