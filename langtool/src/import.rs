//! Import steps: translated PO catalogs → game and storefront files.

use std::fs;
use std::path::Path;

use rspolib::POFile;
use tracing::{debug, info, warn};

use crate::{
    catalog::{translated, translation_map},
    error::Error,
    export::load_vendor_tokens,
    formats::{
        LuaTable, StoreSection, StoreText, Vdf,
        lua::replace_first_occurrences,
        vdf::{Table, Value},
    },
    languages::require_vendor_language_name,
    traits::{Parser, read_text},
};

fn create_parent_dir(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes a translated copy of a Lua data script.
///
/// Every translated entry replaces the first occurrence of its source text
/// in `base_path`, in catalog order. When the catalog has no translations,
/// nothing is written and `false` is returned.
pub fn po_to_lua_replace(output: &Path, base_path: &Path, po_path: &Path) -> Result<bool, Error> {
    let base = read_text(base_path)?;
    let catalog = POFile::read_from(po_path)?;

    let pairs: Vec<(&str, &str)> = translated(&catalog)
        .map(|(entry, msgstr)| (entry.msgid.as_str(), msgstr))
        .collect();
    if pairs.is_empty() {
        debug!(po = %po_path.display(), "no translations, not writing {}", output.display());
        return Ok(false);
    }

    let translated = replace_first_occurrences(&base, pairs.iter().copied());
    create_parent_dir(output)?;
    fs::write(output, translated)?;
    info!(path = %output.display(), translations = pairs.len(), "wrote translated script");
    Ok(true)
}

/// Merges the translations of several catalogs into one literal table.
///
/// Missing catalogs are skipped. For a source text translated in more than
/// one catalog, the later catalog wins. When no translation is found at all,
/// nothing is written and `false` is returned.
pub fn po_to_lua_table<P: AsRef<Path>>(output: &Path, po_paths: &[P]) -> Result<bool, Error> {
    let mut table = LuaTable::new();
    for po_path in po_paths {
        let po_path = po_path.as_ref();
        if !po_path.exists() {
            debug!(po = %po_path.display(), "catalog not found, skipping");
            continue;
        }
        let catalog = POFile::read_from(po_path)?;
        for (entry, msgstr) in translated(&catalog) {
            table.insert(entry.msgid.as_str(), msgstr);
        }
    }

    if table.is_empty() {
        debug!("no translations, not writing {}", output.display());
        return Ok(false);
    }

    create_parent_dir(output)?;
    table.write_to(output)?;
    info!(path = %output.display(), pairs = table.len(), "wrote literal table");
    Ok(true)
}

/// Writes the annotation and translation of every translated entry as store text.
///
/// Returns the number of sections written.
pub fn po_to_txt(output: &Path, po_path: &Path) -> Result<usize, Error> {
    let catalog = POFile::read_from(po_path)?;
    let store = StoreText {
        sections: translated(&catalog)
            .map(|(entry, msgstr)| StoreSection {
                annotation: entry.tcomment.clone().unwrap_or_default(),
                text: msgstr.to_string(),
            })
            .collect(),
    };

    create_parent_dir(output)?;
    store.write_to(output)?;
    info!(path = %output.display(), sections = store.sections.len(), "wrote store text");
    Ok(store.sections.len())
}

/// Rebuilds a Steam localization file from translated achievement catalogs.
///
/// `catalogs` pairs each language code with its achievements catalog. Every
/// token of the reference branch in `vdf_path` gets the translation of its
/// reference value, so each language needs a translation for every token.
pub fn po_to_vdf<P: AsRef<Path>>(
    output: &Path,
    vdf_path: &Path,
    catalogs: &[(&str, P)],
) -> Result<(), Error> {
    let tokens = load_vendor_tokens(vdf_path)?;

    let mut languages = Table::new();
    for (code, po_path) in catalogs {
        let vendor_name = require_vendor_language_name(code)?;
        let po_path = po_path.as_ref();
        let catalog = POFile::read_from(po_path)?;
        let translations = translation_map(&catalog);

        let mut translated = Table::new();
        for (key, value) in &tokens {
            let translation =
                translations
                    .get(value.as_str())
                    .ok_or_else(|| Error::MissingTranslation {
                        language: code.to_string(),
                        key: key.clone(),
                    })?;
            translated.insert(key.as_str(), Value::String(translation.to_string()));
        }

        let mut branch = Table::new();
        branch.insert("Tokens", Value::Table(translated));
        languages.insert(vendor_name, Value::Table(branch));
        debug!(language = %code, po = %po_path.display(), tokens = tokens.len(), "translated achievements");
    }

    if catalogs.is_empty() {
        warn!("no languages selected, writing an empty vendor file");
    }

    let mut vdf = Vdf::default();
    vdf.root.insert("lang", Value::Table(languages));
    create_parent_dir(output)?;
    vdf.write_to(output)?;
    info!(path = %output.display(), languages = catalogs.len(), "wrote vendor file");
    Ok(())
}
