//! Export steps: game sources → PO catalogs.
//!
//! Each function reads one game-side file and writes (or merges into) one
//! catalog. Paths are passed in explicitly; the project layout is the
//! caller's concern.

use std::fs;
use std::path::Path;

use rspolib::{Merge, POFile};
use tracing::{debug, info};

use crate::{
    catalog::{annotated_entry, new_catalog, new_entry},
    error::Error,
    formats::{TextList, Vdf, lua::extract_literals},
    languages::REFERENCE_VENDOR_LANGUAGE,
    traits::{Parser, read_text},
};

/// Annotation attached to every entry produced from a plain list file.
pub const SHIP_NAME_COMMENT: &str = "this is the name of a ship";

/// Name stamped into the header of the achievements catalog.
pub const ACHIEVEMENTS_DOMAIN: &str = "achievements";

/// Builds the comment block written at the top of every generated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    pub project: String,
    pub copyright_holder: String,
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        HeaderTemplate {
            project: "Reassembly".to_string(),
            copyright_holder: "2015 Arthur Danskin".to_string(),
        }
    }
}

impl HeaderTemplate {
    /// Renders the header for a catalog generated from `source_name`.
    pub fn render(&self, source_name: &str) -> String {
        format!(
            "\n{} data/{} localization file\n\nCopyright (C) {}\nContent-Type: text/plain; charset=utf-8\n",
            self.project, source_name, self.copyright_holder
        )
    }
}

/// Header for `source_name` with the default project and copyright holder.
pub fn catalog_header(source_name: &str) -> String {
    HeaderTemplate::default().render(source_name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn fresh_catalog(header: String) -> POFile {
    let mut catalog = new_catalog();
    catalog.header = Some(header);
    catalog.metadata.insert(
        "Content-Type".to_string(),
        "text/plain; charset=UTF-8".to_string(),
    );
    catalog
}

pub(crate) fn write_catalog(catalog: &POFile, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    catalog.write_to(path)?;
    info!(path = %path.display(), entries = catalog.entries.len(), "wrote catalog");
    Ok(())
}

/// Extracts the literals of a Lua data script into a catalog.
///
/// An existing catalog at `po_path` is loaded and the fresh literals are
/// merged into it, so translations and catalog metadata already there
/// survive. Returns the number of entries written.
pub fn lua_to_po(lua_path: &Path, po_path: &Path, header: &HeaderTemplate) -> Result<usize, Error> {
    let source = read_text(lua_path)?;
    let rendered = header.render(&file_name(lua_path));

    let mut extracted = fresh_catalog(rendered.clone());
    extracted
        .entries
        .extend(extract_literals(&source).into_iter().map(new_entry));
    debug!(
        source = %lua_path.display(),
        literals = extracted.entries.len(),
        "scanned lua literals"
    );

    let mut catalog = if po_path.exists() {
        let mut existing = POFile::read_from(po_path)?;
        existing.merge(extracted);
        existing
    } else {
        extracted
    };
    catalog.header = Some(rendered);

    write_catalog(&catalog, po_path)?;
    Ok(catalog.entries.len())
}

/// Turns every line of a plain list file into an annotated entry.
///
/// The catalog is always regenerated from scratch. Returns the number of entries.
pub fn txt_to_po(txt_path: &Path, po_path: &Path, header: &HeaderTemplate) -> Result<usize, Error> {
    let list = TextList::read_from(txt_path)?;

    let mut catalog = fresh_catalog(header.render(&file_name(txt_path)));
    for line in list.lines {
        catalog.entries.push(annotated_entry(line, SHIP_NAME_COMMENT));
    }

    write_catalog(&catalog, po_path)?;
    Ok(catalog.entries.len())
}

/// Loads the reference-language token table of a Steam localization file,
/// as `(key, value)` pairs in document order.
pub fn load_vendor_tokens(vdf_path: &Path) -> Result<Vec<(String, String)>, Error> {
    let vdf = Vdf::read_from(vdf_path)?;
    let tokens = vdf
        .table_at(&["lang", REFERENCE_VENDOR_LANGUAGE, "Tokens"])
        .ok_or_else(|| {
            Error::InvalidResource(format!(
                "{} has no lang/{}/Tokens table",
                vdf_path.display(),
                REFERENCE_VENDOR_LANGUAGE
            ))
        })?;
    Ok(tokens
        .strings()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect())
}

/// Exports the reference achievement text into a catalog, one entry per token
/// with the token key as the annotation.
///
/// Does nothing and returns `false` when the catalog already exists, so
/// translations are never overwritten.
pub fn vdf_to_po(vdf_path: &Path, po_path: &Path, header: &HeaderTemplate) -> Result<bool, Error> {
    if po_path.exists() {
        debug!(path = %po_path.display(), "achievements catalog exists, skipping");
        return Ok(false);
    }

    let mut catalog = fresh_catalog(header.render(ACHIEVEMENTS_DOMAIN));
    for (key, value) in load_vendor_tokens(vdf_path)? {
        catalog.entries.push(annotated_entry(value, key));
    }

    write_catalog(&catalog, po_path)?;
    Ok(true)
}

/// Rewrites files with CRLF line endings. Missing files are skipped.
///
/// Returns the number of files that changed.
pub fn normalize_line_endings<P: AsRef<Path>>(paths: &[P]) -> Result<usize, Error> {
    let mut changed = 0;
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(path)?;
        let normalized = to_crlf(&text);
        if normalized != text {
            fs::write(path, normalized)?;
            changed += 1;
        }
    }
    debug!(changed, "normalized line endings");
    Ok(changed)
}

fn to_crlf(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 16);
    let mut previous = None;
    for c in text.chars() {
        if c == '\n' && previous != Some('\r') {
            result.push('\r');
        }
        result.push(c);
        previous = Some(c);
    }
    result
}
