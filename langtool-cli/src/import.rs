use std::path::{Path, PathBuf};

use langtool::Error;
use langtool::import::{po_to_lua_replace, po_to_lua_table, po_to_txt, po_to_vdf};
use langtool::languages::vendor_language_name;
use tracing::{info, warn};

use crate::config::Config;

/// Imports every language back into the game tree, then writes the store
/// text and the achievements file into `downloads`.
///
/// Languages without a Steam name are left out of the achievements file.
pub fn run_import_command(config: &Config, languages: &[String], downloads: &Path) -> Result<(), Error> {
    for code in languages {
        let catalog_dir = config.catalog_dir(code);
        let output_dir = config.game_output_dir(code);
        info!(language = %code, "importing");

        let mut table_sources: Vec<PathBuf> = config
            .text_files
            .iter()
            .map(|name| catalog_dir.join(format!("{}.po", name)))
            .collect();
        table_sources.push(catalog_dir.join("text.po"));
        po_to_lua_table(&output_dir.join("text.lua"), &table_sources)?;

        for name in &config.lua_files {
            po_to_lua_replace(
                &output_dir.join(format!("{}.lua", name)),
                &config.lua_source(name),
                &catalog_dir.join(format!("{}.po", name)),
            )?;
        }

        let store = catalog_dir.join("store.po");
        if store.exists() {
            po_to_txt(&downloads.join(format!("store_{}.txt", code)), &store)?;
        } else {
            warn!(language = %code, path = %store.display(), "no store catalog, skipping store text");
        }

        println!("✅ Imported {}", code);
    }

    let mut vendor_catalogs: Vec<(&str, PathBuf)> = Vec::new();
    for code in languages {
        if vendor_language_name(code).is_some() {
            vendor_catalogs.push((code.as_str(), config.catalog_dir(code).join("achievements.po")));
        } else {
            warn!(language = %code, "no Steam language name, leaving out of achievements");
        }
    }
    if vendor_catalogs.is_empty() {
        warn!("no Steam languages selected, skipping achievements");
        return Ok(());
    }

    let output = downloads.join("achievements.vdf");
    po_to_vdf(&output, &config.vendor_source(), &vendor_catalogs)?;
    println!("✅ Wrote {}", output.display());
    Ok(())
}
