use std::path::PathBuf;

use langtool::Error;
use langtool::export::{lua_to_po, normalize_line_endings, txt_to_po, vdf_to_po};
use tracing::info;

use crate::config::Config;
use crate::xgettext::run_xgettext;

/// Exports every language: C++ strings, Lua literals, list files and
/// achievements into `lang/<code>/*.po`.
///
/// An `xgettext` failure aborts the run; its exit code is carried by the error.
pub fn run_export_command(config: &Config, languages: &[String]) -> Result<(), Error> {
    let header = config.header_template();
    let mut produced: Vec<PathBuf> = Vec::new();

    for code in languages {
        let catalog_dir = config.catalog_dir(code);
        info!(language = %code, "exporting");

        produced.push(run_xgettext(config, code)?);

        for name in &config.lua_files {
            let po = catalog_dir.join(format!("{}.po", name));
            lua_to_po(&config.lua_source(name), &po, &header)?;
            produced.push(po);
        }

        for name in &config.text_files {
            let po = catalog_dir.join(format!("{}.po", name));
            txt_to_po(&config.text_source(name), &po, &header)?;
            produced.push(po);
        }

        let achievements = catalog_dir.join("achievements.po");
        if vdf_to_po(&config.vendor_source(), &achievements, &header)? {
            produced.push(achievements);
        }

        println!("✅ Exported {}", code);
    }

    let changed = normalize_line_endings(&produced)?;
    info!(files = produced.len(), changed, "normalized catalogs to CRLF");
    Ok(())
}
