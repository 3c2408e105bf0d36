use std::fs;
use std::path::Path;

use langtool::export::{HeaderTemplate, lua_to_po, txt_to_po, vdf_to_po};
use langtool::formats::LuaTable;
use langtool::import::{po_to_lua_replace, po_to_lua_table, po_to_vdf};
use langtool::catalog::{find_entry, live_translation, new_catalog, new_entry};
use langtool::{POEntry, POFile, Parser};
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn translate(po_path: &Path, source: &str, translation: &str) {
    let mut catalog = POFile::read_from(po_path).unwrap();
    for entry in catalog.entries.iter_mut().filter(|e| e.msgid == source) {
        entry.msgstr = Some(translation.to_string());
    }
    catalog.write_to(po_path).unwrap();
}

#[test]
fn test_txt_round_trip_without_translations_produces_no_table() {
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("lang/ships.txt");
    let po = tmp.path().join("lang/de/ships.po");
    let table = tmp.path().join("data/lang/de/text.lua");
    write(&txt, "Terran Cruiser\nFarmer Station\n");

    txt_to_po(&txt, &po, &HeaderTemplate::default()).unwrap();
    assert!(!po_to_lua_table(&table, &[&po]).unwrap());
    assert!(!table.exists());
}

#[test]
fn test_repeated_extraction_keeps_translations_without_duplicating() {
    let tmp = TempDir::new().unwrap();
    let lua = tmp.path().join("data/tips.lua");
    let po = tmp.path().join("lang/de/tips.po");
    write(&lua, r#"tips = { "Press space to fire", "Fire", "Fire" }"#);
    let header = HeaderTemplate::default();

    assert_eq!(lua_to_po(&lua, &po, &header).unwrap(), 3);
    translate(&po, "Fire", "Feuer");

    assert_eq!(lua_to_po(&lua, &po, &header).unwrap(), 3);
    assert_eq!(lua_to_po(&lua, &po, &header).unwrap(), 3);

    let catalog = POFile::read_from(&po).unwrap();
    let fire: Vec<&POEntry> = catalog.entries.iter().filter(|e| e.msgid == "Fire").collect();
    assert_eq!(fire.len(), 2);
    assert!(fire.iter().all(|e| live_translation(e) == Some("Feuer")));
    assert!(
        catalog
            .header
            .as_deref()
            .unwrap_or_default()
            .contains("data/tips.lua localization file")
    );
}

#[test]
fn test_extraction_survives_crlf_catalogs() {
    let tmp = TempDir::new().unwrap();
    let lua = tmp.path().join("data/tips.lua");
    let po = tmp.path().join("lang/de/tips.po");
    write(&lua, r#"tips = { "Hold shift to boost" }"#);
    write(
        &po,
        "msgid \"\"\r\nmsgstr \"\"\r\n\r\nmsgid \"Hold shift to boost\"\r\nmsgstr \"Umschalt halten\"\r\n",
    );

    lua_to_po(&lua, &po, &HeaderTemplate::default()).unwrap();

    let catalog = POFile::read_from(&po).unwrap();
    assert_eq!(catalog.entries.len(), 1);
    assert_eq!(
        find_entry(&catalog, "Hold shift to boost", None).and_then(live_translation),
        Some("Umschalt halten")
    );
}

#[test]
fn test_vendor_export_guard_leaves_file_unchanged() {
    let tmp = TempDir::new().unwrap();
    let vdf = tmp.path().join("lang/329130_loc_all.vdf");
    let po = tmp.path().join("lang/de/achievements.po");
    write(
        &vdf,
        r#""lang" { "english" { "Tokens" { "ACH_1_NAME" "First Blood" } } }"#,
    );
    let header = HeaderTemplate::default();

    assert!(vdf_to_po(&vdf, &po, &header).unwrap());
    translate(&po, "First Blood", "Erstes Blut");
    let before = fs::read(&po).unwrap();

    assert!(!vdf_to_po(&vdf, &po, &header).unwrap());
    assert_eq!(fs::read(&po).unwrap(), before);
}

#[test]
fn test_vendor_export_then_import() {
    let tmp = TempDir::new().unwrap();
    let vdf = tmp.path().join("lang/329130_loc_all.vdf");
    let de = tmp.path().join("lang/de/achievements.po");
    let ru = tmp.path().join("lang/ru/achievements.po");
    let out = tmp.path().join("downloads/achievements.vdf");
    write(
        &vdf,
        "\"lang\"\n{\n\t\"english\"\n\t{\n\t\t\"Tokens\"\n\t\t{\n\t\t\t\"ACH_1_NAME\"\t\t\"First Blood\"\n\t\t}\n\t}\n}\n",
    );
    let header = HeaderTemplate::default();

    vdf_to_po(&vdf, &de, &header).unwrap();
    vdf_to_po(&vdf, &ru, &header).unwrap();
    translate(&de, "First Blood", "Erstes Blut");
    translate(&ru, "First Blood", "Первая кровь");

    po_to_vdf(&out, &vdf, &[("de", &de), ("ru", &ru)]).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        concat!(
            "\"lang\"\n{\n",
            "\t\"german\"\n\t{\n\t\t\"Tokens\"\n\t\t{\n\t\t\t\"ACH_1_NAME\"\t\t\"Erstes Blut\"\n\t\t}\n\t}\n",
            "\t\"russian\"\n\t{\n\t\t\"Tokens\"\n\t\t{\n\t\t\t\"ACH_1_NAME\"\t\t\"Первая кровь\"\n\t\t}\n\t}\n",
            "}\n"
        )
    );
}

#[test]
fn test_replacement_writer() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("data/messages.lua");
    let po = tmp.path().join("lang/fr/messages.po");
    let out = tmp.path().join("data/lang/fr/messages.lua");
    write(&base, "local x = \"Fire\"\n");

    lua_to_po(&base, &po, &HeaderTemplate::default()).unwrap();
    assert!(!po_to_lua_replace(&out, &base, &po).unwrap());
    assert!(!out.exists());

    translate(&po, "Fire", "Feu");
    assert!(po_to_lua_replace(&out, &base, &po).unwrap());
    assert_eq!(fs::read_to_string(&out).unwrap(), "local x = \"Feu\"\n");
}

#[test]
fn test_table_writer_omits_passthrough_pairs() {
    let tmp = TempDir::new().unwrap();
    let po = tmp.path().join("lang/de/text.po");
    let out = tmp.path().join("data/lang/de/text.lua");
    write(
        &po,
        "msgid \"b\"\nmsgstr \"B\"\n\nmsgid \"a\"\nmsgstr \"a\"\n",
    );

    assert!(po_to_lua_table(&out, &[&po]).unwrap());
    assert_eq!(fs::read_to_string(&out).unwrap(), "{\"b\" = \"B\"}");
}

#[test]
fn test_table_writer_without_catalogs() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("data/lang/de/text.lua");
    let none: [&Path; 0] = [];

    assert!(!po_to_lua_table(&out, &none).unwrap());
    assert!(!out.exists());
}

#[test]
fn test_table_writer_escapes_quotes_and_newlines() {
    let tmp = TempDir::new().unwrap();
    let po = tmp.path().join("lang/de/text.po");
    let out = tmp.path().join("data/lang/de/text.lua");
    let mut catalog = new_catalog();
    let mut entry = new_entry("Say \"go\"");
    entry.msgstr = Some("Sag \"los\"\nJetzt".to_string());
    catalog.entries.push(entry);
    fs::create_dir_all(po.parent().unwrap()).unwrap();
    catalog.write_to(&po).unwrap();

    assert!(po_to_lua_table(&out, &[&po]).unwrap());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        r#"{"Say \"go\"" = "Sag \"los\"\nJetzt"}"#
    );

    let table = LuaTable::read_from(&out).unwrap();
    assert_eq!(table.get("Say \"go\""), Some("Sag \"los\"\nJetzt"));
}
