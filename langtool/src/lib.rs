#![forbid(unsafe_code)]
//! Localization pipeline for a game project.
//!
//! Moves translatable text between the game's own files and gettext PO
//! catalogs, so translators work in one format while the game reads another.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use langtool::export::{HeaderTemplate, lua_to_po};
//! use langtool::import::po_to_lua_replace;
//!
//! // Export: scan a data script into the German catalog
//! lua_to_po(
//!     Path::new("data/tips.lua"),
//!     Path::new("lang/de/tips.po"),
//!     &HeaderTemplate::default(),
//! )?;
//!
//! // Import: write the translated script back
//! po_to_lua_replace(
//!     Path::new("data/lang/de/tips.lua"),
//!     Path::new("data/tips.lua"),
//!     Path::new("lang/de/tips.po"),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Formats
//!
//! - **gettext `.po`**: the translator-facing catalog, read and written with `rspolib`
//! - **Lua data scripts**: quoted literals scanned and patched in place
//! - **Lua literal table**: the flat `{"source" = "translation"}` table the game loads
//! - **Steam `.vdf`**: KeyValues achievement text
//! - **Plain text**: one-per-line name lists and store page text

pub mod catalog;
pub mod error;
pub mod export;
pub mod formats;
pub mod import;
pub mod languages;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{error::Error, export::HeaderTemplate, traits::Parser};
pub use rspolib::{POEntry, POFile};
