//! All localization file formats handled by langtool.
//!
//! The PO catalog is the translator-facing format; the others are the
//! game-side sources and outputs it is converted from and to.

pub mod lua;
pub mod po;
pub mod text;
pub mod vdf;

// Reexporting the formats for easier access
pub use lua::LuaTable;
pub use text::{StoreSection, StoreText, TextList};
pub use vdf::Vdf;
