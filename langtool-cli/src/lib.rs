//! CLI library for testing purposes

pub mod config;
pub mod export;
pub mod import;
pub mod validation;
pub mod xgettext;

pub use config::Config;
pub use export::run_export_command;
pub use import::run_import_command;
