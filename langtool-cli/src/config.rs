//! Run configuration: what to export and import, and where things live.
//!
//! Read from `langtool.toml` at the project root (or `--config`); every field
//! is optional. Command-line flags are applied on top by `main`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use langtool::{Error, HeaderTemplate, languages::DEFAULT_LANGUAGES};
use serde::Deserialize;

/// File name looked up at the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "langtool.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project root all layout paths are relative to. Set from `--root`.
    #[serde(skip)]
    pub root: PathBuf,

    /// Language codes processed when none are given on the command line.
    pub languages: Vec<String>,

    /// Lua data scripts under `data/`, without extension.
    pub lua_files: Vec<String>,

    /// Plain list files under `lang/`, without extension.
    pub text_files: Vec<String>,

    /// Steam localization file, relative to the root.
    pub vendor_file: PathBuf,

    /// Where storefront outputs are written. Defaults to `~/Downloads`.
    pub downloads: Option<PathBuf>,

    /// Project name stamped into catalog headers.
    pub project_name: String,

    /// Copyright holder for catalog headers and `xgettext`.
    pub copyright_holder: String,

    pub xgettext: XgettextConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XgettextConfig {
    /// Program to run.
    pub program: String,

    /// Keyword marking translatable strings in C++ sources.
    pub keyword: String,

    /// Source files, as glob patterns relative to the root.
    pub sources: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let header = HeaderTemplate::default();
        Config {
            root: PathBuf::from("."),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            lua_files: ["tips", "popups", "messages", "tutorial"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            text_files: vec!["ships".to_string()],
            vendor_file: PathBuf::from("lang").join("329130_loc_all.vdf"),
            downloads: None,
            project_name: header.project,
            copyright_holder: header.copyright_holder,
            xgettext: XgettextConfig::default(),
        }
    }
}

impl Default for XgettextConfig {
    fn default() -> Self {
        XgettextConfig {
            program: "xgettext".to_string(),
            keyword: "_".to_string(),
            sources: ["game/*.cpp", "game/*.h", "core/*.cpp", "core/*.h", "data/factions.lua"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parses a configuration file.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::config_error(format!("{}: {}", path.display(), e)))
    }

    /// Loads the configuration for a project.
    ///
    /// An explicit path must exist. Otherwise `langtool.toml` at the root is
    /// used when present, and the defaults when it is not.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        let mut config = match explicit {
            Some(path) => Self::read_from_path(path)?,
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::read_from_path(candidate)?
                } else {
                    Config::default()
                }
            }
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    pub fn header_template(&self) -> HeaderTemplate {
        HeaderTemplate {
            project: self.project_name.clone(),
            copyright_holder: self.copyright_holder.clone(),
        }
    }

    /// `lang/<code>/` under the root: the catalogs of one language.
    pub fn catalog_dir(&self, code: &str) -> PathBuf {
        self.root.join("lang").join(code)
    }

    /// `data/lang/<code>/` under the root: the translated game files of one language.
    pub fn game_output_dir(&self, code: &str) -> PathBuf {
        self.root.join("data").join("lang").join(code)
    }

    pub fn lua_source(&self, name: &str) -> PathBuf {
        self.root.join("data").join(format!("{}.lua", name))
    }

    pub fn text_source(&self, name: &str) -> PathBuf {
        self.root.join("lang").join(format!("{}.txt", name))
    }

    pub fn vendor_source(&self) -> PathBuf {
        self.root.join(&self.vendor_file)
    }

    /// The configured downloads directory, or `Downloads` in the user's home.
    pub fn downloads_dir(&self) -> Result<PathBuf, Error> {
        if let Some(dir) = &self.downloads {
            return Ok(dir.clone());
        }
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join("Downloads"))
            .ok_or_else(|| {
                Error::config_error("cannot locate the home directory; pass --downloads")
            })
    }
}
