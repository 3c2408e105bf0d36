//! Runs `xgettext` over the C++ sources to produce `lang/<code>/text.po`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use langtool::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Exit code reported when the program cannot be started at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Expands the configured source patterns, relative to the project root.
///
/// Patterns are expanded in order; matches within one pattern are sorted.
/// A pattern that matches nothing is skipped with a warning.
pub fn collect_sources(config: &Config) -> Result<Vec<PathBuf>, Error> {
    let mut sources = Vec::new();
    for pattern in &config.xgettext.sources {
        let full = config.root.join(pattern);
        let full = full.to_string_lossy();
        let paths = glob::glob(&full)
            .map_err(|e| Error::config_error(format!("invalid source pattern `{}`: {}", pattern, e)))?;

        let mut matched: Vec<PathBuf> = paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .map(|p| p.strip_prefix(&config.root).map(Path::to_path_buf).unwrap_or(p))
            .collect();
        if matched.is_empty() {
            warn!(pattern = %pattern, "source pattern matched no files");
        }
        matched.sort();
        sources.extend(matched);
    }
    Ok(sources)
}

/// Arguments for one run writing `output`, both relative to the project root.
pub fn build_args(config: &Config, output: &Path, join_existing: bool, sources: &[PathBuf]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        format!("--keyword={}", config.xgettext.keyword).into(),
        {
            let mut arg = OsString::from("--output=");
            arg.push(output);
            arg
        },
        "--omit-header".into(),
        format!("--copyright-holder={}", config.copyright_holder).into(),
    ];
    if join_existing {
        args.push("--join-existing".into());
    }
    args.extend(sources.iter().map(|s| s.as_os_str().to_os_string()));
    args
}

/// Extracts the C++ strings for one language into `lang/<code>/text.po`.
///
/// The catalog is joined with its previous contents when it already exists.
/// Returns the path of the catalog.
pub fn run_xgettext(config: &Config, code: &str) -> Result<PathBuf, Error> {
    let relative_output = PathBuf::from("lang").join(code).join("text.po");
    let output = config.root.join(&relative_output);
    let join_existing = output.exists();
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let sources = collect_sources(config)?;
    let args = build_args(config, &relative_output, join_existing, &sources);
    let command_line = format!(
        "{} {}",
        config.xgettext.program,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );
    debug!(command = %command_line, "running xgettext");

    let status = Command::new(&config.xgettext.program)
        .args(&args)
        .current_dir(&config.root)
        .status()
        .map_err(|e| {
            warn!(program = %config.xgettext.program, error = %e, "failed to start xgettext");
            Error::ExternalTool {
                command: command_line.clone(),
                exit_code: SPAWN_FAILURE_EXIT_CODE,
            }
        })?;

    if !status.success() {
        return Err(Error::ExternalTool {
            command: command_line,
            exit_code: status.code().unwrap_or(1),
        });
    }

    info!(path = %output.display(), sources = sources.len(), "extracted C++ strings");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_at(root: &Path) -> Config {
        Config {
            root: root.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_build_args() {
        let config = Config::default();
        let sources = vec![PathBuf::from("game/a.cpp"), PathBuf::from("data/factions.lua")];
        let args = build_args(&config, Path::new("lang/de/text.po"), false, &sources);
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "--keyword=_",
                "--output=lang/de/text.po",
                "--omit-header",
                "--copyright-holder=2015 Arthur Danskin",
                "game/a.cpp",
                "data/factions.lua",
            ]
        );
    }

    #[test]
    fn test_build_args_join_existing() {
        let args = build_args(&Config::default(), Path::new("lang/fr/text.po"), true, &[]);
        assert_eq!(args.last().unwrap(), "--join-existing");
    }

    #[test]
    fn test_collect_sources_relative_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("game")).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("game/b.cpp"), "").unwrap();
        fs::write(dir.path().join("game/a.cpp"), "").unwrap();
        fs::write(dir.path().join("game/a.h"), "").unwrap();
        fs::write(dir.path().join("data/factions.lua"), "").unwrap();

        let sources = collect_sources(&config_at(dir.path())).unwrap();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("game/a.cpp"),
                PathBuf::from("game/b.cpp"),
                PathBuf::from("game/a.h"),
                PathBuf::from("data/factions.lua"),
            ]
        );
    }

    #[test]
    fn test_missing_program_reports_spawn_failure() {
        let dir = TempDir::new().unwrap();
        let mut config = config_at(dir.path());
        config.xgettext.program = "langtool-no-such-program".to_string();

        let err = run_xgettext(&config, "de").unwrap_err();
        assert_eq!(err.exit_code(), SPAWN_FAILURE_EXIT_CODE);
    }
}
