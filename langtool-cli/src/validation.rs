use std::path::Path;

use langtool::languages::parse_language_code;

/// Validate language code format using unic-langid (same as lib crate)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    parse_language_code(lang).map(|_| ()).map_err(|e| e.to_string())
}

/// Validate every requested language, reporting the first bad one
pub fn validate_languages(languages: &[String]) -> Result<(), String> {
    for lang in languages {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }
    Ok(())
}

/// Validate the project root exists and is a directory
pub fn validate_project_root(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Project root does not exist: {}", path.display()));
    }
    if !path.is_dir() {
        return Err(format!("Project root is not a directory: {}", path.display()));
    }
    Ok(())
}
