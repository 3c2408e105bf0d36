//! Language codes known to the game and their Steam names.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Languages exported and imported when no explicit list is given.
pub const DEFAULT_LANGUAGES: &[&str] = &["de", "fr", "ru", "nl", "pl", "sv", "ko", "ja", "zh"];

/// Steam language branch holding the source-of-truth achievement text.
pub const REFERENCE_VENDOR_LANGUAGE: &str = "english";

const VENDOR_LANGUAGES: &[(&str, &str)] = &[
    ("ru", "russian"),
    ("en", "english"),
    ("de", "german"),
    ("fr", "french"),
    ("pl", "polish"),
    ("sv", "swedish"),
    ("ko", "korean"),
    ("ja", "japanese"),
    ("zh", "chinese"),
];

/// Steam's name for a language code, if Steam text is produced for it.
pub fn vendor_language_name(code: &str) -> Option<&'static str> {
    VENDOR_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Like [`vendor_language_name`], but an unknown code is an error.
pub fn require_vendor_language_name(code: &str) -> Result<&'static str, Error> {
    vendor_language_name(code).ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
}

/// Validates a language code as a BCP 47 identifier.
///
/// Codes double as directory names under `lang/`, so path separators and
/// other non-identifier input are rejected here.
pub fn parse_language_code(code: &str) -> Result<LanguageIdentifier, Error> {
    if code.trim().is_empty() {
        return Err(Error::config_error("language code cannot be empty"));
    }
    code.parse::<LanguageIdentifier>().map_err(|_| {
        Error::config_error(format!(
            "invalid language code `{}`; expected a BCP 47 language identifier such as `de` or `pt-BR`",
            code
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_language_names() {
        assert_eq!(vendor_language_name("de"), Some("german"));
        assert_eq!(vendor_language_name("zh"), Some("chinese"));
        assert_eq!(vendor_language_name("en"), Some(REFERENCE_VENDOR_LANGUAGE));
        assert_eq!(vendor_language_name("nl"), None);
    }

    #[test]
    fn test_require_vendor_language_name_rejects_unknown() {
        let err = require_vendor_language_name("nl").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(code) if code == "nl"));
    }

    #[test]
    fn test_default_languages_are_valid_codes() {
        for code in DEFAULT_LANGUAGES {
            assert!(parse_language_code(code).is_ok(), "{} should parse", code);
        }
    }

    #[test]
    fn test_parse_language_code() {
        let lang = parse_language_code("pt-BR").unwrap();
        assert_eq!(lang.language.as_str(), "pt");
        assert!(parse_language_code("").is_err());
        assert!(parse_language_code("../etc").is_err());
        assert!(parse_language_code("de_DE!").is_err());
    }
}
