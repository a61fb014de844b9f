use isolang::Language;

use crate::errors::ConfigurationError;

/// Language utilities for ISO language code handling
///
/// The translation target language is configured as an ISO 639-1 (2-letter)
/// or ISO 639-3 (3-letter) code, optionally with a region suffix the way
/// translation services accept it (e.g. "pt-br"). Only the language part is
/// validated here; the region suffix is passed through to the service.
/// Validate a target language code
pub fn validate_language_code(code: &str) -> Result<(), ConfigurationError> {
    let normalized = code.trim().to_lowercase();

    // Strip an optional region suffix ("pt-br" -> "pt")
    let base = normalized.split('-').next().unwrap_or(&normalized);

    let valid = match base.len() {
        2 => Language::from_639_1(base).is_some(),
        3 => Language::from_639_3(base).is_some(),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidLanguage(code.to_string()))
    }
}

/// Get the English name of a language from its code, for log output
pub fn get_language_name(code: &str) -> Option<&'static str> {
    let normalized = code.trim().to_lowercase();
    let base = normalized.split('-').next().unwrap_or(&normalized);

    let language = match base.len() {
        2 => Language::from_639_1(base),
        3 => Language::from_639_3(base),
        _ => None,
    };

    language.map(|l| l.to_name())
}
