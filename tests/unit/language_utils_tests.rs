/*!
 * Tests for language code validation
 */

use papervoice::errors::ConfigurationError;
use papervoice::language_utils::{get_language_name, validate_language_code};

/// Test that 2-letter ISO codes validate
#[test]
fn test_validate_language_code_withIso639_1Code_shouldSucceed() {
    assert!(validate_language_code("pt").is_ok());
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("es").is_ok());
}

/// Test that 3-letter ISO codes validate
#[test]
fn test_validate_language_code_withIso639_3Code_shouldSucceed() {
    assert!(validate_language_code("por").is_ok());
    assert!(validate_language_code("eng").is_ok());
}

/// Test that a region suffix is accepted and ignored
#[test]
fn test_validate_language_code_withRegionSuffix_shouldSucceed() {
    assert!(validate_language_code("pt-br").is_ok());
    assert!(validate_language_code("pt-BR").is_ok());
    assert!(validate_language_code("en-US").is_ok());
}

/// Test that unknown or malformed codes are rejected
#[test]
fn test_validate_language_code_withInvalidCode_shouldFail() {
    for code in ["zz", "xyz12", "", "-br"] {
        assert!(
            matches!(
                validate_language_code(code),
                Err(ConfigurationError::InvalidLanguage(_))
            ),
            "code {:?} should be rejected",
            code
        );
    }
}

/// Test the language name lookup
#[test]
fn test_get_language_name_withKnownCodes_shouldReturnNames() {
    assert_eq!(get_language_name("pt"), Some("Portuguese"));
    assert_eq!(get_language_name("en-US"), Some("English"));
    assert_eq!(get_language_name("zz"), None);
}
