/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use anyhow::Result;
use papervoice::app_config::Config;
use papervoice::errors::ConfigurationError;

fn valid_config() -> Config {
    let mut config = Config::default();
    config.providers.speech.api_key = "test-key".to_string();
    config
}

/// Test that the default configuration matches the documented defaults
#[test]
fn test_defaultConfig_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.voice, "pt-BR-FranciscaNeural");
    assert_eq!(config.rate, "+5%");
    assert_eq!(config.chunk_size, 300);
    assert!(!config.translate);
    assert_eq!(config.target_language, "pt");
    assert_eq!(config.output_dir, PathBuf::from("audios"));
    assert_eq!(config.providers.speech.region, "brazilsouth");
}

/// Test that a complete configuration validates
#[test]
fn test_validate_withApiKey_shouldSucceed() {
    assert!(valid_config().validate().is_ok());
}

/// Test that a missing API key is rejected
#[test]
fn test_validate_withoutApiKey_shouldFail() {
    let config = Config::default();
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::MissingApiKey)
    ));
}

/// Test that a zero chunk size is rejected
#[test]
fn test_validate_withZeroChunkSize_shouldFail() {
    let mut config = valid_config();
    config.chunk_size = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::InvalidChunkSize)
    ));
}

/// Test that a malformed rate string is rejected
#[test]
fn test_validate_withMalformedRate_shouldFail() {
    let mut config = valid_config();
    config.rate = "fast".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::InvalidRate(_))
    ));
}

/// Test that an out-of-range rate is rejected
#[test]
fn test_validate_withOutOfRangeRate_shouldFail() {
    let mut config = valid_config();
    config.rate = "+75%".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::RateOutOfRange(75))
    ));
}

/// Test that an empty voice is rejected
#[test]
fn test_validate_withEmptyVoice_shouldFail() {
    let mut config = valid_config();
    config.voice = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::MissingVoice)
    ));
}

/// Test that the target language is only validated when translation is on
#[test]
fn test_validate_withBadLanguage_shouldFailOnlyWhenTranslating() {
    let mut config = valid_config();
    config.target_language = "zz".to_string();
    assert!(config.validate().is_ok());

    config.translate = true;
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::InvalidLanguage(_))
    ));
}

/// Test that an unset output directory is rejected
#[test]
fn test_validate_withEmptyOutputDir_shouldFail() {
    let mut config = valid_config();
    config.output_dir = PathBuf::new();
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::MissingOutputDir)
    ));
}

/// Test the region-derived speech endpoint
#[test]
fn test_speechEndpoint_withoutExplicitEndpoint_shouldDeriveFromRegion() {
    let config = valid_config();
    assert_eq!(
        config.speech_endpoint(),
        "https://brazilsouth.tts.speech.microsoft.com"
    );
}

/// Test that an explicit endpoint overrides the region
#[test]
fn test_speechEndpoint_withExplicitEndpoint_shouldUseIt() {
    let mut config = valid_config();
    config.providers.speech.endpoint = "https://example.invalid/tts".to_string();
    assert_eq!(config.speech_endpoint(), "https://example.invalid/tts");
}

/// Test that a partial JSON config is filled with defaults
#[test]
fn test_deserialize_withPartialJson_shouldApplyDefaults() -> Result<()> {
    let json = r#"{ "voice": "en-US-JennyNeural", "translate": true }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.voice, "en-US-JennyNeural");
    assert!(config.translate);
    assert_eq!(config.rate, "+5%");
    assert_eq!(config.chunk_size, 300);
    assert_eq!(
        config.providers.translation.endpoint,
        "https://translate.googleapis.com"
    );

    Ok(())
}

/// Test that the configuration round-trips through JSON
#[test]
fn test_serialize_thenDeserialize_shouldRoundTrip() -> Result<()> {
    let mut config = valid_config();
    config.translate = true;
    config.chunk_size = 500;

    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.voice, config.voice);
    assert_eq!(parsed.chunk_size, 500);
    assert!(parsed.translate);
    assert_eq!(parsed.providers.speech.api_key, "test-key");

    Ok(())
}
