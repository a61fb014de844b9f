/*!
 * Mock provider implementations for testing.
 *
 * The mock speech client writes the chunk text, prefixed with a marker, as
 * the "audio" bytes, so tests can check artifact content and ordering at the
 * byte level. Behaviors:
 * - `MockSpeechClient::working()` - every call succeeds
 * - `MockSpeechClient::failing_at(k)` - call k fails, earlier calls succeed
 * - `MockSpeechClient::empty_at(k)` - call k writes a zero-byte artifact
 * - `MockSpeechClient::silent_at(k)` - call k writes nothing at all
 */

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::{SpeechClient, TranslationClient};
use crate::synthesis::{RateAdjustment, VoiceId};

/// Marker prepended to mock audio bytes
pub const MOCK_AUDIO_PREFIX: &str = "AUDIO:";

/// Behavior mode for the mock speech client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSpeechBehavior {
    /// Every call succeeds and writes audio bytes
    Working,
    /// The call with this index fails with a provider error
    FailAt(usize),
    /// The call with this index writes a zero-byte artifact
    EmptyArtifactAt(usize),
    /// The call with this index reports success without writing anything
    SilentAt(usize),
}

/// Mock speech client for testing synthesis behavior
#[derive(Debug)]
pub struct MockSpeechClient {
    behavior: MockSpeechBehavior,
    /// Number of synthesize calls made
    call_count: AtomicUsize,
    /// Paths of every artifact this client was asked to write
    artifact_paths: Mutex<Vec<PathBuf>>,
}

impl MockSpeechClient {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockSpeechBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
            artifact_paths: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockSpeechBehavior::Working)
    }

    /// Mock whose call `index` fails
    pub fn failing_at(index: usize) -> Self {
        Self::new(MockSpeechBehavior::FailAt(index))
    }

    /// Mock whose call `index` writes an empty artifact
    pub fn empty_at(index: usize) -> Self {
        Self::new(MockSpeechBehavior::EmptyArtifactAt(index))
    }

    /// Mock whose call `index` writes no artifact
    pub fn silent_at(index: usize) -> Self {
        Self::new(MockSpeechBehavior::SilentAt(index))
    }

    /// Number of calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Paths of the artifacts requested so far, in call order
    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        self.artifact_paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechClient for MockSpeechClient {
    async fn synthesize(
        &self,
        text: &str,
        _voice: &VoiceId,
        _rate: RateAdjustment,
        output_path: &Path,
    ) -> Result<(), ProviderError> {
        let call_index = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.artifact_paths
            .lock()
            .unwrap()
            .push(output_path.to_path_buf());

        match self.behavior {
            MockSpeechBehavior::FailAt(index) if index == call_index => {
                return Err(ProviderError::RequestFailed(format!(
                    "Simulated failure on call {}",
                    call_index
                )));
            }
            MockSpeechBehavior::EmptyArtifactAt(index) if index == call_index => {
                std::fs::write(output_path, [])
                    .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
                return Ok(());
            }
            MockSpeechBehavior::SilentAt(index) if index == call_index => {
                return Ok(());
            }
            _ => {}
        }

        std::fs::write(output_path, format!("{}{}", MOCK_AUDIO_PREFIX, text))
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        Ok(())
    }
}

/// Behavior mode for the mock translation client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTranslationBehavior {
    /// Every call succeeds, tagging the text with the target language
    Working,
    /// The call with this index fails
    FailAt(usize),
}

/// Mock translation client for testing translation behavior
#[derive(Debug)]
pub struct MockTranslationClient {
    behavior: MockTranslationBehavior,
    call_count: AtomicUsize,
}

impl MockTranslationClient {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockTranslationBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockTranslationBehavior::Working)
    }

    /// Mock whose call `index` fails
    pub fn failing_at(index: usize) -> Self {
        Self::new(MockTranslationBehavior::FailAt(index))
    }

    /// Number of calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationClient for MockTranslationClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let call_index = self.call_count.fetch_add(1, Ordering::SeqCst);

        if let MockTranslationBehavior::FailAt(index) = self.behavior {
            if index == call_index {
                return Err(ProviderError::RequestFailed(format!(
                    "Simulated translation failure on call {}",
                    call_index
                )));
            }
        }

        Ok(format!("[{}] {}", target_language, text))
    }
}
