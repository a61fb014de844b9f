/*!
 * Client implementations for the external services the pipeline calls.
 *
 * This module contains the provider seams and their implementations:
 * - Azure Speech: cloud text-to-speech (REST v1)
 * - Google Translate: per-chunk machine translation
 * - Mock clients: deterministic behavior for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;
use crate::synthesis::{RateAdjustment, VoiceId};

/// Common trait for speech-synthesis service clients
///
/// One call synthesizes one text chunk and writes the resulting audio to
/// `output_path`. The pipeline is agnostic to the concrete provider.
#[async_trait]
pub trait SpeechClient: Send + Sync + Debug {
    /// Synthesize `text` with the given voice and rate, writing the audio
    /// bytes to `output_path`
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceId,
        rate: RateAdjustment,
        output_path: &Path,
    ) -> Result<(), ProviderError>;
}

/// Common trait for translation service clients
///
/// One call translates one text chunk; the source language is auto-detected
/// by the service on every call.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Translate `text` into `target_language`
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

pub mod azure_speech;
pub mod google_translate;
pub mod mock;
