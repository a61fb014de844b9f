/*!
 * Chunk-wise translation service.
 *
 * Each chunk is translated by one external call, source language
 * auto-detected per call, and the output keeps the input's length and index
 * order. Any single call failure aborts the whole stage; there is no
 * partial-translation mode, because a half-translated document is a
 * correctness bug, not a degraded result.
 */

use std::sync::Arc;

use log::debug;

use crate::chunker::Chunk;
use crate::errors::TranslationError;
use crate::providers::TranslationClient;

/// Translation service over an ordered chunk sequence
pub struct ChunkTranslator {
    client: Arc<dyn TranslationClient>,
    target_language: String,
}

impl ChunkTranslator {
    /// Create a translator bound to a target language
    pub fn new(client: Arc<dyn TranslationClient>, target_language: impl Into<String>) -> Self {
        Self {
            client,
            target_language: target_language.into(),
        }
    }

    /// The configured target language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate every chunk, preserving count and index order.
    ///
    /// Calls run strictly sequentially; each translated chunk keeps the
    /// index of the chunk it came from. `progress` is called with
    /// (completed, total) after each chunk.
    pub async fn translate_chunks(
        &self,
        chunks: &[Chunk],
        progress: impl Fn(usize, usize),
    ) -> Result<Vec<Chunk>, TranslationError> {
        let total = chunks.len();
        let mut translated = Vec::with_capacity(total);

        for (completed, chunk) in chunks.iter().enumerate() {
            let content = self
                .client
                .translate(&chunk.content, &self.target_language)
                .await?;

            debug!(
                "Translated chunk {}: {} -> {} chars",
                chunk.index,
                chunk.char_len(),
                content.chars().count()
            );

            translated.push(Chunk::new(chunk.index, content));
            progress(completed + 1, total);
        }

        Ok(translated)
    }
}

/// Join translated chunks into one flat string with single-space separators.
///
/// The space separator can shift sentence boundaries relative to the
/// original chunk boundaries; that is accepted lossy behavior, kept for
/// parity with the chunked translation contract.
pub fn join_translated(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
