/*!
 * Pipeline orchestrator for PDF-to-audio conversion.
 *
 * The orchestrator sequences Extraction, optional Translation, chunking,
 * Synthesis, and Assembly as a small state machine:
 *
 * `Idle -> Extracting -> (Translating) -> Synthesizing -> Assembling -> Done`
 *
 * A `Failed(stage)` terminal state is reachable from every non-terminal
 * state. The run owns a scratch directory for chunk artifacts and releases
 * it on every exit path; cleanup problems are logged but never replace the
 * original error.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tempfile::TempDir;

use crate::audio_assembler::AudioAssembler;
use crate::chunker::{self, Chunk};
use crate::errors::{ExtractionError, PipelineError, Stage, SynthesisError};
use crate::pdf_extractor::TextExtractor;
use crate::synthesis::SpeechSynthesizer;
use crate::translation::{ChunkTranslator, join_translated};

/// States of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No run started yet
    Idle,
    /// Extracting text from the document
    Extracting,
    /// Translating chunks
    Translating,
    /// Synthesizing chunk audio
    Synthesizing,
    /// Concatenating chunk audio into the output file
    Assembling,
    /// Run finished successfully (possibly with nothing to do)
    Done,
    /// Run aborted in the given stage
    Failed(Stage),
}

/// Result of a successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Path of the written output file; `None` when the document had no text
    pub output_path: Option<PathBuf>,
    /// Number of chunks synthesized
    pub chunk_count: usize,
    /// Number of characters that entered synthesis
    pub char_count: usize,
    /// Total run duration
    pub duration: Duration,
}

impl PipelineResult {
    fn empty(duration: Duration) -> Self {
        Self {
            output_path: None,
            chunk_count: 0,
            char_count: 0,
            duration,
        }
    }
}

/// The PDF-to-audio conversion pipeline
///
/// Holds the stage collaborators and the chunk size; one instance runs one
/// document at a time. Every run is independent: temporary artifacts live in
/// a per-run scratch directory, so multiple pipelines may run concurrently.
pub struct Pipeline {
    chunk_size: usize,
    extractor: Arc<dyn TextExtractor>,
    translator: Option<ChunkTranslator>,
    synthesizer: SpeechSynthesizer,
    assembler: Arc<dyn AudioAssembler>,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline from its stage collaborators.
    ///
    /// Translation runs iff a translator is supplied. `chunk_size` must have
    /// been validated as positive by configuration before this point.
    pub fn new(
        chunk_size: usize,
        extractor: Arc<dyn TextExtractor>,
        translator: Option<ChunkTranslator>,
        synthesizer: SpeechSynthesizer,
        assembler: Arc<dyn AudioAssembler>,
    ) -> Self {
        Self {
            chunk_size,
            extractor,
            translator,
            synthesizer,
            assembler,
            state: PipelineState::Idle,
        }
    }

    /// Current state of the pipeline
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the full conversion for one document.
    ///
    /// On success the output file exists at `output_path` (overwriting a
    /// previous one), unless the document had no text, in which case the run
    /// reaches `Done` without touching the filesystem. On failure no output
    /// file from this run is left behind and all scratch artifacts are
    /// deleted best-effort.
    ///
    /// `progress` observes (stage, completed, total) per chunk for the
    /// translation and synthesis stages.
    pub async fn process(
        &mut self,
        input_pdf: &Path,
        output_path: &Path,
        progress: impl Fn(Stage, usize, usize) + Send + Sync,
    ) -> Result<PipelineResult, PipelineError> {
        let start = Instant::now();

        // Extraction
        self.state = PipelineState::Extracting;
        let text = match self.extract(input_pdf).await {
            Ok(text) => text,
            Err(e) => return Err(self.fail(e.into())),
        };
        info!("Extracted {} characters", text.chars().count());

        if text.is_empty() {
            // Degenerate success: nothing to synthesize, no output file
            info!("No text found in the document, nothing to do");
            self.state = PipelineState::Done;
            return Ok(PipelineResult::empty(start.elapsed()));
        }

        let mut chunks = chunker::split_into_chunks(&text, self.chunk_size);
        debug!("Split text into {} chunk(s) of up to {} chars", chunks.len(), self.chunk_size);

        // Optional translation, chunk count and order preserved
        if let Some(translator) = &self.translator {
            self.state = PipelineState::Translating;
            info!(
                "Translating {} chunk(s) to '{}'",
                chunks.len(),
                translator.target_language()
            );
            chunks = match translator
                .translate_chunks(&chunks, |done, total| {
                    progress(Stage::Translation, done, total)
                })
                .await
            {
                Ok(translated) => translated,
                Err(e) => return Err(self.fail(e.into())),
            };
            debug!(
                "Translated text is {} characters",
                join_translated(&chunks).chars().count()
            );
        }

        // Synthesis, one artifact per chunk in a per-run scratch directory
        self.state = PipelineState::Synthesizing;
        info!("Synthesizing {} chunk(s)", chunks.len());
        let scratch = match tempfile::Builder::new().prefix("papervoice-").tempdir() {
            Ok(dir) => dir,
            Err(e) => return Err(self.fail(SynthesisError::Scratch(e).into())),
        };

        let artifacts = match self
            .synthesizer
            .synthesize_chunks(&chunks, scratch.path(), |done, total| {
                progress(Stage::Synthesis, done, total)
            })
            .await
        {
            Ok(artifacts) => artifacts,
            Err(e) => {
                Self::release_scratch(scratch);
                return Err(self.fail(e.into()));
            }
        };

        // Assembly consumes the artifacts in chunk index order
        self.state = PipelineState::Assembling;
        let assembly = self.assembler.assemble(&artifacts, output_path).await;
        Self::release_scratch(scratch);
        if let Err(e) = assembly {
            return Err(self.fail(e.into()));
        }

        self.state = PipelineState::Done;
        let result = PipelineResult {
            output_path: Some(output_path.to_path_buf()),
            chunk_count: chunks.len(),
            char_count: chunks.iter().map(Chunk::char_len).sum(),
            duration: start.elapsed(),
        };
        info!(
            "Conversion finished: {} chunk(s) in {:.2}s",
            result.chunk_count,
            result.duration.as_secs_f32()
        );
        Ok(result)
    }

    /// Run extraction off the async runtime; PDF parsing is CPU-bound
    async fn extract(&self, input_pdf: &Path) -> Result<String, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        let path = input_pdf.to_path_buf();
        let task_path = path.clone();

        match tokio::task::spawn_blocking(move || extractor.extract_text(&task_path)).await {
            Ok(result) => result,
            Err(e) => Err(ExtractionError::Parse {
                path,
                reason: format!("extraction task aborted: {}", e),
            }),
        }
    }

    /// Delete the run's scratch directory, reporting but not propagating
    /// cleanup failures
    fn release_scratch(scratch: TempDir) {
        let path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!("Failed to clean up scratch directory {:?}: {}", path, e);
        }
    }

    /// Record the failure stage and hand the error back
    fn fail(&mut self, error: PipelineError) -> PipelineError {
        self.state = PipelineState::Failed(error.stage());
        error
    }
}
