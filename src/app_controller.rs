use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::audio_assembler::{AudioAssembler, FfmpegAssembler};
use crate::errors::Stage;
use crate::file_utils::FileManager;
use crate::pdf_extractor::{PdfExtractor, TextExtractor};
use crate::pipeline::{Pipeline, PipelineResult};
use crate::providers::azure_speech::AzureSpeech;
use crate::providers::google_translate::GoogleTranslate;
use crate::providers::{SpeechClient, TranslationClient};
use crate::synthesis::{RateAdjustment, SpeechSynthesizer, VoiceId};
use crate::translation::ChunkTranslator;

// @module: Application controller for PDF-to-audio conversion

/// Main application controller
///
/// Owns the configuration and the external-service clients, and runs one
/// pipeline per input document. All runs share the clients but nothing else,
/// so documents could be processed concurrently by separate controllers.
pub struct Controller {
    // @field: App configuration
    config: Config,
    speech: Arc<dyn SpeechClient>,
    translator: Option<Arc<dyn TranslationClient>>,
    extractor: Arc<dyn TextExtractor>,
    assembler: Arc<dyn AudioAssembler>,
}

impl Controller {
    /// Create a controller with clients built from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let speech: Arc<dyn SpeechClient> = Arc::new(AzureSpeech::new(
            config.providers.speech.api_key.clone(),
            config.speech_endpoint(),
            config.providers.speech.timeout_secs,
        ));

        let translator: Option<Arc<dyn TranslationClient>> = if config.translate {
            info!(
                "Translation enabled, target language: {}",
                crate::language_utils::get_language_name(&config.target_language)
                    .unwrap_or(config.target_language.as_str())
            );
            Some(Arc::new(GoogleTranslate::new(
                config.providers.translation.endpoint.clone(),
                config.providers.translation.timeout_secs,
            )))
        } else {
            None
        };

        Ok(Self {
            config,
            speech,
            translator,
            extractor: Arc::new(PdfExtractor),
            assembler: Arc::new(FfmpegAssembler::default()),
        })
    }

    /// Create a controller with injected collaborators, for tests
    pub fn with_components(
        config: Config,
        speech: Arc<dyn SpeechClient>,
        translator: Option<Arc<dyn TranslationClient>>,
        extractor: Arc<dyn TextExtractor>,
        assembler: Arc<dyn AudioAssembler>,
    ) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            speech,
            translator,
            extractor,
            assembler,
        })
    }

    /// Convert a single PDF to an audio file in the configured output
    /// directory
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, &multi_progress, force_overwrite)
            .await
            .map(|_| ())
    }

    /// Run the conversion with progress reporting
    async fn run_with_progress(
        &self,
        input_file: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<Option<PipelineResult>> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {:?}",
                input_file
            ));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&self.config.output_dir)?;

        // The output path derives deterministically from the input filename
        let output_path =
            FileManager::generate_output_path(&input_file, &self.config.output_dir, "mp3");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(None);
        }

        info!(
            "Converting {:?} (voice={}, rate={}, chunk_size={})",
            input_file.file_name().unwrap_or_default(),
            self.config.voice,
            self.config.rate,
            self.config.chunk_size
        );

        let mut pipeline = self.build_pipeline()?;

        // One bar tracks whichever per-chunk stage is running; the chunk
        // count is only known after extraction, so the length is set lazily
        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("#>-"));

        let pb = progress_bar.clone();
        let result = pipeline
            .process(&input_file, &output_path, move |stage, completed, total| {
                if pb.length() != Some(total as u64) {
                    pb.set_length(total as u64);
                }
                pb.set_message(match stage {
                    Stage::Translation => "Translating",
                    Stage::Synthesis => "Synthesizing",
                    _ => "Processing",
                });
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                error!("Conversion failed in {} stage: {}", e.stage(), e);
                return Err(e.into());
            }
        };

        match &result.output_path {
            Some(path) => {
                let size_kib = FileManager::file_size(path) as f64 / 1024.0;
                info!(
                    "Success: {} ({:.2} KiB, {} chunks, {})",
                    path.display(),
                    size_kib,
                    result.chunk_count,
                    Self::format_duration(start_time.elapsed())
                );
            }
            None => {
                info!("Document contained no text; no audio was produced");
            }
        }

        Ok(Some(result))
    }

    /// Assemble a pipeline for one run
    fn build_pipeline(&self) -> Result<Pipeline> {
        let voice = VoiceId::new(self.config.voice.clone())?;
        let rate: RateAdjustment = self.config.rate.parse()?;

        let synthesizer = SpeechSynthesizer::new(Arc::clone(&self.speech), voice, rate);
        let translator = self
            .translator
            .as_ref()
            .map(|client| ChunkTranslator::new(Arc::clone(client), self.config.target_language.clone()));

        Ok(Pipeline::new(
            self.config.chunk_size,
            Arc::clone(&self.extractor),
            translator,
            synthesizer,
            Arc::clone(&self.assembler),
        ))
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, converting every PDF in a directory.
    /// Files whose output already exists are skipped unless forced.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let pdf_files = FileManager::find_files(&input_dir, "pdf")?;
        if pdf_files.is_empty() {
            return Err(anyhow::anyhow!(
                "No PDF files found in directory: {:?}",
                input_dir
            ));
        }

        let multi_progress = MultiProgress::new();

        let folder_pb = multi_progress.add(ProgressBar::new(pdf_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("#>-"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for pdf_file in pdf_files.iter() {
            let file_name = pdf_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            match self
                .run_with_progress(pdf_file.clone(), &multi_progress, force_overwrite)
                .await
            {
                Ok(Some(_)) => success_count += 1,
                Ok(None) => skip_count += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();
        info!(
            "Folder processing completed: {} converted, {} skipped, {} errors - Duration: {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(duration)
        );

        Ok(())
    }
}
