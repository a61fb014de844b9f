/*!
 * # papervoice - PDF to narrated audio converter
 *
 * A Rust library for converting PDF documents into narrated MP3 audio.
 *
 * ## Features
 *
 * - Extract text from PDF documents page by page
 * - Optional machine translation before narration
 * - Chunked speech synthesis with a cloud neural voice
 * - Ordered assembly of chunk audio into a single MP3
 * - Configurable voice, speech rate and chunk size
 * - Folder mode for batch conversion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pdf_extractor`: PDF text extraction
 * - `chunker`: Fixed-width text chunking
 * - `translation`: Chunk-wise machine translation
 * - `synthesis`: Sequential per-chunk speech synthesis
 * - `audio_assembler`: Ordered concatenation into the output file
 * - `pipeline`: The staged conversion state machine
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for the external services:
 *   - `providers::azure_speech`: Azure Speech REST client
 *   - `providers::google_translate`: Google Translate client
 *   - `providers::mock`: Deterministic clients for tests
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod audio_assembler;
pub mod chunker;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pdf_extractor;
pub mod pipeline;
pub mod providers;
pub mod synthesis;
pub mod translation;

pub use app_config::Config;
pub use app_controller::Controller;
pub use chunker::{split_into_chunks, Chunk};
pub use errors::{PipelineError, Stage};
pub use pipeline::{Pipeline, PipelineResult, PipelineState};
pub use synthesis::{RateAdjustment, VoiceId};
