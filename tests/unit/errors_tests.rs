/*!
 * Tests for stage error classification
 */

use std::path::PathBuf;

use papervoice::errors::{
    AssemblyError, ConfigurationError, ExtractionError, PipelineError, ProviderError, Stage,
    SynthesisError, TranslationError,
};

/// Test that every wrapped error reports its stage
#[test]
fn test_pipelineError_stage_shouldMatchWrappedError() {
    let e: PipelineError = ConfigurationError::InvalidChunkSize.into();
    assert_eq!(e.stage(), Stage::Configuration);

    let e: PipelineError = ExtractionError::Open {
        path: PathBuf::from("doc.pdf"),
        reason: "no such file".to_string(),
    }
    .into();
    assert_eq!(e.stage(), Stage::Extraction);

    let e: PipelineError =
        TranslationError::Provider(ProviderError::RequestFailed("boom".to_string())).into();
    assert_eq!(e.stage(), Stage::Translation);

    let e: PipelineError = SynthesisError::MissingArtifact {
        chunk_index: 3,
        path: PathBuf::from("chunk_00003.mp3"),
    }
    .into();
    assert_eq!(e.stage(), Stage::Synthesis);

    let e: PipelineError = AssemblyError::Encoder("ffmpeg exited".to_string()).into();
    assert_eq!(e.stage(), Stage::Assembly);
}

/// Test that synthesis errors expose the failing chunk index
#[test]
fn test_synthesisError_chunkIndex_shouldIdentifyFailingChunk() {
    let e = SynthesisError::Provider {
        chunk_index: 7,
        source: ProviderError::RequestFailed("boom".to_string()),
    };
    assert_eq!(e.chunk_index(), Some(7));

    let e = SynthesisError::EmptyArtifact {
        chunk_index: 2,
        path: PathBuf::from("chunk_00002.mp3"),
    };
    assert_eq!(e.chunk_index(), Some(2));

    let e = SynthesisError::Scratch(std::io::Error::other("mkdir failed"));
    assert_eq!(e.chunk_index(), None);
}

/// Test the stage names used in log output
#[test]
fn test_stage_display_shouldUseLowercaseNames() {
    assert_eq!(Stage::Extraction.to_string(), "extraction");
    assert_eq!(Stage::Synthesis.to_string(), "synthesis");
    assert_eq!(Stage::Assembly.to_string(), "assembly");
}

/// Test that error messages carry the chunk index for fast diagnosis
#[test]
fn test_synthesisError_display_shouldNameChunk() {
    let e = SynthesisError::Provider {
        chunk_index: 4,
        source: ProviderError::RateLimitExceeded("slow down".to_string()),
    };
    assert!(e.to_string().contains("chunk 4"));
}
