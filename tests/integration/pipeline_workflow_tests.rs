/*!
 * End-to-end pipeline workflow tests
 *
 * These run the full orchestrator with mock providers and a byte-level
 * assembler, checking the state machine, chunk accounting, artifact
 * cleanup and output file handling.
 */

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use papervoice::audio_assembler::AudioAssembler;
use papervoice::errors::{PipelineError, Stage};
use papervoice::pdf_extractor::TextExtractor;
use papervoice::pipeline::{Pipeline, PipelineState};
use papervoice::providers::mock::{MockSpeechClient, MockTranslationClient, MOCK_AUDIO_PREFIX};
use papervoice::providers::{SpeechClient, TranslationClient};
use papervoice::synthesis::{RateAdjustment, SpeechSynthesizer, VoiceId};
use papervoice::translation::ChunkTranslator;

use crate::common;
use crate::common::mock_components::{
    ByteConcatAssembler, FailingExtractor, StaticExtractor,
};

struct TestHarness {
    speech: Arc<MockSpeechClient>,
    assembler: Arc<ByteConcatAssembler>,
    pipeline: Pipeline,
}

fn make_pipeline(
    text: &str,
    chunk_size: usize,
    speech: MockSpeechClient,
    translator: Option<ChunkTranslator>,
) -> TestHarness {
    let speech = Arc::new(speech);
    let assembler = Arc::new(ByteConcatAssembler::new());

    let voice = VoiceId::new("pt-BR-FranciscaNeural").unwrap();
    let rate: RateAdjustment = "+5%".parse().unwrap();
    let synthesizer =
        SpeechSynthesizer::new(Arc::clone(&speech) as Arc<dyn SpeechClient>, voice, rate);

    let extractor: Arc<dyn TextExtractor> = Arc::new(StaticExtractor::new(text));
    let pipeline = Pipeline::new(
        chunk_size,
        extractor,
        translator,
        synthesizer,
        Arc::clone(&assembler) as Arc<dyn AudioAssembler>,
    );

    TestHarness {
        speech,
        assembler,
        pipeline,
    }
}

/// Test the full conversion with chunking and byte-ordered assembly
#[tokio::test]
async fn test_process_withPlainText_shouldAssembleChunksInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("doc.mp3");

    // 650 chars split 300/300/50
    let text = format!("{}{}{}", "a".repeat(300), "b".repeat(300), "c".repeat(50));
    let mut harness = make_pipeline(&text, 300, MockSpeechClient::working(), None);

    let result = harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await?;

    assert_eq!(harness.pipeline.state(), PipelineState::Done);
    assert_eq!(result.chunk_count, 3);
    assert_eq!(result.char_count, 650);
    assert_eq!(result.output_path.as_deref(), Some(output_path.as_path()));
    assert_eq!(harness.speech.calls(), 3);
    assert_eq!(harness.assembler.assembled_indices(), vec![0, 1, 2]);

    // Output bytes are the chunk audio back to back, in chunk order
    let expected = format!(
        "{p}{a}{p}{b}{p}{c}",
        p = MOCK_AUDIO_PREFIX,
        a = "a".repeat(300),
        b = "b".repeat(300),
        c = "c".repeat(50)
    );
    assert_eq!(fs::read_to_string(&output_path)?, expected);

    Ok(())
}

/// Test that an empty document succeeds with nothing to do
#[tokio::test]
async fn test_process_withEmptyDocument_shouldFinishWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("empty.mp3");

    let mut harness = make_pipeline("", 300, MockSpeechClient::working(), None);

    let result = harness
        .pipeline
        .process("empty.pdf".as_ref(), &output_path, |_, _, _| {})
        .await?;

    assert_eq!(harness.pipeline.state(), PipelineState::Done);
    assert!(result.output_path.is_none());
    assert_eq!(result.chunk_count, 0);
    // No provider call was made and no file was written
    assert_eq!(harness.speech.calls(), 0);
    assert!(harness.assembler.assembled_indices().is_empty());
    assert!(!output_path.exists());

    Ok(())
}

/// Test that translation preserves chunk count into synthesis
#[tokio::test]
async fn test_process_withTranslation_shouldKeepChunkCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("translated.mp3");

    let translation_client = Arc::new(MockTranslationClient::working());
    let translator = ChunkTranslator::new(
        Arc::clone(&translation_client) as Arc<dyn TranslationClient>,
        "pt",
    );

    let text = "x".repeat(750);
    let mut harness = make_pipeline(&text, 300, MockSpeechClient::working(), Some(translator));

    let result = harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await?;

    // Chunk count entering synthesis equals count leaving translation
    assert_eq!(result.chunk_count, 3);
    assert_eq!(translation_client.calls(), 3);
    assert_eq!(harness.speech.calls(), 3);

    // The synthesized audio is the translated text, not the original
    let output = fs::read_to_string(&output_path)?;
    assert!(output.contains(&format!("{}[pt] ", MOCK_AUDIO_PREFIX)));

    Ok(())
}

/// Test that a synthesis failure aborts before assembly and cleans up
#[tokio::test]
async fn test_process_withSynthesisFailure_shouldAbortAndCleanScratch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("failing.mp3");

    let text = "y".repeat(900);
    let mut harness = make_pipeline(&text, 300, MockSpeechClient::failing_at(2), None);

    let err = harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await
        .unwrap_err();

    assert_eq!(harness.pipeline.state(), PipelineState::Failed(Stage::Synthesis));
    match &err {
        PipelineError::Synthesis(e) => assert_eq!(e.chunk_index(), Some(2)),
        other => panic!("expected a synthesis error, got {:?}", other),
    }

    // The assembler never ran and no output file appeared
    assert!(harness.assembler.assembled_indices().is_empty());
    assert!(!output_path.exists());

    // Artifacts written before the failure were deleted with the scratch dir
    for path in harness.speech.artifact_paths() {
        assert!(!path.exists(), "leftover artifact: {:?}", path);
    }

    Ok(())
}

/// Test that an assembly failure reports its stage and cleans up
#[tokio::test]
async fn test_process_withAssemblyFailure_shouldFailInAssemblyStage() -> Result<()> {
    use crate::common::mock_components::FailingAssembler;

    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("doc.mp3");

    let speech = Arc::new(MockSpeechClient::working());
    let voice = VoiceId::new("pt-BR-FranciscaNeural").unwrap();
    let rate: RateAdjustment = "+5%".parse().unwrap();
    let synthesizer =
        SpeechSynthesizer::new(Arc::clone(&speech) as Arc<dyn SpeechClient>, voice, rate);

    let mut pipeline = Pipeline::new(
        300,
        Arc::new(StaticExtractor::new("some document text")),
        None,
        synthesizer,
        Arc::new(FailingAssembler),
    );

    let err = pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await
        .unwrap_err();

    assert_eq!(pipeline.state(), PipelineState::Failed(Stage::Assembly));
    assert_eq!(err.stage(), Stage::Assembly);
    assert!(!output_path.exists());

    for path in speech.artifact_paths() {
        assert!(!path.exists(), "leftover artifact: {:?}", path);
    }

    Ok(())
}

/// Test that an extraction failure never reaches the providers
#[tokio::test]
async fn test_process_withExtractionFailure_shouldFailBeforeProviders() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("doc.mp3");

    let speech = Arc::new(MockSpeechClient::working());
    let voice = VoiceId::new("pt-BR-FranciscaNeural").unwrap();
    let rate: RateAdjustment = "+5%".parse().unwrap();
    let synthesizer =
        SpeechSynthesizer::new(Arc::clone(&speech) as Arc<dyn SpeechClient>, voice, rate);

    let mut pipeline = Pipeline::new(
        300,
        Arc::new(FailingExtractor),
        None,
        synthesizer,
        Arc::new(ByteConcatAssembler::new()),
    );

    let err = pipeline
        .process("broken.pdf".as_ref(), &output_path, |_, _, _| {})
        .await
        .unwrap_err();

    assert_eq!(pipeline.state(), PipelineState::Failed(Stage::Extraction));
    assert_eq!(err.stage(), Stage::Extraction);
    assert_eq!(speech.calls(), 0);

    Ok(())
}

/// Test that a second run overwrites the previous output
#[tokio::test]
async fn test_process_runTwice_shouldReplaceOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("doc.mp3");

    let mut harness = make_pipeline("short text", 300, MockSpeechClient::working(), None);
    harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await?;
    let first = fs::read(&output_path)?;

    // Corrupt the output between runs, a rerun must restore it
    fs::write(&output_path, b"stale bytes")?;

    let mut harness = make_pipeline("short text", 300, MockSpeechClient::working(), None);
    harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |_, _, _| {})
        .await?;
    let second = fs::read(&output_path)?;

    assert_eq!(first, second);

    Ok(())
}

/// Test that progress observes translation and synthesis stages
#[tokio::test]
async fn test_process_withProgressObserver_shouldReportStages() -> Result<()> {
    use std::sync::Mutex;

    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("doc.mp3");

    let translation_client = Arc::new(MockTranslationClient::working());
    let translator = ChunkTranslator::new(
        Arc::clone(&translation_client) as Arc<dyn TranslationClient>,
        "pt",
    );

    let text = "z".repeat(600);
    let mut harness = make_pipeline(&text, 300, MockSpeechClient::working(), Some(translator));

    let events = Mutex::new(Vec::new());
    harness
        .pipeline
        .process("doc.pdf".as_ref(), &output_path, |stage, done, total| {
            events.lock().unwrap().push((stage, done, total));
        })
        .await?;

    let events = events.into_inner().unwrap();
    assert_eq!(
        events,
        vec![
            (Stage::Translation, 1, 2),
            (Stage::Translation, 2, 2),
            (Stage::Synthesis, 1, 2),
            (Stage::Synthesis, 2, 2),
        ]
    );

    Ok(())
}
