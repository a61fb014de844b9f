/*!
 * Chunk-by-chunk speech synthesis.
 *
 * The synthesizer walks the chunks strictly sequentially in index order,
 * issuing one synthesis call per chunk and writing one temporary audio
 * artifact per call. Sequential execution is deliberate: it bounds the load
 * on the external service and keeps temp-file usage predictable. The first
 * failure aborts the remaining chunks and surfaces the failing chunk index.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::chunker::Chunk;
use crate::errors::{ConfigurationError, SynthesisError};
use crate::providers::SpeechClient;

// @const: Signed-percentage rate pattern
static RATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]\d+)%$").unwrap());

/// Identifier selecting a specific synthetic narration voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceId(String);

impl VoiceId {
    /// Create a voice identifier; fails on an empty name
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::MissingVoice);
        }
        Ok(VoiceId(name))
    }

    /// The voice name as the service expects it
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Locale prefix of the voice name ("pt-BR-FranciscaNeural" -> "pt-BR")
    pub fn locale(&self) -> &str {
        let mut dashes = self.0.match_indices('-');
        match (dashes.next(), dashes.next()) {
            (Some(_), Some((second, _))) => &self.0[..second],
            _ => &self.0,
        }
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed percentage modifier applied to the baseline speaking rate
///
/// Valid values match `[+-]\d+%` and lie within -50% to +50%. The sign is
/// required, so "+0%" is valid but "0%" is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateAdjustment {
    percent: i32,
}

impl RateAdjustment {
    /// The adjustment in percent, within -50..=50
    pub fn percent(&self) -> i32 {
        self.percent
    }
}

impl FromStr for RateAdjustment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = RATE_REGEX
            .captures(s.trim())
            .ok_or_else(|| ConfigurationError::InvalidRate(s.to_string()))?;

        let percent: i32 = captures[1]
            .parse()
            .map_err(|_| ConfigurationError::InvalidRate(s.to_string()))?;

        if !(-50..=50).contains(&percent) {
            return Err(ConfigurationError::RateOutOfRange(percent));
        }

        Ok(RateAdjustment { percent })
    }
}

impl std::fmt::Display for RateAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}%", self.percent)
    }
}

/// A temporary audio file produced by synthesizing one chunk
///
/// The artifact belongs to the run's scratch directory and is deleted,
/// best-effort, once assembly consumed it or the pipeline failed.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Index of the chunk this artifact was synthesized from
    pub chunk_index: usize,
    /// Location of the audio file
    pub path: PathBuf,
}

/// One synthesis call of one chunk
struct SynthesisJob<'a> {
    chunk: &'a Chunk,
    artifact_path: PathBuf,
}

/// Sequential speech synthesizer over an ordered chunk sequence
pub struct SpeechSynthesizer {
    client: Arc<dyn SpeechClient>,
    voice: VoiceId,
    rate: RateAdjustment,
}

impl SpeechSynthesizer {
    /// Create a synthesizer bound to a voice and rate
    pub fn new(client: Arc<dyn SpeechClient>, voice: VoiceId, rate: RateAdjustment) -> Self {
        Self {
            client,
            voice,
            rate,
        }
    }

    /// Synthesize every chunk in index order, one artifact per chunk.
    ///
    /// Artifacts are written into `scratch_dir` under names that encode the
    /// chunk index. The returned artifacts are in chunk index order and map
    /// one-to-one onto the input chunks. Any failure aborts the remaining
    /// chunks; artifacts written so far stay in `scratch_dir` for the caller
    /// to clean up.
    ///
    /// `progress` is a side-channel observer called with (completed, total)
    /// after each chunk; it is not part of the control flow.
    pub async fn synthesize_chunks(
        &self,
        chunks: &[Chunk],
        scratch_dir: &Path,
        progress: impl Fn(usize, usize),
    ) -> Result<Vec<AudioArtifact>, SynthesisError> {
        let total = chunks.len();
        let mut artifacts = Vec::with_capacity(total);

        for (completed, chunk) in chunks.iter().enumerate() {
            let job = SynthesisJob {
                chunk,
                artifact_path: scratch_dir.join(format!("chunk_{:05}.mp3", chunk.index)),
            };

            artifacts.push(self.run_job(job).await?);
            progress(completed + 1, total);
        }

        Ok(artifacts)
    }

    /// Run one synthesis call and verify its artifact
    async fn run_job(&self, job: SynthesisJob<'_>) -> Result<AudioArtifact, SynthesisError> {
        let chunk_index = job.chunk.index;

        debug!(
            "Synthesizing chunk {} ({} chars) -> {:?}",
            chunk_index,
            job.chunk.char_len(),
            job.artifact_path
        );

        self.client
            .synthesize(&job.chunk.content, &self.voice, self.rate, &job.artifact_path)
            .await
            .map_err(|source| SynthesisError::Provider {
                chunk_index,
                source,
            })?;

        // A call that "succeeded" without producing audio is still a failure
        match fs::metadata(&job.artifact_path) {
            Ok(meta) if meta.len() == 0 => Err(SynthesisError::EmptyArtifact {
                chunk_index,
                path: job.artifact_path,
            }),
            Ok(_) => Ok(AudioArtifact {
                chunk_index,
                path: job.artifact_path,
            }),
            Err(_) => Err(SynthesisError::MissingArtifact {
                chunk_index,
                path: job.artifact_path,
            }),
        }
    }
}
