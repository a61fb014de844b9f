/*!
 * Ordered concatenation of chunk artifacts into the final MP3.
 *
 * The default implementation shells out to ffmpeg's concat demuxer and
 * re-encodes the concatenated audio. The trait seam exists so tests can
 * substitute a byte-level concatenator and callers can plug in another codec
 * backend.
 */

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::process::Command;

use crate::errors::AssemblyError;
use crate::synthesis::AudioArtifact;

/// Assembles ordered chunk artifacts into one output audio file
#[async_trait]
pub trait AudioAssembler: Send + Sync {
    /// Concatenate `artifacts` in the given order into `output_path`,
    /// overwriting any existing file.
    ///
    /// Must fail if any artifact cannot be decoded, or if the output file is
    /// missing or zero-length after the write. The latter check exists
    /// because an encoder may silently no-op on failure.
    async fn assemble(
        &self,
        artifacts: &[AudioArtifact],
        output_path: &Path,
    ) -> Result<(), AssemblyError>;
}

/// ffmpeg-based assembler using the concat demuxer
pub struct FfmpegAssembler {
    timeout: Duration,
}

impl FfmpegAssembler {
    /// Create an assembler with the given encoder timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Trim ffmpeg stderr down to the lines worth reporting
    fn filter_stderr(stderr: &str) -> String {
        stderr
            .lines()
            .filter(|line| {
                let lower = line.to_lowercase();
                lower.contains("error") || lower.contains("invalid") || lower.contains("no such")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for FfmpegAssembler {
    fn default() -> Self {
        // Generous bound; re-encoding a long audiobook is slow but finite
        Self::new(Duration::from_secs(600))
    }
}

#[async_trait]
impl AudioAssembler for FfmpegAssembler {
    async fn assemble(
        &self,
        artifacts: &[AudioArtifact],
        output_path: &Path,
    ) -> Result<(), AssemblyError> {
        // Verify every artifact is readable and non-empty before invoking
        // the encoder, so a broken artifact is reported by path
        for artifact in artifacts {
            let meta = fs::metadata(&artifact.path).map_err(|e| AssemblyError::Decode {
                path: artifact.path.clone(),
                reason: e.to_string(),
            })?;
            if meta.len() == 0 {
                return Err(AssemblyError::Decode {
                    path: artifact.path.clone(),
                    reason: "artifact is empty".to_string(),
                });
            }
        }

        // The concat demuxer reads entries from a list file
        let mut list = String::new();
        for artifact in artifacts {
            let escaped = artifact.path.to_string_lossy().replace('\'', "'\\''");
            list.push_str(&format!("file '{}'\n", escaped));
        }

        let list_file = output_path.with_extension("concat.txt");
        fs::write(&list_file, &list)?;

        debug!(
            "Assembling {} artifact(s) into {:?}",
            artifacts.len(),
            output_path
        );

        let ffmpeg_future = Command::new("ffmpeg")
            .args([
                "-y", // Overwrite existing file
                "-f",
                "concat",
                "-safe",
                "0",
                "-i",
                list_file.to_str().unwrap_or_default(),
                "-vn",
                "-codec:a",
                "libmp3lame",
                "-q:a",
                "4",
                output_path.to_str().unwrap_or_default(),
            ])
            .output();

        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| AssemblyError::Encoder(format!("Failed to execute ffmpeg: {}", e)))
            },
            _ = tokio::time::sleep(self.timeout) => {
                Err(AssemblyError::Timeout(self.timeout.as_secs()))
            }
        };

        // The list file is scratch regardless of the outcome
        let _ = fs::remove_file(&list_file);
        let output = result?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_stderr(&stderr);
            error!("Audio assembly failed: {}", filtered);
            return Err(AssemblyError::Encoder(filtered));
        }

        // The encoder can exit zero without writing anything useful
        match fs::metadata(output_path) {
            Ok(meta) if meta.len() == 0 => Err(AssemblyError::EmptyOutput(output_path.to_path_buf())),
            Ok(_) => Ok(()),
            Err(_) => Err(AssemblyError::MissingOutput(output_path.to_path_buf())),
        }
    }
}
