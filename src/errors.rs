/*!
 * Error types for the papervoice application.
 *
 * Each pipeline stage has its own error enum, defined with the thiserror
 * crate. `PipelineError` wraps them all and knows which stage it came from,
 * so callers always receive a stage name together with the underlying cause.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to an external service API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while extracting text from a PDF
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document could not be opened or read
    #[error("Failed to open PDF {path:?}: {reason}")]
    Open {
        /// Path of the document
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },

    /// The document could not be parsed as a PDF
    #[error("Failed to parse PDF {path:?}: {reason}")]
    Parse {
        /// Path of the document
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },
}

/// Errors that can occur during the optional translation stage
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the translation service
    #[error("Translation provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors that can occur during speech synthesis
///
/// Every variant carries the index of the chunk that failed; remaining
/// chunks are never attempted once one fails.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The synthesis call itself failed
    #[error("Synthesis call for chunk {chunk_index} failed: {source}")]
    Provider {
        /// Index of the failing chunk
        chunk_index: usize,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// The call reported success but no artifact was written
    #[error("Chunk {chunk_index} produced no artifact at {path:?}")]
    MissingArtifact {
        /// Index of the failing chunk
        chunk_index: usize,
        /// Expected artifact path
        path: PathBuf,
    },

    /// The call reported success but the artifact is zero bytes
    #[error("Chunk {chunk_index} produced an empty artifact at {path:?}")]
    EmptyArtifact {
        /// Index of the failing chunk
        chunk_index: usize,
        /// Artifact path
        path: PathBuf,
    },

    /// The per-run scratch directory could not be created
    #[error("Failed to create scratch directory: {0}")]
    Scratch(#[from] std::io::Error),
}

impl SynthesisError {
    /// Index of the chunk that caused the failure, if one chunk is to blame
    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            Self::Provider { chunk_index, .. }
            | Self::MissingArtifact { chunk_index, .. }
            | Self::EmptyArtifact { chunk_index, .. } => Some(*chunk_index),
            Self::Scratch(_) => None,
        }
    }
}

/// Errors that can occur while concatenating chunk audio into the output file
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// An artifact could not be read or decoded
    #[error("Failed to decode artifact {path:?}: {reason}")]
    Decode {
        /// Artifact path
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },

    /// The encoder process failed or could not be started
    #[error("Audio encoder failed: {0}")]
    Encoder(String),

    /// The encoder did not finish within the allotted time
    #[error("Audio encoder timed out after {0} seconds")]
    Timeout(u64),

    /// The output file is missing after the encoder reported success
    #[error("Output file was not created: {0:?}")]
    MissingOutput(PathBuf),

    /// The output file exists but is zero bytes
    #[error("Output file is empty: {0:?}")]
    EmptyOutput(PathBuf),

    /// A filesystem operation failed
    #[error("I/O error during assembly: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by configuration validation, before any stage runs
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The chunk size must be a positive number of characters
    #[error("Invalid chunk size: must be greater than zero")]
    InvalidChunkSize,

    /// The rate string does not match the expected pattern
    #[error("Invalid rate adjustment '{0}': expected a signed percentage like '+5%' or '-10%'")]
    InvalidRate(String),

    /// The rate is outside the supported range
    #[error("Rate adjustment {0:+}% is out of range: must be within -50% to +50%")]
    RateOutOfRange(i32),

    /// No narration voice was configured
    #[error("No narration voice configured")]
    MissingVoice,

    /// The target language code is not a valid ISO code
    #[error("Invalid target language code: {0}")]
    InvalidLanguage(String),

    /// The speech provider requires an API key
    #[error("Speech API key is required")]
    MissingApiKey,

    /// No output directory was configured
    #[error("No output directory configured")]
    MissingOutputDir,
}

/// Identifies the pipeline stage an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration validation, before the pipeline starts
    Configuration,
    /// PDF text extraction
    Extraction,
    /// Chunk translation
    Translation,
    /// Per-chunk speech synthesis
    Synthesis,
    /// Audio concatenation and output write
    Assembly,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Extraction => "extraction",
            Self::Translation => "translation",
            Self::Synthesis => "synthesis",
            Self::Assembly => "assembly",
        };
        write!(f, "{}", name)
    }
}

/// Pipeline error type that wraps all stage errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Configuration was rejected before any stage ran
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Extraction stage failed
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Translation stage failed
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// Synthesis stage failed
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Assembly stage failed
    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
}

impl PipelineError {
    /// The stage this error came from
    pub fn stage(&self) -> Stage {
        match self {
            Self::Configuration(_) => Stage::Configuration,
            Self::Extraction(_) => Stage::Extraction,
            Self::Translation(_) => Stage::Translation,
            Self::Synthesis(_) => Stage::Synthesis,
            Self::Assembly(_) => Stage::Assembly,
        }
    }
}
