use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::providers::SpeechClient;
use crate::synthesis::{RateAdjustment, VoiceId};

/// MP3 output format requested from the service
const OUTPUT_FORMAT: &str = "audio-16khz-64kbitrate-mono-mp3";

/// Azure Cognitive Services Speech client (REST v1)
///
/// One request synthesizes one chunk: the request body is an SSML document
/// selecting the voice and prosody rate, the response body is the MP3 audio.
#[derive(Debug)]
pub struct AzureSpeech {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key for authentication
    api_key: String,
    /// Synthesis endpoint URL
    endpoint: String,
}

impl AzureSpeech {
    /// Create a new Azure Speech client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint for an Azure region, e.g. "brazilsouth"
    pub fn endpoint_for_region(region: &str) -> String {
        format!("https://{}.tts.speech.microsoft.com", region)
    }

    fn synthesis_url(&self) -> String {
        format!(
            "{}/cognitiveservices/v1",
            self.endpoint.trim_end_matches('/')
        )
    }
}

/// Build the SSML request body for one chunk
pub fn build_ssml(text: &str, voice: &VoiceId, rate: RateAdjustment) -> String {
    format!(
        "<speak version='1.0' xml:lang='{lang}'>\
         <voice name='{voice}'><prosody rate='{rate}'>{text}</prosody></voice>\
         </speak>",
        lang = voice.locale(),
        voice = voice.as_str(),
        rate = rate,
        text = escape_xml(text),
    )
}

/// Escape the characters XML treats specially in character data
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[async_trait]
impl SpeechClient for AzureSpeech {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceId,
        rate: RateAdjustment,
        output_path: &Path,
    ) -> Result<(), ProviderError> {
        let body = build_ssml(text, voice, rate);

        let response = self
            .client
            .post(self.synthesis_url())
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", "papervoice")
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Azure Speech API error ({}): {}", status, message);

            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(message),
                429 => ProviderError::RateLimitExceeded(message),
                code => ProviderError::ApiError {
                    status_code: code,
                    message,
                },
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        tokio::fs::write(output_path, &audio).await.map_err(|e| {
            ProviderError::RequestFailed(format!(
                "Failed to write artifact {:?}: {}",
                output_path, e
            ))
        })?;

        Ok(())
    }
}
