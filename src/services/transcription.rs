use serde::Deserialize;

use super::{map_transport_error, ServiceError};
use crate::config::Config;

/// The speech-to-text boundary: audio bytes in, raw transcript text out.
/// What happens to the audio on the other side is the remote service's
/// concern.
pub trait SpeechTranscriber {
    fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, ServiceError>;
}

/// Client for the speech proxy's `/api/transcribe` endpoint.
pub struct SpeechApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Response body from /api/transcribe
#[derive(Deserialize)]
struct TranscribeResponse {
    transcription: String,
}

impl SpeechApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Client pointed at the configured speech proxy, 2-minute timeout
    /// (uploads carry whole recordings).
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.speech_api_url, 120)
    }
}

impl SpeechTranscriber for SpeechApiClient {
    fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, ServiceError> {
        let url = format!("{}/api/transcribe", self.base_url);

        let part = reqwest::blocking::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| ServiceError::HttpClient(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("language", "fr");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| map_transport_error(&self.base_url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscribeResponse = response
            .json()
            .map_err(|e| ServiceError::ResponseParsing(e.to_string()))?;

        Ok(parsed.transcription.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = SpeechApiClient::new("http://localhost:8000/", 5);
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn response_deserializes() {
        let parsed: TranscribeResponse =
            serde_json::from_str(r#"{"transcription": "bonjour madame"}"#).unwrap();
        assert_eq!(parsed.transcription, "bonjour madame");
    }

    #[test]
    fn connection_error_against_unreachable_host() {
        // Reserved TEST-NET address — nothing listens there.
        let client = SpeechApiClient::new("http://192.0.2.1:1", 1);
        let result = client.transcribe(vec![0u8; 4], "note.wav");
        assert!(matches!(
            result,
            Err(ServiceError::Connection(_)) | Err(ServiceError::HttpClient(_))
        ));
    }
}
