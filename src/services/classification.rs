use serde::{Deserialize, Serialize};

use super::{map_transport_error, ServiceError};
use crate::config::Config;

/// The classification boundary. Implementations receive ONLY the cleaned,
/// masked transcript — the raw text never crosses this seam, so redacted
/// PII cannot leak into a third-party model call.
pub trait TranscriptClassifier {
    fn classify(&self, cleaned_text: &str) -> Result<serde_json::Value, ServiceError>;
}

/// System message pinning the model to strict-JSON replies.
const SYSTEM_PROMPT: &str = "Tu es une API JSON qui retourne uniquement du JSON valide.";

/// User message framing: the taxonomy itself lives server-side with the
/// model; this client only asks for the structured analysis of one
/// transcript.
const CLASSIFY_PROMPT: &str =
    "Analyse la transcription client suivante et retourne la classification \
     JSON (intention, phase, produits, budget, emotion, timing, type_client, \
     intent_score, taxonomy_paths, tags). Sois déterministe : pour un même \
     texte, donne toujours la même réponse.\n\nTranscription : ";

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatApiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::blocking::Client,
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

/// Response body from /chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatApiClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.llm_api_url,
            &config.llm_model,
            config.api_key.clone(),
            60,
        )
    }
}

impl TranscriptClassifier for ChatApiClient {
    fn classify(&self, cleaned_text: &str) -> Result<serde_json::Value, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{CLASSIFY_PROMPT}{cleaned_text}"),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
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

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| ServiceError::ResponseParsing(e.to_string()))?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ServiceError::ResponseParsing("empty choices".to_string()))?;

        serde_json::from_str(content).map_err(|e| ServiceError::ResponseParsing(e.to_string()))
    }
}
