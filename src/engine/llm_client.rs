use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::engine::prompt_builder::response_schema;
use crate::ui::settings::ModelSettings;

const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key found in ${0} or $GEMINI_API_KEY")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("model returned no text")]
    EmptyReply,
}

/// Anything that can turn a transcript into one raw model reply.
pub trait ScriptModel: Send {
    fn generate(&self, system_instruction: &str, transcript: &str) -> Result<String, ModelError>;

    fn model_id(&self) -> &str;
}

/// Gemini `generateContent` over a blocking client.
pub struct GeminiClient {
    client: Client,
    settings: ModelSettings,
}

impl GeminiClient {
    pub fn new(settings: ModelSettings) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Read at call time so a key exported after startup is still picked up.
    fn api_key(&self) -> Result<String, ModelError> {
        [self.settings.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelError::MissingApiKey(self.settings.api_key_env.clone()))
    }
}

impl ScriptModel for GeminiClient {
    fn generate(&self, system_instruction: &str, transcript: &str) -> Result<String, ModelError> {
        let api_key = self.api_key()?;
        let request = build_request(system_instruction, transcript, self.settings.temperature);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ModelError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| ModelError::Http {
            status: status.as_u16(),
            message: format!("unreadable response body: {e}"),
        })?;

        reply_text(parsed)
    }

    fn model_id(&self) -> &str {
        &self.settings.model
    }
}

/// Logs timing and outcome of every call made through the inner model.
pub struct LoggingModel<M> {
    inner: M,
}

impl<M: ScriptModel> LoggingModel<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: ScriptModel> ScriptModel for LoggingModel<M> {
    fn generate(&self, system_instruction: &str, transcript: &str) -> Result<String, ModelError> {
        let start = Instant::now();
        let result = self.inner.generate(system_instruction, transcript);
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => tracing::info!(
                model = %self.inner.model_id(),
                duration_ms,
                transcript_chars = transcript.len(),
                reply_chars = text.len(),
                "Model call completed"
            ),
            Err(err) => tracing::error!(
                model = %self.inner.model_id(),
                duration_ms,
                error = %err,
                "Model call failed"
            ),
        }

        result
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

fn build_request(system_instruction: &str, transcript: &str, temperature: f32) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".into()),
            parts: vec![GeminiPart {
                text: transcript.to_string(),
            }],
        }],
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: system_instruction.to_string(),
            }],
        },
        generation_config: GeminiGenerationConfig {
            response_mime_type: "application/json".into(),
            response_schema: response_schema(),
            temperature,
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn reply_text(response: GeminiResponse) -> Result<String, ModelError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::EmptyReply);
    }
    Ok(text)
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_transcript_instruction_and_schema() {
        let request = build_request("Be a PM.", "PM: Hello", 0.8);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "PM: Hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Be a PM.");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"], response_schema());
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn reply_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"question\":"}, {"text": " \"Hi?\"}"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(reply_text(response).unwrap(), "{\"question\": \"Hi?\"}");
    }

    #[test]
    fn blocked_response_is_empty_reply() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(matches!(reply_text(response), Err(ModelError::EmptyReply)));

        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(reply_text(response), Err(ModelError::EmptyReply)));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = GeminiClient::new(ModelSettings {
            base_url: "https://example.test/v1beta/".into(),
            model: "gemini-test".into(),
            ..ModelSettings::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn missing_key_is_reported_before_any_request() {
        let client = GeminiClient::new(ModelSettings {
            api_key_env: "VIDEO_SCRIPT_PM_TEST_UNSET_KEY".into(),
            ..ModelSettings::default()
        })
        .unwrap();

        // Only meaningful when the fallback variable is unset too.
        if std::env::var(FALLBACK_API_KEY_ENV).is_err() {
            let err = client.generate("sys", "PM: hi").unwrap_err();
            assert!(matches!(err, ModelError::MissingApiKey(name) if name == "VIDEO_SCRIPT_PM_TEST_UNSET_KEY"));
        }
    }
}
