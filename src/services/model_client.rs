use crate::error::ExtractError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const BODY_PREVIEW_CHARS: usize = 400;

/// Text-in/text-out boundary to the generative model. No parsing.
pub trait ModelClient {
    fn complete(&self, prompt: &str) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub host: String,
    pub model: String,
    pub timeout: Duration,
}

/// Ollama-compatible endpoint. Tries `/api/generate`, then `/api/chat`.
pub struct OllamaClient {
    config: ModelConfig,
    http: Client,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatMessage>,
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl OllamaClient {
    pub fn new(config: ModelConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<Response, ExtractError> {
        self.http
            .post(self.endpoint(path))
            .json(&body)
            .send()
            .map_err(|source| {
                if source.is_timeout() {
                    ExtractError::Timeout {
                        host: self.config.host.clone(),
                        secs: self.config.timeout.as_secs(),
                    }
                } else {
                    ExtractError::Transport {
                        host: self.config.host.clone(),
                        source,
                    }
                }
            })
    }
}

impl ModelClient for OllamaClient {
    fn complete(&self, prompt: &str) -> Result<String, ExtractError> {
        let resp = self.post(
            "api/generate",
            json!({"model": self.config.model, "prompt": prompt, "stream": false}),
        )?;
        if resp.status() == StatusCode::OK {
            let data: GenerateResponse = resp.json().map_err(ExtractError::Response)?;
            return Ok(data.response);
        }
        log::debug!(
            "/api/generate answered {}; retrying with /api/chat",
            resp.status()
        );

        let resp = self.post(
            "api/chat",
            json!({
                "model": self.config.model,
                "messages": [{"role": "user", "content": prompt}],
                "stream": false
            }),
        )?;
        let status = resp.status();
        if status == StatusCode::OK {
            let data: ChatResponse = resp.json().map_err(ExtractError::Response)?;
            return Ok(match data.message {
                Some(m) if !m.content.is_empty() => m.content,
                _ => data.response,
            });
        }

        let body = resp.text().unwrap_or_else(|e| {
            log::debug!("cannot read /api/chat error body: {e}");
            format!("<error body unavailable: {e}>")
        });
        Err(classify_endpoint_error(status.as_u16(), &body, &self.config.model))
    }
}

pub fn classify_endpoint_error(status: u16, body: &str, model: &str) -> ExtractError {
    let hint = match status {
        404 => "404 from model API. Check that the endpoint is running on the expected host and serves /api/generate or /api/chat.".to_string(),
        500 if body.to_lowercase().contains("no such model") => format!(
            "Model '{model}' not found. Run `ollama pull {model}` first, or set OLLAMA_MODEL."
        ),
        _ => "Unexpected error from model endpoint.".to_string(),
    };
    ExtractError::Endpoint {
        status,
        body: body.chars().take(BODY_PREVIEW_CHARS).collect(),
        hint,
    }
}
