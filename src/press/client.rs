//! Text-generation client.
//!
//! `Generator` is the seam the edition pipeline talks to; `OpenAiClient`
//! implements it against OpenAI-compatible HTTP APIs. Chat models go to
//! `/chat/completions`, legacy completion models to `/completions`.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Errors raised while generating text.
#[derive(Debug, Error)]
pub enum PressError {
    #[error("no API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API returned no choices")]
    EmptyResponse,
}

/// One generation request. Equal prompts are interchangeable, which is what
/// makes them cacheable.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub temperature: f32,
}

impl Prompt {
    pub fn new(text: impl Into<String>, temperature: f32) -> Self {
        Prompt { text: text.into(), temperature }
    }
}

/// Default completion budget for legacy completion models.
pub const DEFAULT_MAX_TOKENS: u32 = 400;

/// Anything that turns a prompt into text.
pub trait Generator {
    fn generate(&mut self, prompt: &Prompt) -> Result<String, PressError>;
}

/// Request shape expected by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Chat,
    Completion,
}

impl ApiFormat {
    /// Legacy completion models are the davinci family and `*-instruct`.
    pub fn for_model(model: &str) -> ApiFormat {
        if model.starts_with("text-") || model.ends_with("-instruct") {
            ApiFormat::Completion
        } else {
            ApiFormat::Chat
        }
    }

    fn path(self) -> &'static str {
        match self {
            ApiFormat::Chat => "chat/completions",
            ApiFormat::Completion => "completions",
        }
    }
}

/// Blocking client for OpenAI-compatible APIs.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    format: ApiFormat,
    max_tokens: u32,
    request_delay: Duration,
}

impl OpenAiClient {
    /// Creates a client for `model` served under `api_base`.
    pub fn new(api_key: String, api_base: &str, model: String) -> Self {
        let format = ApiFormat::for_model(&model);
        let endpoint = format!("{}/{}", api_base.trim_end_matches('/'), format.path());
        OpenAiClient {
            client: Client::new(),
            api_key,
            endpoint,
            model,
            format,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_delay: Duration::ZERO,
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, PressError> {
        let api_key = config.api_key.clone().ok_or(PressError::MissingApiKey)?;
        Ok(OpenAiClient::new(api_key, &config.api_base, config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_request_delay(config.request_delay))
    }

    /// Completion budget for legacy completion models; chat requests leave
    /// the length to the model.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Waits this long before every request, to stay under rate limits when
    /// many prompts are sent back to back.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn format(&self) -> ApiFormat {
        self.format
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> RequestBody<'a> {
        match self.format {
            ApiFormat::Chat => RequestBody::Chat(ChatRequest {
                model: &self.model,
                messages: vec![Message { role: "user", content: prompt.text.as_str() }],
                temperature: prompt.temperature,
            }),
            ApiFormat::Completion => RequestBody::Completion(CompletionRequest {
                model: &self.model,
                prompt: prompt.text.as_str(),
                temperature: prompt.temperature,
                max_tokens: self.max_tokens,
            }),
        }
    }
}

impl Generator for OpenAiClient {
    fn generate(&mut self, prompt: &Prompt) -> Result<String, PressError> {
        if !self.request_delay.is_zero() {
            thread::sleep(self.request_delay);
        }
        debug!(model = %self.model, chars = prompt.text.len(), "sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(PressError::Api { status: status.as_u16(), body });
        }
        extract_content(self.format, &body)
    }
}

/// Pulls the first completion out of a response body: `choices[0].message.content`
/// for chat models, `choices[0].text` for legacy completion models.
pub fn extract_content(format: ApiFormat, body: &str) -> Result<String, PressError> {
    let content = match format {
        ApiFormat::Chat => {
            let parsed: ChatResponse = serde_json::from_str(body)?;
            parsed.choices.into_iter().next().map(|c| c.message.content)
        }
        ApiFormat::Completion => {
            let parsed: CompletionResponse = serde_json::from_str(body)?;
            parsed.choices.into_iter().next().map(|c| c.text)
        }
    };
    content.ok_or(PressError::EmptyResponse)
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestBody<'a> {
    Chat(ChatRequest<'a>),
    Completion(CompletionRequest<'a>),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}
