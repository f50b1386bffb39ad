//! OpenAI-compatible chat completion client.

use super::{ClassifierFailure, Completer};
use crate::config::AssistantSettings;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Blocking chat-completion client
#[derive(Debug, Clone)]
pub struct ChatCompleter {
    client: Client,
    endpoint: String,
    model: String,
    token: String,
    temperature: f32,
}

impl ChatCompleter {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierFailure> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ClassifierFailure::NotConfigured(
                "assistant endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierFailure::Service(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model: model.into(),
            token: token.into(),
            temperature: 0.7,
        })
    }

    pub fn from_settings(settings: &AssistantSettings) -> Result<Self, ClassifierFailure> {
        let token = settings.token().ok_or_else(|| {
            ClassifierFailure::NotConfigured(format!("{} is not set", settings.token_env))
        })?;
        let mut completer = Self::new(
            settings.endpoint.clone(),
            settings.model.clone(),
            token,
            settings.timeout(),
        )?;
        completer.temperature = settings.temperature;
        Ok(completer)
    }
}

impl Completer for ChatCompleter {
    fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ClassifierFailure> {
        info!("Requesting chat completion from model {}", self.model);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .map_err(|e| {
                warn!("Chat completion request failed: {}", e);
                ClassifierFailure::from_transport(&e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClassifierFailure::from_transport(&e))?;

        if !status.is_success() {
            warn!("Assistant returned HTTP {}", status.as_u16());
            return Err(ClassifierFailure::from_status(status.as_u16(), &body));
        }

        parse_response(&body)
    }
}

/// Extract the first choice's message content from a chat response body
pub fn parse_response(body: &str) -> Result<String, ClassifierFailure> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierFailure::Malformed(format!("unexpected response body: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ClassifierFailure::Malformed("response has no message content".to_string()))
}
