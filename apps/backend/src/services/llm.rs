//! Client for an OpenAI-compatible chat completions endpoint.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use practice_core::tutor::{
    format_tutor_reply, parse_generated_question, question_request_messages, ChatMessage,
};
use practice_core::{Lesson, QuestionDraft};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .context("model returned no content")
    }
}

pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send a conversation and return the raw reply text.
    pub async fn chat(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        let url = self.completions_url();
        tracing::debug!("Sending {} messages to {}", messages.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature,
            })
            .send()
            .await
            .context("Failed to send chat request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("API error {}: {}", status, text);
        }

        let body: ChatResponse = response
            .json()
            .await
            .context("Failed to parse response JSON")?;
        body.into_content()
    }

    /// One tutor turn, post-processed for display.
    pub async fn tutor_reply(&self, messages: &[ChatMessage]) -> Result<String> {
        let reply = self.chat(messages, 0.4).await?;
        Ok(format_tutor_reply(&reply))
    }

    /// Ask the model for a new question in a lesson.
    pub async fn generate_question(
        &self,
        lesson: &Lesson,
        avoid_prompts: &[String],
    ) -> Result<QuestionDraft> {
        let messages = question_request_messages(lesson, avoid_prompts);
        let reply = self.chat(&messages, 0.9).await?;
        let draft = parse_generated_question(&reply)?;
        Ok(draft)
    }
}
