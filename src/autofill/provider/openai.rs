//! OpenAI chat completions client
//!
//! Makes a single non-streaming call to the chat completions API per
//! generation request. The model is asked for a JSON array of new rows;
//! extraction is handled by the parser module.

use reqwest::Client;
use serde::Deserialize;

use crate::autofill::{parser, prompt};
use crate::suggest::Row;

use super::AutofillError;

/// OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Async OpenAI chat completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            max_tokens,
        }
    }

    /// Ask the model for `count` rows continuing the pattern of `base`.
    pub async fn autofill(&self, base: &[Row], count: usize) -> Result<Vec<Row>, AutofillError> {
        let request_body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 1.0,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM_MESSAGE },
                { "role": "user", "content": prompt::build_autofill_prompt(base, count) }
            ]
        });

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AutofillError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AutofillError::Api { code, message });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AutofillError::Parse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AutofillError::Parse("response contained no choices".to_string()))?;

        let rows = parser::parse_rows(&text, count);
        if rows.is_empty() {
            return Err(AutofillError::Parse(
                "no usable rows in model output".to_string(),
            ));
        }
        Ok(rows)
    }
}

/// Subset of the chat completions response we read.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}
