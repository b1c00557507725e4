//! Autofill provider abstraction
//!
//! Defines the [`Autofill`] trait, the [`AutofillError`] kinds, and the
//! [`AutofillClient`] factory for building a provider from config.

use std::future::Future;

use thiserror::Error;

use crate::config::{AutofillConfig, ProviderKind};
use crate::suggest::Row;

mod dummy;
mod openai;

pub use dummy::DummyClient;
pub use openai::OpenAiClient;

/// Errors that can occur while generating suggestions.
///
/// Every kind except [`AutofillError::Internal`] is a recoverable
/// "no usable suggestions this round" condition: quota exhaustion,
/// transient network trouble, unusable model output. `Internal` marks a
/// bug and is the only kind callers should surface as a failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AutofillError {
    /// Provider is disabled or missing required settings
    #[error("autofill not configured: {0}")]
    NotConfigured(String),

    /// Network failure reaching the provider
    #[error("network error: {0}")]
    Network(String),

    /// Provider returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Provider output contained no usable rows
    #[error("unusable provider output: {0}")]
    Parse(String),

    /// A bug, not an operating condition
    #[error("internal error: {0}")]
    Internal(String),
}

impl AutofillError {
    /// Whether this is an expected operating condition the caller
    /// should absorb, as opposed to a fault to surface.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AutofillError::Internal(_))
    }
}

/// A source of generated rows.
///
/// `base` is the row set to extend; implementations return up to
/// `count` new rows derived from it. Scripted implementations stand in
/// for a real provider in tests.
pub trait Autofill {
    /// Generate up to `count` rows extending `base`.
    fn autofill(
        &self,
        base: &[Row],
        count: usize,
    ) -> impl Future<Output = Result<Vec<Row>, AutofillError>> + Send;
}

/// Concrete provider implementations, selected by config.
#[derive(Debug, Clone)]
pub enum AutofillClient {
    /// OpenAI chat completions
    OpenAi(OpenAiClient),
    /// Offline spoofed rows, for demos and tests
    Dummy(DummyClient),
}

impl AutofillClient {
    /// Returns the display name of the provider
    pub fn provider_name(&self) -> &'static str {
        match self {
            AutofillClient::OpenAi(_) => "OpenAI",
            AutofillClient::Dummy(_) => "Dummy",
        }
    }

    /// Build a provider from the `[autofill]` config section.
    ///
    /// Returns an error if autofill is disabled or the selected
    /// provider is missing required settings.
    pub fn from_config(config: &AutofillConfig) -> Result<Self, AutofillError> {
        if !config.enabled {
            return Err(AutofillError::NotConfigured(
                "autofill is disabled; set 'enabled = true' in the [autofill] section".to_string(),
            ));
        }

        match config.provider {
            ProviderKind::OpenAi => {
                let api_key = config
                    .openai
                    .api_key
                    .as_ref()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        AutofillError::NotConfigured(
                            "missing api_key in the [autofill.openai] section".to_string(),
                        )
                    })?;

                let model = config
                    .openai
                    .model
                    .as_ref()
                    .filter(|m| !m.trim().is_empty())
                    .ok_or_else(|| {
                        AutofillError::NotConfigured(
                            "missing model in the [autofill.openai] section".to_string(),
                        )
                    })?;

                Ok(AutofillClient::OpenAi(OpenAiClient::new(
                    api_key.clone(),
                    model.clone(),
                    config.openai.max_tokens,
                )))
            }
            ProviderKind::Dummy => Ok(AutofillClient::Dummy(DummyClient::new())),
        }
    }
}

impl Autofill for AutofillClient {
    async fn autofill(&self, base: &[Row], count: usize) -> Result<Vec<Row>, AutofillError> {
        match self {
            AutofillClient::OpenAi(client) => client.autofill(base, count).await,
            AutofillClient::Dummy(client) => client.autofill(base, count).await,
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
