// Configuration type definitions

use serde::Deserialize;

/// Default debounce delay in milliseconds
fn default_debounce_ms() -> u64 {
    1000
}

/// Default number of suggestions requested per refresh
fn default_num_suggestions() -> usize {
    5
}

/// Default max tokens for a completion (a handful of short rows)
fn default_max_tokens() -> u32 {
    256
}

/// Autofill provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Dummy,
}

/// OpenAI-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key (required when the openai provider is selected)
    pub api_key: Option<String>,
    /// Model to use (required - user must specify)
    pub model: Option<String>,
    /// Maximum tokens in a completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            model: None,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Autofill configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AutofillConfig {
    /// Whether autofill is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Which provider to use
    #[serde(default)]
    pub provider: ProviderKind,
    /// Debounce delay in milliseconds before row edits are evaluated
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How many suggestions to request per refresh
    #[serde(default = "default_num_suggestions")]
    pub num_suggestions: usize,
    /// OpenAI-specific configuration
    #[serde(default)]
    pub openai: OpenAiConfig,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        AutofillConfig {
            enabled: false,
            provider: ProviderKind::default(),
            debounce_ms: default_debounce_ms(),
            num_suggestions: default_num_suggestions(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub autofill: AutofillConfig,
}
