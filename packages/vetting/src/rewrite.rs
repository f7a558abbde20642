//! Advisory human-readable rewrite of the sanitized numbered list.
//!
//! Calls an OpenAI-compatible `/chat/completions` endpoint. The stage never
//! influences validation: a disabled rewriter, an empty or JSON-shaped
//! response, and any transport failure all degrade to a local bullet
//! reformat of the numbered text.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static NUMBERED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").unwrap());

const REWRITE_SYSTEM_PROMPT: &str = "You rewrite numbered lists of system limitations into \
plain, readable prose bullets. Keep every factual statement, keep the order, do not add or \
remove findings, and do not output JSON, headers, or commentary.";

/// Rewriter endpoint configuration.
///
/// Each field is resolved from the environment by [`RewriterConfig::from_env`]
/// with a documented fallback, so a typo'd variable name shows up as the
/// default rather than as silently missing.
#[derive(Debug, Clone)]
pub struct RewriterConfig {
    /// OpenAI-compatible base URL. Env `REWRITER_API_BASE`, default
    /// `http://127.0.0.1:8001/v1`.
    pub base_url: String,

    /// Bearer token. Env `REWRITER_API_KEY`, default `dummy-key` (local
    /// gateways ignore it).
    pub api_key: String,

    /// Model name. Env `REWRITER_MODEL`, default `gpt-4.1`.
    pub model: String,

    /// Whether to call the remote rewriter at all. Env `REWRITER_ENABLED`,
    /// default true; `0`, `false`, `False`, and empty disable it.
    pub enabled: bool,

    /// Request timeout in seconds. Env `REWRITER_TIMEOUT`, default 20.
    pub timeout_secs: f64,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001/v1".to_string(),
            api_key: "dummy-key".to_string(),
            model: "gpt-4.1".to_string(),
            enabled: true,
            timeout_secs: 20.0,
        }
    }
}

impl RewriterConfig {
    /// Resolve the configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            base_url: var("REWRITER_API_BASE").unwrap_or(defaults.base_url),
            api_key: var("REWRITER_API_KEY").unwrap_or(defaults.api_key),
            model: var("REWRITER_MODEL").unwrap_or(defaults.model),
            enabled: match std::env::var("REWRITER_ENABLED") {
                Ok(value) => !matches!(value.as_str(), "0" | "false" | "False" | ""),
                Err(_) => defaults.enabled,
            },
            timeout_secs: var("REWRITER_TIMEOUT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

/// Local fallback: `N. item` lines become `- item` bullets.
///
/// Text without any numbered lines comes back unchanged.
pub fn bullet_reformat(numbered_text: &str) -> String {
    let bullets: Vec<String> = numbered_text
        .lines()
        .filter_map(|line| {
            NUMBERED_PREFIX_RE
                .captures(line)
                .and_then(|captures| captures.get(1))
                .map(|body| format!("- {}", body.as_str().trim()))
        })
        .collect();

    if bullets.is_empty() {
        numbered_text.to_string()
    } else {
        bullets.join("\n")
    }
}

/// Rewrite the numbered text into plain prose via the configured endpoint.
///
/// Infallible by design: every failure path returns [`bullet_reformat`].
pub async fn rewrite_human_readable(config: &RewriterConfig, numbered_text: &str) -> String {
    if !config.enabled {
        return bullet_reformat(numbered_text);
    }

    match call_rewriter(config, numbered_text).await {
        Some(message) => message,
        None => bullet_reformat(numbered_text),
    }
}

async fn call_rewriter(config: &RewriterConfig, numbered_text: &str) -> Option<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs_f64(config.timeout_secs))
        .build()
        .ok()?;

    let payload = json!({
        "model": config.model,
        "messages": [
            {"role": "system", "content": REWRITE_SYSTEM_PROMPT},
            {"role": "user", "content": format!("Text to rewrite:\n{numbered_text}")},
        ],
        "temperature": 0.2,
        "max_tokens": 600,
    });

    let response = client
        .post(format!("{}/chat/completions", config.base_url.trim_end_matches('/')))
        .header("Authorization", format!("Bearer {}", config.api_key))
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;

    let body: Value = response.json().await.ok()?;
    let message = body["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string();

    if message.is_empty() {
        return None;
    }
    // A JSON-shaped reply means the model ignored the instruction.
    if message.starts_with('{') || message.starts_with('[') {
        debug!("Rewriter returned JSON-shaped content; using local reformat");
        return None;
    }
    Some(message)
}
