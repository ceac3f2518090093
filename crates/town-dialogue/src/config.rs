//! Dialogue backend configuration.
//!
//! Loaded from environment variables.  With no `DIALOGUE_BACKEND` set the
//! adapter runs offline and every request resolves to its fallback text.

use std::time::Duration;

use crate::{DialogueError, DialogueResult};

const DEFAULT_PROXY_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Supported dialogue backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendType {
    /// A proxy taking `{project_id, model, input}` and answering `{output}`.
    ReplicateProxy,
    /// `OpenAI`-compatible chat completions (`OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// No service; every request fails fast.
    Offline,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueConfig {
    pub backend_type: BackendType,
    /// Full endpoint for the proxy, base URL for `OpenAI`-compatible APIs.
    pub api_url:    String,
    pub api_key:    String,
    pub model:      String,
    pub project_id: String,
    /// Per-request deadline.
    pub timeout:    Duration,
}

impl DialogueConfig {
    pub fn offline() -> Self {
        Self {
            backend_type: BackendType::Offline,
            api_url:      String::new(),
            api_key:      String::new(),
            model:        String::new(),
            project_id:   String::new(),
            timeout:      Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `DIALOGUE_BACKEND` -- `replicate-proxy`, `openai` (also `deepseek`,
    ///   `ollama`), or `offline`; unset means offline
    /// - `DIALOGUE_API_URL` -- required for any online backend
    /// - `DIALOGUE_API_KEY` -- required for `openai`, optional for the proxy
    /// - `DIALOGUE_MODEL` -- required for `openai`; proxy default `openai/gpt-4o-mini`
    /// - `DIALOGUE_PROJECT_ID` -- required for the proxy
    /// - `DIALOGUE_TIMEOUT_MS` -- request deadline (default 15000)
    pub fn from_env() -> DialogueResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> DialogueResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| DialogueError::Config(format!("missing required env var {name}")))
        };

        let timeout_ms: u64 = lookup("DIALOGUE_TIMEOUT_MS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|e| DialogueError::Config(format!("invalid DIALOGUE_TIMEOUT_MS: {e}")))?;
        let timeout = Duration::from_millis(timeout_ms);

        let backend_type = match lookup("DIALOGUE_BACKEND") {
            None => return Ok(Self { timeout, ..Self::offline() }),
            Some(name) => parse_backend_type(&name)?,
        };

        match backend_type {
            BackendType::Offline => Ok(Self { timeout, ..Self::offline() }),
            BackendType::ReplicateProxy => Ok(Self {
                backend_type,
                api_url:    required("DIALOGUE_API_URL")?,
                api_key:    lookup("DIALOGUE_API_KEY").unwrap_or_default(),
                model:      lookup("DIALOGUE_MODEL")
                    .unwrap_or_else(|| DEFAULT_PROXY_MODEL.to_owned()),
                project_id: required("DIALOGUE_PROJECT_ID")?,
                timeout,
            }),
            BackendType::OpenAi => Ok(Self {
                backend_type,
                api_url:    required("DIALOGUE_API_URL")?,
                api_key:    required("DIALOGUE_API_KEY")?,
                model:      required("DIALOGUE_MODEL")?,
                project_id: String::new(),
                timeout,
            }),
        }
    }
}

fn parse_backend_type(name: &str) -> DialogueResult<BackendType> {
    match name.trim().to_lowercase().as_str() {
        "replicate" | "replicate-proxy" | "proxy" => Ok(BackendType::ReplicateProxy),
        "openai" | "deepseek" | "ollama" => Ok(BackendType::OpenAi),
        "offline" | "none" | "" => Ok(BackendType::Offline),
        other => Err(DialogueError::Config(format!("unknown DIALOGUE_BACKEND: {other}"))),
    }
}
