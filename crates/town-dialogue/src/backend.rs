//! HTTP backends.
//!
//! Enum dispatch rather than a trait object: async methods are not
//! dyn-compatible.  Every backend takes a rendered [`Prompt`] plus the
//! request's [`GenerationParams`] and returns the raw generated text.

use crate::config::{BackendType, DialogueConfig};
use crate::{DialogueError, DialogueResult, GenerationParams, Prompt};

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

pub enum DialogueBackend {
    ReplicateProxy(ReplicateProxyBackend),
    OpenAi(OpenAiBackend),
    /// Fails every request with [`DialogueError::Offline`].
    Offline,
}

impl DialogueBackend {
    /// Send a prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses, and responses missing the
    /// text field all come back as a [`DialogueError`].
    pub async fn complete(
        &self,
        prompt: &Prompt,
        params: GenerationParams,
    ) -> DialogueResult<String> {
        match self {
            Self::ReplicateProxy(backend) => backend.complete(prompt, params).await,
            Self::OpenAi(backend) => backend.complete(prompt, params).await,
            Self::Offline => Err(DialogueError::Offline),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::ReplicateProxy(_) => "replicate-proxy",
            Self::OpenAi(_) => "openai-compatible",
            Self::Offline => "offline",
        }
    }
}

/// Build the backend selected by `config`.
pub fn create_backend(config: &DialogueConfig) -> DialogueBackend {
    match config.backend_type {
        BackendType::ReplicateProxy => DialogueBackend::ReplicateProxy(ReplicateProxyBackend::new(config)),
        BackendType::OpenAi => DialogueBackend::OpenAi(OpenAiBackend::new(config)),
        BackendType::Offline => DialogueBackend::Offline,
    }
}

// ---------------------------------------------------------------------------
// Replicate-style proxy
// ---------------------------------------------------------------------------

/// Posts `{project_id, model, input: {...}}` to `api_url` and reads `output`.
pub struct ReplicateProxyBackend {
    client:     reqwest::Client,
    api_url:    String,
    api_key:    String,
    model:      String,
    project_id: String,
}

impl ReplicateProxyBackend {
    pub fn new(config: &DialogueConfig) -> Self {
        Self {
            client:     reqwest::Client::new(),
            api_url:    config.api_url.clone(),
            api_key:    config.api_key.clone(),
            model:      config.model.clone(),
            project_id: config.project_id.clone(),
        }
    }

    async fn complete(&self, prompt: &Prompt, params: GenerationParams) -> DialogueResult<String> {
        let body = proxy_request_body(&self.project_id, &self.model, prompt, params);

        let mut request = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DialogueError::Http(format!("proxy request failed: {e}")))?;

        let json = read_json(response).await?;
        extract_proxy_output(&json)
    }
}

pub(crate) fn proxy_request_body(
    project_id: &str,
    model:      &str,
    prompt:     &Prompt,
    params:     GenerationParams,
) -> serde_json::Value {
    serde_json::json!({
        "project_id": project_id,
        "model": model,
        "input": {
            "prompt": prompt.user,
            "system_prompt": prompt.system,
            "max_completion_tokens": params.max_tokens,
            "temperature": params.temperature,
        }
    })
}

/// The proxy answers `{"output": "..."}`; some models stream the output as
/// an array of string chunks, which are concatenated.
pub(crate) fn extract_proxy_output(json: &serde_json::Value) -> DialogueResult<String> {
    match json.get("output") {
        Some(serde_json::Value::String(text)) => Ok(text.clone()),
        Some(serde_json::Value::Array(chunks)) => chunks
            .iter()
            .map(|c| c.as_str().map(ToOwned::to_owned))
            .collect::<Option<String>>()
            .ok_or_else(|| {
                DialogueError::MalformedResponse("proxy output array holds non-string chunks".to_owned())
            }),
        _ => Err(DialogueError::MalformedResponse(
            "proxy response missing output".to_owned(),
        )),
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client:  reqwest::Client,
    api_url: String,
    api_key: String,
    model:   String,
}

impl OpenAiBackend {
    pub fn new(config: &DialogueConfig) -> Self {
        Self {
            client:  reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model:   config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &Prompt, params: GenerationParams) -> DialogueResult<String> {
        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));
        let body = openai_request_body(&self.model, prompt, params);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DialogueError::Http(format!("OpenAI request failed: {e}")))?;

        let json = read_json(response).await?;
        extract_openai_content(&json)
    }
}

pub(crate) fn openai_request_body(
    model:  &str,
    prompt: &Prompt,
    params: GenerationParams,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {"role": "system", "content": prompt.system},
            {"role": "user", "content": prompt.user}
        ],
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
    })
}

pub(crate) fn extract_openai_content(json: &serde_json::Value) -> DialogueResult<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            DialogueError::MalformedResponse(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

async fn read_json(response: reqwest::Response) -> DialogueResult<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(DialogueError::Status { status: status.as_u16(), body });
    }

    response
        .json()
        .await
        .map_err(|e| DialogueError::MalformedResponse(format!("response parse failed: {e}")))
}
