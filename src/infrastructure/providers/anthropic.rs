//! Anthropic/Claude provider 어댑터.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::application::ports::{GenerationProvider, HttpRequest, HttpTransport};
use crate::domain::errors::GenerationError;
use crate::domain::generation::{AiResponse, GenerationRequest};
use crate::domain::options::ProviderKind;
use crate::domain::prompt::{generate_system_instruction, generate_user_prompt};
use crate::infrastructure::config::ProviderConfig;

use super::{dispatch, ensure_inputs, finish_response};

pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

// Claude에는 구조화 출력 스키마가 없으므로 지시문으로 한 번 더 막는다.
const RAW_JSON_ONLY: &str = "\n\nIMPORTANT: Output ONLY the raw JSON object. Do not include markdown formatting like ```json ... ``` or any other text.";

pub struct AnthropicProvider {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_endpoint(transport, DEFAULT_API_BASE, DEFAULT_MODEL)
    }

    pub fn with_endpoint(transport: Arc<dyn HttpTransport>, api_base: &str, model: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}/messages", api_base.trim_end_matches('/')),
            model: model.to_string(),
        }
    }

    /// 설정에서 엔드포인트/모델을 읽는다. 비활성화된 경우 None.
    pub fn from_config(
        provider: Option<&ProviderConfig>,
        transport: Arc<dyn HttpTransport>,
    ) -> Option<Self> {
        let provider = provider.cloned().unwrap_or_default();
        if !provider.is_enabled() {
            return None;
        }
        Some(Self::with_endpoint(
            transport,
            provider.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            provider.model.as_deref().unwrap_or(DEFAULT_MODEL),
        ))
    }

    pub fn build_request(&self, request: &GenerationRequest) -> HttpRequest {
        let mut system = generate_system_instruction(request.workload, request.cover_letter_style);
        system.push_str(RAW_JSON_ONLY);
        let user_prompt = generate_user_prompt(
            &request.cv_text,
            &request.job_spec_text,
            &request.keywords,
            &request.styles,
        );

        let payload = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": system,
            "messages": [
                { "role": "user", "content": user_prompt }
            ]
        });

        HttpRequest::post_json(&self.endpoint, payload)
            .header("x-api-key", &request.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("anthropic-dangerously-allow-browser", "true")
    }
}

fn extract_anthropic_text(response: &Value) -> Option<&str> {
    response.pointer("/content/0/text").and_then(Value::as_str)
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, GenerationError> {
        ensure_inputs(self.kind(), request)?;
        info!(workload = %request.workload, model = %self.model, "requesting Claude generation");

        let response = dispatch(&self.transport, self.kind(), self.build_request(request)).await?;
        finish_response(extract_anthropic_text(&response), request.workload)
    }
}
