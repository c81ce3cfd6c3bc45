//! OpenAI provider 어댑터.

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

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TEMPERATURE: f64 = 0.7;

pub struct OpenAiProvider {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_endpoint(transport, DEFAULT_API_BASE, DEFAULT_MODEL)
    }

    pub fn with_endpoint(transport: Arc<dyn HttpTransport>, api_base: &str, model: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
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

    /// 전체 스키마 대신 JSON object 응답 플래그만 사용한다.
    pub fn build_request(&self, request: &GenerationRequest) -> HttpRequest {
        let system = generate_system_instruction(request.workload, request.cover_letter_style);
        let user_prompt = generate_user_prompt(
            &request.cv_text,
            &request.job_spec_text,
            &request.keywords,
            &request.styles,
        );

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user_prompt }
            ],
            "temperature": DEFAULT_TEMPERATURE,
            "response_format": { "type": "json_object" }
        });

        HttpRequest::post_json(&self.endpoint, payload)
            .header("authorization", format!("Bearer {}", request.api_key))
    }
}

fn extract_openai_text(response: &Value) -> Option<&str> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, GenerationError> {
        ensure_inputs(self.kind(), request)?;
        info!(workload = %request.workload, model = %self.model, "requesting OpenAI generation");

        let response = dispatch(&self.transport, self.kind(), self.build_request(request)).await?;
        finish_response(extract_openai_text(&response), request.workload)
    }
}
