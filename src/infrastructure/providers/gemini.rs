//! Google Gemini provider 어댑터.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::application::ports::{GenerationProvider, HttpRequest, HttpTransport};
use crate::domain::errors::GenerationError;
use crate::domain::generation::{AiResponse, GenerationRequest};
use crate::domain::options::ProviderKind;
use crate::domain::prompt::{generate_system_instruction, generate_user_prompt};
use crate::domain::schema::build_response_schema;
use crate::infrastructure::config::ProviderConfig;

use super::{dispatch, ensure_inputs, finish_response};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiProvider {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_endpoint(transport, DEFAULT_API_BASE, DEFAULT_MODEL)
    }

    pub fn with_endpoint(transport: Arc<dyn HttpTransport>, api_base: &str, model: &str) -> Self {
        Self {
            transport,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
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

    /// 생성 요청 본문을 만든다. API key는 헤더로만 전달한다.
    pub fn build_request(&self, request: &GenerationRequest) -> HttpRequest {
        let system_instruction =
            generate_system_instruction(request.workload, request.cover_letter_style);
        let user_prompt = generate_user_prompt(
            &request.cv_text,
            &request.job_spec_text,
            &request.keywords,
            &request.styles,
        );

        let payload = json!({
            "system_instruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": [
                { "parts": [{ "text": user_prompt }] }
            ],
            "generationConfig": {
                "temperature": 0.7,
                "topP": 0.95,
                "topK": 40,
                "responseMimeType": "application/json",
                "responseSchema": build_response_schema(request.workload),
            }
        });

        HttpRequest::post_json(&self.endpoint, payload).header("x-goog-api-key", &request.api_key)
    }
}

fn extract_gemini_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, GenerationError> {
        ensure_inputs(self.kind(), request)?;
        info!(workload = %request.workload, "requesting Gemini generation");

        let response = dispatch(&self.transport, self.kind(), self.build_request(request)).await?;
        finish_response(extract_gemini_text(&response), request.workload)
    }
}
