//! LLM 제공자 어댑터 공통 모듈.
//! 제공자별 차이는 요청 형식과 응답 텍스트 위치뿐이며,
//! 펜스 제거 → JSON 파싱 → 워크로드 검증 경로는 모두 여기서 공유한다.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::application::ports::{HttpRequest, HttpTransport};
use crate::domain::errors::{GenerationError, InputKind};
use crate::domain::generation::{AiResponse, GenerationRequest};
use crate::domain::options::{ApiWorkload, ProviderKind};
use crate::domain::validation::validate_ai_response;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const ERROR_BODY_LIMIT: usize = 500;

/// 네트워크 호출 전에 자격 증명과 입력을 확인한다.
pub(crate) fn ensure_inputs(
    kind: ProviderKind,
    request: &GenerationRequest,
) -> Result<(), GenerationError> {
    if request.api_key.trim().is_empty() {
        return Err(GenerationError::MissingCredential {
            provider: kind.name(),
        });
    }
    if request.cv_text.trim().is_empty() {
        return Err(GenerationError::MissingInput(InputKind::Cv));
    }
    if request.job_spec_text.trim().is_empty() {
        return Err(GenerationError::MissingInput(InputKind::JobSpec));
    }
    Ok(())
}

/// 요청을 한 번 전송하고 상태 코드를 오류 분류로 바꾼다.
/// 성공 시 응답 봉투(JSON)를 돌려주며, JSON이 아니면 추출할 텍스트가 없는 것으로 본다.
pub(crate) async fn dispatch(
    transport: &Arc<dyn HttpTransport>,
    kind: ProviderKind,
    request: HttpRequest,
) -> Result<Value, GenerationError> {
    debug!(provider = kind.id(), endpoint = %request.url, "dispatching generation request");
    let reply = transport
        .send(request)
        .await
        .map_err(|err| GenerationError::Transport {
            provider: kind.name(),
            reason: err.to_string(),
        })?;

    if !reply.is_success() {
        warn!(provider = kind.id(), status = reply.status, "provider returned an error status");
        return Err(classify_status(kind, reply.status, &reply.text()));
    }

    serde_json::from_slice(&reply.body).map_err(|_| GenerationError::EmptyResponse)
}

fn classify_status(kind: ProviderKind, status: u16, body: &str) -> GenerationError {
    match status {
        401 | 403 => GenerationError::InvalidCredential {
            provider: kind.name(),
        },
        429 => GenerationError::RateLimited,
        _ => GenerationError::ProviderError {
            provider: kind.name(),
            status,
            body: snippet(body),
        },
    }
}

fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "Unknown error".to_string();
    }
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// 추출한 텍스트를 펜스 제거 → 파싱 → 검증 순서로 마무리한다.
pub(crate) fn finish_response(
    text: Option<&str>,
    workload: ApiWorkload,
) -> Result<AiResponse, GenerationError> {
    let text = text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(GenerationError::EmptyResponse)?;

    let cleaned = strip_markdown_fences(text);
    let parsed: Value =
        serde_json::from_str(&cleaned).map_err(|_| GenerationError::UnparsableResponse)?;

    Ok(validate_ai_response(&parsed, workload)?)
}

/// ```json / ``` 펜스 표식을 위치와 무관하게 모두 제거한다.
/// 표식 뒤에 이어지는 공백도 함께 지운다.
pub fn strip_markdown_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        if rest
            .get(..4)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
        {
            rest = &rest[4..];
        }
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}
