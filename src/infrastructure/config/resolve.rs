//! 설정 값(env 이름)을 실제 API key로 해석하는 유틸리티.
//!
//! - 환경변수 조회는 인프라 계층에서만 수행한다.

use std::env;

use crate::domain::options::ProviderKind;

use super::types::ProviderConfig;

/// Provider(API key) 해석 결과.
#[derive(Debug, Clone)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// provider별 기본 환경변수 이름.
pub fn default_api_key_env(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Gemini => "GEMINI_API_KEY",
        ProviderKind::Claude => "ANTHROPIC_API_KEY",
        ProviderKind::OpenAi => "OPENAI_API_KEY",
    }
}

/// `api_key_env`(없으면 기본 이름)에서 API key를 읽는다.
pub fn resolve_provider_api_key(
    kind: ProviderKind,
    cfg: Option<&ProviderConfig>,
) -> ProviderCredentialResolution {
    let env_name = cfg
        .and_then(|c| c.api_key_env.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default_api_key_env(kind));

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
