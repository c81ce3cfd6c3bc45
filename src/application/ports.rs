//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::{DocumentError, FetchError, GenerationError, ScriptLoadError};
use crate::domain::generation::{AiResponse, GenerationRequest};
use crate::domain::options::{ApiWorkload, ProviderKind};
use crate::infrastructure::config::Config;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 전송 계층에 넘기는 요청 기술자.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("content-type", "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// 헤더 값 조회(대소문자 무시).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 연결/TLS/타임아웃 등 HTTP 상태 코드 이전 단계의 실패.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// 모든 외부 HTTP 호출이 지나가는 전송 포트.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError>;
}

/// 개별 LLM 제공자 어댑터 포트.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;
    /// 요청 1회 = 외부 호출 1회. 재시도하지 않는다.
    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, GenerationError>;
}

/// 제공자 API key 해석 포트. 키는 환경변수에서만 읽는다.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, config: &Config, kind: ProviderKind) -> Option<String>;
}

/// 설정에 맞는 제공자 어댑터를 생성하는 팩토리 포트.
pub trait ProviderFactory: Send + Sync {
    fn build(&self, config: &Config, kind: ProviderKind) -> Result<Box<dyn GenerationProvider>>;
}

/// 채용공고 URL을 본문 텍스트로 바꾸는 포트.
#[async_trait]
pub trait PageTextExtractor: Send + Sync {
    async fn extract_text_from_url(&self, url: &str) -> Result<String, FetchError>;
}

/// 업로드 파일을 텍스트로 바꾸는 포트.
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract_text_from_file(&self, path: &Path) -> Result<String, DocumentError>;
}

/// PDF/DOCX 디코더 라이브러리를 미리 받아 두는 포트. 성공 시 받은 바이트 수.
#[async_trait]
pub trait DecoderPreloader: Send + Sync {
    async fn preload_pdf(&self) -> Result<usize, ScriptLoadError>;
    async fn preload_docx(&self) -> Result<usize, ScriptLoadError>;
}

/// 생성 결과 렌더링 포트.
pub trait ResponseRenderer: Send + Sync {
    fn render(&self, response: &AiResponse, provider: ProviderKind, workload: ApiWorkload)
    -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
}
