//! reqwest 기반 `HttpTransport` 구현.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::application::ports::{HttpMethod, HttpReply, HttpRequest, HttpTransport, TransportError};

/// 외부 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_http_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// 단일 시도 전송기. 재시도/캐시는 하지 않는다.
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(build_http_client())
    }
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError(describe(err)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| {
                TransportError(format!("failed to read response body: {}", describe(err)))
            })?;

        debug!(status, bytes = body.len(), "http response received");
        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

// reqwest 오류 문자열에는 요청 URL이 포함되므로 URL을 제거하고 노출한다.
fn describe(err: reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    format!("{kind}: {}", err.without_url())
}
