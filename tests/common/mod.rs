//! 통합 테스트 공용 가짜 전송기.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use cvspruce::application::ports::{HttpReply, HttpRequest, HttpTransport, TransportError};

/// 보낸 요청을 기록하고, 준비한 응답을 순서대로 돌려준다.
/// 대기열 응답을 먼저 쓰고, 비면 기본 응답을 반복한다.
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    fallback: Result<HttpReply, TransportError>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback: Ok(HttpReply {
                status,
                body: body.into(),
            }),
        }
    }

    pub fn replying_json(status: u16, body: &Value) -> Self {
        Self::replying(status, body.to_string())
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback: Err(TransportError(reason.to_string())),
        }
    }

    pub fn queue_reply(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(HttpReply {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        self.requests.lock().unwrap().push(request);
        tokio::task::yield_now().await;
        let queued = self.replies.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}
