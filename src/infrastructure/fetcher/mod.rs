//! 채용공고 URL 본문 추출기.
//! 검사를 통과한 URL만 공개 CORS 프록시를 거쳐 가져오고 평문으로 정리한다.

mod guard;
mod html;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info, warn};
use url::Url;

use crate::application::ports::{HttpRequest, HttpTransport, PageTextExtractor};
use crate::domain::errors::FetchError;
use crate::infrastructure::config::DEFAULT_PROXY_BASE_URL;

pub use guard::{is_private_ipv4, validate_target_url};
pub use html::html_to_text;

/// JavaScript `encodeURIComponent`와 같은 예약 문자 집합.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub struct UrlTextExtractor {
    transport: Arc<dyn HttpTransport>,
    proxy_base_url: String,
}

impl UrlTextExtractor {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_proxy(transport, DEFAULT_PROXY_BASE_URL)
    }

    pub fn with_proxy(transport: Arc<dyn HttpTransport>, proxy_base_url: impl Into<String>) -> Self {
        Self {
            transport,
            proxy_base_url: proxy_base_url.into(),
        }
    }

    /// 검사된 URL(정규화 형태)을 인코딩해 프록시 주소 뒤에 붙인다.
    pub fn proxy_url_for(&self, target: &Url) -> String {
        format!(
            "{}{}",
            self.proxy_base_url,
            utf8_percent_encode(target.as_str(), URI_COMPONENT)
        )
    }
}

#[async_trait]
impl PageTextExtractor for UrlTextExtractor {
    async fn extract_text_from_url(&self, url: &str) -> Result<String, FetchError> {
        let target = validate_target_url(url).inspect_err(|err| {
            warn!("rejected job spec url: {err}");
        })?;
        info!(host = target.host_str().unwrap_or_default(), "fetching job spec via proxy");

        let reply = self
            .transport
            .send(HttpRequest::get(self.proxy_url_for(&target)))
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        if !reply.is_success() {
            return Err(FetchError::FetchFailed(reply.status));
        }

        let text = html_to_text(&reply.text());
        debug!(chars = text.len(), "job spec text extracted");
        if text.is_empty() {
            return Err(FetchError::NoExtractableText);
        }
        Ok(text)
    }
}
