//! PDF/DOCX 디코더 라이브러리(pdf.js, mammoth) 고정 버전과 설치 상태.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::loader::{LoadedScript, ScriptLoader};
use crate::domain::errors::ScriptLoadError;

/// CDN 주소와 고정된 SRI 값.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptAsset {
    pub src: &'static str,
    pub integrity: &'static str,
}

pub const PDF_JS: ScriptAsset = ScriptAsset {
    src: "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.min.js",
    integrity: "sha384-/1qUCSGwTur9vjf/z9lmu/eCUYbpOTgSjmpbMQZ1/CtX2v/WcAIKqRv+U1DUCG6e",
};

pub const PDF_JS_WORKER: ScriptAsset = ScriptAsset {
    src: "https://cdnjs.cloudflare.com/ajax/libs/pdf.js/3.11.174/pdf.worker.min.js",
    integrity: "sha384-SnzOobpRMLXZ52iJvZm/C0fYw0OQemTXzTjIsdsfMcrCtCEe9qgzxTd3RSklO5x2",
};

pub const MAMMOTH: ScriptAsset = ScriptAsset {
    src: "https://cdnjs.cloudflare.com/ajax/libs/mammoth/1.6.0/mammoth.browser.min.js",
    integrity: "sha384-nFoSjZIoH3CCp8W639jJyQkuPHinJ2NHe7on1xvlUA7SuGfJAfvMldrsoAVm6ECz",
};

/// pdf.js 본체와, 본체에 연결된 워커 스크립트.
#[derive(Debug)]
pub struct PdfJsRuntime {
    pub library: Arc<LoadedScript>,
    pub worker: Arc<LoadedScript>,
}

impl PdfJsRuntime {
    /// `GlobalWorkerOptions.workerSrc`에 해당하는 워커 주소.
    pub fn worker_src(&self) -> &str {
        &self.worker.src
    }
}

/// 디코더 라이브러리 설치 상태. 설치된 뒤에는 다시 로드하지 않는다.
pub struct DecoderLibraries {
    loader: ScriptLoader,
    pdf_js: OnceCell<Arc<PdfJsRuntime>>,
    mammoth: OnceCell<Arc<LoadedScript>>,
}

impl DecoderLibraries {
    pub fn new(loader: ScriptLoader) -> Self {
        Self {
            loader,
            pdf_js: OnceCell::new(),
            mammoth: OnceCell::new(),
        }
    }

    /// pdf.js 본체 → 워커 순서로 로드하고 워커를 연결한다.
    /// 워커 로드 실패도 그대로 실패로 돌려준다.
    pub async fn load_pdf_js(&self) -> Result<Arc<PdfJsRuntime>, ScriptLoadError> {
        if let Some(runtime) = self.pdf_js.get() {
            debug!("pdf.js already installed");
            return Ok(Arc::clone(runtime));
        }

        self.pdf_js
            .get_or_try_init(|| async {
                let library = self.load(PDF_JS).await?;
                let worker = self.load(PDF_JS_WORKER).await?;
                Ok::<_, ScriptLoadError>(Arc::new(PdfJsRuntime { library, worker }))
            })
            .await
            .cloned()
    }

    pub async fn load_mammoth(&self) -> Result<Arc<LoadedScript>, ScriptLoadError> {
        self.mammoth
            .get_or_try_init(|| self.load(MAMMOTH))
            .await
            .cloned()
    }

    pub fn pdf_js_installed(&self) -> bool {
        self.pdf_js.initialized()
    }

    pub fn mammoth_installed(&self) -> bool {
        self.mammoth.initialized()
    }

    async fn load(&self, asset: ScriptAsset) -> Result<Arc<LoadedScript>, ScriptLoadError> {
        self.loader
            .load_script(asset.src, Some(asset.integrity))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::{HttpReply, HttpRequest, HttpTransport, TransportError};

    /// 요청 URL을 기록하고, 지정한 URL에는 404를 돌려준다.
    #[derive(Default)]
    struct RecordingCdn {
        requested: Mutex<Vec<String>>,
        missing: Option<&'static str>,
    }

    #[async_trait]
    impl HttpTransport for RecordingCdn {
        async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
            self.requested.lock().unwrap().push(request.url.clone());
            let status = if Some(request.url.as_str()) == self.missing {
                404
            } else {
                200
            };
            Ok(HttpReply {
                status,
                body: b"tampered".to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn pinned_integrity_rejects_unexpected_bodies() {
        let cdn = Arc::new(RecordingCdn::default());
        let libraries = DecoderLibraries::new(ScriptLoader::new(cdn.clone()));

        let err = libraries.load_mammoth().await.unwrap_err();
        assert_eq!(
            err,
            ScriptLoadError::IntegrityMismatch {
                src: MAMMOTH.src.to_string()
            }
        );
        assert!(!libraries.mammoth_installed());
        assert_eq!(*cdn.requested.lock().unwrap(), vec![MAMMOTH.src.to_string()]);
    }

    #[tokio::test]
    async fn pdf_js_failure_stops_before_the_worker() {
        let cdn = Arc::new(RecordingCdn {
            missing: Some(PDF_JS.src),
            ..Default::default()
        });
        let libraries = DecoderLibraries::new(ScriptLoader::new(cdn.clone()));

        let err = libraries.load_pdf_js().await.unwrap_err();
        assert!(matches!(err, ScriptLoadError::Fetch { ref src, .. } if src == PDF_JS.src));
        assert_eq!(*cdn.requested.lock().unwrap(), vec![PDF_JS.src.to_string()]);
        assert!(!libraries.pdf_js_installed());
    }

    #[tokio::test]
    async fn failed_pdf_js_install_is_retried_from_the_library() {
        let cdn = Arc::new(RecordingCdn::default());
        let libraries = DecoderLibraries::new(ScriptLoader::new(cdn.clone()));

        assert!(libraries.load_pdf_js().await.is_err());
        assert!(libraries.load_pdf_js().await.is_err());

        // 본체는 무결성 불일치로 실패하므로 매번 본체부터 다시 받는다.
        assert_eq!(
            *cdn.requested.lock().unwrap(),
            vec![PDF_JS.src.to_string(), PDF_JS.src.to_string()]
        );
        assert!(!libraries.pdf_js_installed());
    }

    #[test]
    fn assets_are_pinned_to_sha384() {
        for asset in [PDF_JS, PDF_JS_WORKER, MAMMOTH] {
            assert!(asset.src.starts_with("https://cdnjs.cloudflare.com/"));
            assert!(asset.integrity.starts_with("sha384-"));
        }
    }
}
