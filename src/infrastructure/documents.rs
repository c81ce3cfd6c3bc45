//! 업로드 파일(CV/채용공고) 텍스트 추출.
//!
//! `.txt`/`.md`는 그대로 읽고, `.pdf`/`.docx`는 해당 라이브러리를 지연 로드한 뒤
//! 등록된 [`DocumentDecoder`]에 넘긴다.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::DocumentTextExtractor;
use crate::domain::errors::DocumentError;
use crate::infrastructure::assets::{DecoderLibraries, LoadedScript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// 확장자(대소문자 무시)로 형식을 고른다.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "txt" | "md" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }
}

/// 바이너리 문서를 텍스트로 바꾸는 외부 디코더.
/// `libraries`에는 디코딩 전에 로드한 스크립트가 순서대로 들어 있다.
#[async_trait]
pub trait DocumentDecoder: Send + Sync {
    async fn decode(
        &self,
        document: &[u8],
        libraries: &[Arc<LoadedScript>],
    ) -> anyhow::Result<String>;
}

pub struct FileTextExtractor {
    libraries: Arc<DecoderLibraries>,
    pdf: Option<Arc<dyn DocumentDecoder>>,
    docx: Option<Arc<dyn DocumentDecoder>>,
}

impl FileTextExtractor {
    pub fn new(libraries: Arc<DecoderLibraries>) -> Self {
        Self {
            libraries,
            pdf: None,
            docx: None,
        }
    }

    pub fn with_pdf_decoder(mut self, decoder: Arc<dyn DocumentDecoder>) -> Self {
        self.pdf = Some(decoder);
        self
    }

    pub fn with_docx_decoder(mut self, decoder: Arc<dyn DocumentDecoder>) -> Self {
        self.docx = Some(decoder);
        self
    }

    async fn decode_binary(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<String, DocumentError> {
        let decoder = match format {
            DocumentFormat::Pdf => self.pdf.as_ref(),
            DocumentFormat::Docx => self.docx.as_ref(),
            DocumentFormat::PlainText => None,
        }
        .ok_or_else(|| DocumentError::DecoderNotRegistered {
            path: path.display().to_string(),
            format: format.label(),
        })?;

        let libraries = match format {
            DocumentFormat::Pdf => {
                let runtime = self.libraries.load_pdf_js().await.map_err(|source| {
                    DocumentError::LibraryUnavailable {
                        library: "pdf.js",
                        source,
                    }
                })?;
                vec![Arc::clone(&runtime.library), Arc::clone(&runtime.worker)]
            }
            _ => {
                let mammoth = self.libraries.load_mammoth().await.map_err(|source| {
                    DocumentError::LibraryUnavailable {
                        library: "mammoth",
                        source,
                    }
                })?;
                vec![mammoth]
            }
        };

        let bytes = read_file(path).await?;
        decoder
            .decode(&bytes, &libraries)
            .await
            .map_err(|err| DocumentError::Decode {
                path: path.display().to_string(),
                reason: format!("{err:#}"),
            })
    }
}

#[async_trait]
impl DocumentTextExtractor for FileTextExtractor {
    async fn extract_text_from_file(&self, path: &Path) -> Result<String, DocumentError> {
        let Some(format) = DocumentFormat::from_path(path) else {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            return Err(DocumentError::UnsupportedFileType(name));
        };
        debug!(path = %path.display(), ?format, "extracting document text");

        match format {
            DocumentFormat::PlainText => {
                let bytes = read_file(path).await?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            DocumentFormat::Pdf | DocumentFormat::Docx => self.decode_binary(path, format).await,
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, DocumentError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::application::ports::{HttpReply, HttpRequest, HttpTransport, TransportError};
    use crate::infrastructure::assets::ScriptLoader;

    struct CountingTransport(AtomicUsize);

    #[async_trait]
    impl HttpTransport for CountingTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpReply, TransportError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(TransportError("offline".to_string()))
        }
    }

    fn extractor() -> (FileTextExtractor, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport(AtomicUsize::new(0)));
        let libraries = DecoderLibraries::new(ScriptLoader::new(transport.clone()));
        (FileTextExtractor::new(Arc::new(libraries)), transport)
    }

    struct EchoDecoder;

    #[async_trait]
    impl DocumentDecoder for EchoDecoder {
        async fn decode(
            &self,
            document: &[u8],
            _libraries: &[Arc<LoadedScript>],
        ) -> anyhow::Result<String> {
            Ok(String::from_utf8_lossy(document).into_owned())
        }
    }

    #[test]
    fn format_is_chosen_by_case_insensitive_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.TXT")),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.md")),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b/cv.Pdf")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("cv.doc")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), None);
    }

    #[tokio::test]
    async fn reads_plain_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, "Jane Doe\nRust engineer").unwrap();

        let (extractor, transport) = extractor();
        let text = extractor.extract_text_from_file(&path).await.unwrap();

        assert_eq!(text, "Jane Doe\nRust engineer");
        assert_eq!(transport.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_unsupported_types_by_file_name() {
        let (extractor, _) = extractor();
        let err = extractor
            .extract_text_from_file(Path::new("/tmp/photo.png"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file type: \"photo.png\". Please upload a .pdf, .docx, or .txt file."
        );
    }

    #[tokio::test]
    async fn missing_plain_text_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let (extractor, _) = extractor();
        let err = extractor
            .extract_text_from_file(&dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[tokio::test]
    async fn binary_formats_need_their_library_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let (extractor, transport) = extractor();
        let extractor = extractor.with_pdf_decoder(Arc::new(EchoDecoder));
        let err = extractor.extract_text_from_file(&path).await.unwrap_err();

        assert!(matches!(
            err,
            DocumentError::LibraryUnavailable {
                library: "pdf.js",
                ..
            }
        ));
        assert_eq!(transport.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unregistered_decoder_fails_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, b"PK").unwrap();

        let (extractor, transport) = extractor();
        let err = extractor.extract_text_from_file(&path).await.unwrap_err();

        assert!(matches!(
            err,
            DocumentError::DecoderNotRegistered { format: "DOCX", .. }
        ));
        let message = err.to_string();
        assert!(message.contains("no DOCX decoder is registered"), "{message}");
        assert!(message.contains("Convert the file to .txt or .md"), "{message}");
        assert_eq!(transport.0.load(Ordering::SeqCst), 0);
    }
}
