//! 구성요소별 오류 분류.
//! Display 문자열이 그대로 사용자에게 노출되는 메시지다.

use thiserror::Error;

/// 어떤 입력이 비어 있는지 구분한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Cv,
    JobSpec,
}

/// 파싱된 응답이 워크로드별 형태를 만족하지 못함.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The API response is missing required fields (Match, CV).")]
    MissingRequiredFields,
    #[error("The API response is missing the Cover Letter.")]
    MissingCoverLetter,
    #[error("The API response is missing Q&A or Industry Updates.")]
    MissingQnaOrUpdates,
}

/// 제공자 어댑터 호출 실패.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Please enter your {provider} API key.")]
    MissingCredential { provider: &'static str },

    #[error("{}", missing_input_message(.0))]
    MissingInput(InputKind),

    #[error("Invalid or unauthorised API key. Please check your {provider} API key.")]
    InvalidCredential { provider: &'static str },

    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error("{provider} API error ({status}): {body}")]
    ProviderError {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("The API returned an empty response. Please try again or check your inputs.")]
    EmptyResponse,

    #[error("The API response could not be parsed as JSON.")]
    UnparsableResponse,

    #[error(transparent)]
    IncompleteResponse(#[from] ValidationError),

    #[error("{provider}: request failed: {reason}")]
    Transport {
        provider: &'static str,
        reason: String,
    },
}

fn missing_input_message(kind: &InputKind) -> &'static str {
    match kind {
        InputKind::Cv => "No CV text found. Please upload your CV first.",
        InputKind::JobSpec => {
            "No job specification provided. Please add the job spec before generating."
        }
    }
}

/// 외부 URL 텍스트 추출 실패.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Please enter a valid URL.")]
    EmptyUrl,

    #[error("The URL you entered is not valid. Please check and try again.")]
    InvalidUrl,

    #[error("Invalid URL protocol: \"{0}\". Only HTTP and HTTPS are allowed.")]
    InvalidProtocol(String),

    #[error("Access to local network resources is not allowed.")]
    LocalAccessDenied,

    #[error(
        "Access to local network resources is not allowed (Detected private IP pattern in hostname)."
    )]
    EmbeddedPrivateAddress,

    #[error(
        "Could not fetch the URL. The page may be restricted or unavailable (status: {0})."
    )]
    FetchFailed(u16),

    #[error(
        "No readable text could be extracted from the URL. Try pasting the content directly instead."
    )]
    NoExtractableText,

    #[error("Could not fetch the URL: {0}")]
    Transport(String),
}

impl FetchError {
    /// 내부망 접근 차단 계열인지 여부.
    pub fn is_local_access_denied(&self) -> bool {
        matches!(self, Self::LocalAccessDenied | Self::EmbeddedPrivateAddress)
    }
}

/// 지연 로딩 스크립트 실패. 대기 중인 모든 호출자에게 복제되어 전달된다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptLoadError {
    #[error("Failed to load script {src}: {reason}")]
    Fetch { src: String, reason: String },

    #[error("Failed to load script {src}: integrity check failed")]
    IntegrityMismatch { src: String },

    #[error("Failed to load script {src}: unsupported integrity value \"{value}\"")]
    InvalidIntegrity { src: String, value: String },
}

/// 파일 텍스트 추출 실패.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type: \"{0}\". Please upload a .pdf, .docx, or .txt file.")]
    UnsupportedFileType(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{library} library not loaded: {source}")]
    LibraryUnavailable {
        library: &'static str,
        #[source]
        source: ScriptLoadError,
    },

    /// PDF/DOCX 디코딩은 라이브러리를 임베드한 쪽이 등록하는 외부 협력자다.
    #[error(
        "cannot read {path}: no {format} decoder is registered in this build. \
         Convert the file to .txt or .md, or register a DocumentDecoder when embedding cvspruce."
    )]
    DecoderNotRegistered { path: String, format: &'static str },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_provider() {
        let err = GenerationError::MissingCredential { provider: "Gemini" };
        assert_eq!(err.to_string(), "Please enter your Gemini API key.");

        let err = GenerationError::ProviderError {
            provider: "OpenAI",
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "OpenAI API error (500): boom");
    }

    #[test]
    fn missing_input_distinguishes_cv_and_job_spec() {
        let cv = GenerationError::MissingInput(InputKind::Cv).to_string();
        let spec = GenerationError::MissingInput(InputKind::JobSpec).to_string();
        assert!(cv.starts_with("No CV text found"));
        assert!(spec.starts_with("No job specification provided"));
    }

    #[test]
    fn incomplete_response_forwards_validation_message() {
        let err = GenerationError::from(ValidationError::MissingQnaOrUpdates);
        assert_eq!(
            err.to_string(),
            "The API response is missing Q&A or Industry Updates."
        );
    }
}
