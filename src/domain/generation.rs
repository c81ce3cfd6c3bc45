//! 생성 요청/응답 엔티티.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::options::{ApiWorkload, CoverLetterStyle, ProviderKind, TailorStyle};

/// CV/채용공고 본문을 가져올 위치.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    File(PathBuf),
    Url(String),
}

/// 생성 실행 옵션. `None` 항목은 설정 기본값으로 채운다.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub cv: TextSource,
    pub job_spec: TextSource,
    pub provider: Option<ProviderKind>,
    pub keywords: String,
    pub styles: Option<Vec<TailorStyle>>,
    pub cover_letter_style: Option<CoverLetterStyle>,
    pub workload: Option<ApiWorkload>,
    /// 명시 키. 없으면 환경변수에서 해석한다.
    pub api_key: Option<String>,
}

impl RunOptions {
    pub fn new(cv: TextSource, job_spec: TextSource) -> Self {
        Self {
            cv,
            job_spec,
            provider: None,
            keywords: String::new(),
            styles: None,
            cover_letter_style: None,
            workload: None,
            api_key: None,
        }
    }
}

/// 한 번의 생성 결과와 실제 적용된 선택값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub provider: ProviderKind,
    pub workload: ApiWorkload,
    pub response: AiResponse,
}

/// 제공자 한 번 호출에 필요한 입력 묶음.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub api_key: String,
    pub cv_text: String,
    pub job_spec_text: String,
    pub keywords: String,
    pub styles: Vec<TailorStyle>,
    pub cover_letter_style: CoverLetterStyle,
    pub workload: ApiWorkload,
}

impl GenerationRequest {
    /// 선택값을 기본값(Precision / Middle / Normal)으로 채운 요청을 만든다.
    pub fn new(
        api_key: impl Into<String>,
        cv_text: impl Into<String>,
        job_spec_text: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            cv_text: cv_text.into(),
            job_spec_text: job_spec_text.into(),
            keywords: String::new(),
            styles: vec![TailorStyle::Precision],
            cover_letter_style: CoverLetterStyle::default(),
            workload: ApiWorkload::default(),
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_styles(mut self, styles: Vec<TailorStyle>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_cover_letter_style(mut self, style: CoverLetterStyle) -> Self {
        self.cover_letter_style = style;
        self
    }

    pub fn with_workload(mut self, workload: ApiWorkload) -> Self {
        self.workload = workload;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQna {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryUpdate {
    pub update: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// 모든 제공자가 돌려주는 단일 응답 계약.
/// 선택 섹션은 워크로드가 요구할 때 반드시 존재한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub match_percentage: u8,
    pub matching_highlights: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tailored_cv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_qna: Option<Vec<InterviewQna>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_updates: Option<Vec<IndustryUpdate>>,
}
