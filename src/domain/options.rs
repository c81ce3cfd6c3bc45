//! 생성 요청 선택지(스타일/워크로드/제공자) 값 객체.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CV 재작성 방향을 바꾸는 스타일. 여러 개를 동시에 선택할 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TailorStyle {
    Precision,
    Ruthless,
    Ambitious,
}

impl TailorStyle {
    pub const ALL: [TailorStyle; 3] = [Self::Precision, Self::Ruthless, Self::Ambitious];

    /// 프롬프트에 삽입되는 스타일 지시문.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Precision => {
                "Optimise the CV to precisely match the job specification keywords and required experience."
            }
            Self::Ruthless => {
                "Cut down on irrelevant details and keep the CV concise and impactful."
            }
            Self::Ambitious => {
                "Push the boundaries of the candidate's experience to highlight potential and transferrable skills."
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Precision => "Precision",
            Self::Ruthless => "Ruthless",
            Self::Ambitious => "Ambitious",
        }
    }
}

/// 커버레터 분량. 정확히 하나만 선택하며 Minimal 워크로드에서는 무시된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoverLetterStyle {
    Short,
    #[default]
    Middle,
    Long,
}

impl CoverLetterStyle {
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Short => "A quick, concise email introduction.",
            Self::Middle => "A standard formal cover letter.",
            Self::Long => "An expanded, detailed cover letter highlighting extensive alignment.",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Middle => "Middle",
            Self::Long => "Long",
        }
    }
}

/// 생성 결과 섹션의 폭. Normal > Reduced > Minimal 순으로 필드가 줄어든다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiWorkload {
    #[default]
    Normal,
    Reduced,
    Minimal,
}

impl ApiWorkload {
    pub const ALL: [ApiWorkload; 3] = [Self::Normal, Self::Reduced, Self::Minimal];

    /// 워크로드별 필수 필드 기술자.
    /// 스키마 생성기와 응답 검증기가 모두 이 값만 참조한다.
    pub const fn requirements(self) -> FieldRequirements {
        match self {
            Self::Normal => FieldRequirements {
                cover_letter: true,
                interview_qna: true,
                industry_updates: true,
            },
            Self::Reduced => FieldRequirements {
                cover_letter: true,
                interview_qna: false,
                industry_updates: false,
            },
            Self::Minimal => FieldRequirements {
                cover_letter: false,
                interview_qna: false,
                industry_updates: false,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Reduced => "Reduced",
            Self::Minimal => "Minimal",
        }
    }
}

pub const BASE_REQUIRED_FIELDS: [&str; 4] = [
    "match_percentage",
    "matching_highlights",
    "missing_skills",
    "tailored_cv",
];

/// 기본 4개 필드 외에 어떤 선택 섹션이 필수인지 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirements {
    pub cover_letter: bool,
    pub interview_qna: bool,
    pub industry_updates: bool,
}

impl FieldRequirements {
    /// 필수 필드 이름 목록(스키마 `required`와 동일 순서).
    pub fn required_fields(&self) -> Vec<&'static str> {
        let mut fields = BASE_REQUIRED_FIELDS.to_vec();
        if self.cover_letter {
            fields.push("cover_letter");
        }
        if self.interview_qna {
            fields.push("interview_qna");
        }
        if self.industry_updates {
            fields.push("industry_updates");
        }
        fields
    }
}

/// 지원하는 LLM 제공자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Claude,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::Gemini, Self::Claude, Self::OpenAi];

    /// 설정/CLI에서 쓰는 식별자.
    pub fn id(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Claude => "claude",
            Self::OpenAi => "openai",
        }
    }

    /// 오류 메시지에 들어가는 짧은 이름.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
            Self::OpenAi => "OpenAI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini 2.5",
            Self::Claude => "Claude 3.5",
            Self::OpenAi => "GPT-4o",
        }
    }

    pub fn full_label(self) -> &'static str {
        match self {
            Self::Gemini => "Powered by Gemini 2.5 Flash",
            Self::Claude => "Powered by Claude 3.5 Sonnet",
            Self::OpenAi => "Powered by GPT-4o",
        }
    }

    pub fn provider_name(self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::Claude => "Anthropic Claude",
            Self::OpenAi => "OpenAI",
        }
    }
}

/// 알 수 없는 선택지 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: \"{value}\" (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

impl FromStr for TailorStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "precision" => Ok(Self::Precision),
            "ruthless" => Ok(Self::Ruthless),
            "ambitious" => Ok(Self::Ambitious),
            _ => Err(ParseOptionError::new(
                "tailor style",
                s,
                "precision, ruthless, ambitious",
            )),
        }
    }
}

impl FromStr for CoverLetterStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "middle" => Ok(Self::Middle),
            "long" => Ok(Self::Long),
            _ => Err(ParseOptionError::new(
                "cover letter style",
                s,
                "short, middle, long",
            )),
        }
    }
}

impl FromStr for ApiWorkload {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "reduced" => Ok(Self::Reduced),
            "minimal" => Ok(Self::Minimal),
            _ => Err(ParseOptionError::new(
                "workload",
                s,
                "normal, reduced, minimal",
            )),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "claude" | "anthropic" => Ok(Self::Claude),
            "openai" | "gpt" => Ok(Self::OpenAi),
            _ => Err(ParseOptionError::new(
                "provider",
                s,
                "gemini, claude, openai",
            )),
        }
    }
}

impl fmt::Display for TailorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CoverLetterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ApiWorkload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
