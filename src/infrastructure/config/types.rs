//! 설정 스키마와 병합/해석 규칙.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::options::{ApiWorkload, CoverLetterStyle, ProviderKind, TailorStyle};

pub const DEFAULT_PROXY_BASE_URL: &str = "https://api.codetabs.com/v1/proxy?quest=";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// provider별 엔드포인트/인증 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 기본 provider(gemini/claude/openai)
    pub provider: Option<String>,
    /// 기본 워크로드(normal/reduced/minimal)
    pub workload: Option<String>,
    /// 기본 커버레터 분량(short/middle/long)
    pub cover_letter_style: Option<String>,
    /// 기본 재작성 스타일 목록
    pub styles: Option<Vec<String>>,
    /// 채용공고 URL을 중계할 공개 CORS 프록시 주소(대상 URL이 뒤에 붙는다)
    pub proxy_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub gemini: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub openai: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자(선택)
    pub model: Option<String>,
    /// API 베이스 URL(선택)
    pub api_base: Option<String>,
    /// API key를 읽을 환경변수 이름. 키 자체는 설정에 저장하지 않는다.
    pub api_key_env: Option<String>,
}

impl Config {
    pub fn provider(&self) -> ProviderKind {
        parse_or_default(self.defaults.provider.as_deref(), "defaults.provider")
    }

    pub fn workload(&self) -> ApiWorkload {
        parse_or_default(self.defaults.workload.as_deref(), "defaults.workload")
    }

    pub fn cover_letter_style(&self) -> CoverLetterStyle {
        parse_or_default(
            self.defaults.cover_letter_style.as_deref(),
            "defaults.cover_letter_style",
        )
    }

    /// 설정된 스타일 목록. 미지정이면 Precision 하나.
    /// 알 수 없는 값은 건너뛰고 중복은 첫 등장 순서만 남긴다.
    pub fn styles(&self) -> Vec<TailorStyle> {
        let Some(raw) = &self.defaults.styles else {
            return vec![TailorStyle::Precision];
        };

        let mut styles = Vec::new();
        for value in raw {
            match value.parse::<TailorStyle>() {
                Ok(style) if !styles.contains(&style) => styles.push(style),
                Ok(_) => {}
                Err(err) => warn!("ignoring defaults.styles entry: {err}"),
            }
        }
        styles
    }

    pub fn proxy_base_url(&self) -> String {
        self.defaults
            .proxy_base_url
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROXY_BASE_URL.to_string())
    }

    pub fn provider_config(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::Gemini => self.providers.gemini.as_ref(),
            ProviderKind::Claude => self.providers.anthropic.as_ref(),
            ProviderKind::OpenAi => self.providers.openai.as_ref(),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.providers.merge_from(other.providers);
    }
}

fn parse_or_default<T>(value: Option<&str>, key: &str) -> T
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = value else {
        return T::default();
    };
    raw.parse().unwrap_or_else(|err| {
        warn!("ignoring {key}: {err}");
        T::default()
    })
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        if other.workload.is_some() {
            self.workload = other.workload;
        }
        if other.cover_letter_style.is_some() {
            self.cover_letter_style = other.cover_letter_style;
        }
        if other.styles.is_some() {
            self.styles = other.styles;
        }
        if other.proxy_base_url.is_some() {
            self.proxy_base_url = other.proxy_base_url;
        }
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub(crate) fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}

impl ProvidersConfig {
    pub(crate) fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider_config(&mut self.gemini, other.gemini);
        merge_provider_config(&mut self.anthropic, other.anthropic);
        merge_provider_config(&mut self.openai, other.openai);
    }
}

fn merge_provider_config(target: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    match (target.as_mut(), incoming) {
        (Some(existing), Some(next)) => existing.merge_from(next),
        (None, Some(next)) => *target = Some(next),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_config_uses_built_in_defaults() {
        let config = Config::default();
        assert_eq!(config.provider(), ProviderKind::Gemini);
        assert_eq!(config.workload(), ApiWorkload::Normal);
        assert_eq!(config.cover_letter_style(), CoverLetterStyle::Middle);
        assert_eq!(config.styles(), vec![TailorStyle::Precision]);
        assert_eq!(config.proxy_base_url(), DEFAULT_PROXY_BASE_URL);
    }

    #[test]
    fn later_values_override_field_by_field() {
        let mut base: Config = serde_json::from_value(json!({
            "defaults": { "provider": "claude", "workload": "reduced" },
            "providers": { "anthropic": { "model": "a", "api_key_env": "KEY_A" } }
        }))
        .unwrap();
        let overlay: Config = serde_json::from_value(json!({
            "defaults": { "workload": "minimal" },
            "providers": { "anthropic": { "model": "b" } }
        }))
        .unwrap();

        base.merge_from(overlay);

        assert_eq!(base.provider(), ProviderKind::Claude);
        assert_eq!(base.workload(), ApiWorkload::Minimal);
        let anthropic = base.provider_config(ProviderKind::Claude).unwrap();
        assert_eq!(anthropic.model.as_deref(), Some("b"));
        assert_eq!(anthropic.api_key_env.as_deref(), Some("KEY_A"));
    }

    #[test]
    fn styles_skip_unknown_and_duplicate_entries() {
        let config: Config = serde_json::from_value(json!({
            "defaults": { "styles": ["ruthless", "bold", "Ruthless", "ambitious"] }
        }))
        .unwrap();
        assert_eq!(
            config.styles(),
            vec![TailorStyle::Ruthless, TailorStyle::Ambitious]
        );
    }

    #[test]
    fn invalid_enum_values_fall_back_to_defaults() {
        let config: Config = serde_json::from_value(json!({
            "defaults": { "workload": "maximal", "provider": "llama" }
        }))
        .unwrap();
        assert_eq!(config.workload(), ApiWorkload::Normal);
        assert_eq!(config.provider(), ProviderKind::Gemini);
    }
}
