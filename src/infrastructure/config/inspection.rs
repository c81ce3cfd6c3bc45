//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use super::types::{Config, DefaultsConfig};
use crate::domain::options::ProviderKind;
use crate::infrastructure::providers::{anthropic, gemini, openai};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub providers: Vec<ProviderInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub provider: String,
    pub workload: String,
    pub cover_letter_style: String,
    pub styles: Vec<String>,
    pub proxy_base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub id: String,
    pub label: String,
    pub enabled: bool,
    pub model: String,
    pub api_base: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                provider: config.provider().id().to_string(),
                workload: config.workload().to_string(),
                cover_letter_style: config.cover_letter_style().to_string(),
                styles: config.styles().iter().map(ToString::to_string).collect(),
                proxy_base_url: config.proxy_base_url(),
            },
            providers: ProviderKind::ALL
                .into_iter()
                .map(|kind| ProviderInspection::from_config(config, kind))
                .collect(),
        }
    }
}

impl ProviderInspection {
    fn from_config(config: &Config, kind: ProviderKind) -> Self {
        let cfg = config.provider_config(kind);
        let (default_base, default_model) = match kind {
            ProviderKind::Gemini => (gemini::DEFAULT_API_BASE, gemini::DEFAULT_MODEL),
            ProviderKind::Claude => (anthropic::DEFAULT_API_BASE, anthropic::DEFAULT_MODEL),
            ProviderKind::OpenAi => (openai::DEFAULT_API_BASE, openai::DEFAULT_MODEL),
        };
        let api_resolution = resolve_provider_api_key(kind, cfg);

        Self {
            id: kind.id().to_string(),
            label: kind.full_label().to_string(),
            enabled: cfg.is_none_or(|c| c.is_enabled()),
            model: cfg
                .and_then(|c| c.model.clone())
                .unwrap_or_else(|| default_model.to_string()),
            api_base: cfg
                .and_then(|c| c.api_base.clone())
                .unwrap_or_else(|| default_base.to_string()),
            api_key_source: api_resolution.source,
            api_key_resolved: api_resolution.credential.is_some(),
        }
    }
}
