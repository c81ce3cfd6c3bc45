//! Provider 팩토리 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::{Result, bail};

use crate::application::ports::{GenerationProvider, HttpTransport, ProviderFactory};
use crate::domain::options::ProviderKind;
use crate::infrastructure::config::Config;
use crate::infrastructure::providers::{AnthropicProvider, GeminiProvider, OpenAiProvider};

/// 설정(엔드포인트/모델/활성화)에 따라 제공자 어댑터를 만든다.
pub struct ProviderFactoryAdapter {
    transport: Arc<dyn HttpTransport>,
}

impl ProviderFactoryAdapter {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

impl ProviderFactory for ProviderFactoryAdapter {
    fn build(&self, config: &Config, kind: ProviderKind) -> Result<Box<dyn GenerationProvider>> {
        let cfg = config.provider_config(kind);
        let transport = Arc::clone(&self.transport);
        let provider: Option<Box<dyn GenerationProvider>> = match kind {
            ProviderKind::Gemini => GeminiProvider::from_config(cfg, transport)
                .map(|p| Box::new(p) as Box<dyn GenerationProvider>),
            ProviderKind::Claude => AnthropicProvider::from_config(cfg, transport)
                .map(|p| Box::new(p) as Box<dyn GenerationProvider>),
            ProviderKind::OpenAi => OpenAiProvider::from_config(cfg, transport)
                .map(|p| Box::new(p) as Box<dyn GenerationProvider>),
        };

        match provider {
            Some(provider) => Ok(provider),
            None => bail!(
                "provider '{}' is disabled. Set providers.{}.enabled to true in config",
                kind.id(),
                config_key(kind)
            ),
        }
    }
}

fn config_key(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Gemini => "gemini",
        ProviderKind::Claude => "anthropic",
        ProviderKind::OpenAi => "openai",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::ports::{HttpReply, HttpRequest, TransportError};

    struct Offline;

    #[async_trait::async_trait]
    impl HttpTransport for Offline {
        async fn send(&self, _request: HttpRequest) -> Result<HttpReply, TransportError> {
            Err(TransportError("offline".to_string()))
        }
    }

    #[test]
    fn builds_the_requested_kind() {
        let factory = ProviderFactoryAdapter::new(Arc::new(Offline));
        for kind in ProviderKind::ALL {
            let provider = factory.build(&Config::default(), kind).unwrap();
            assert_eq!(provider.kind(), kind);
        }
    }

    #[test]
    fn disabled_provider_is_rejected_at_selection() {
        let config: Config = serde_json::from_value(json!({
            "providers": { "anthropic": { "enabled": false } }
        }))
        .unwrap();
        let factory = ProviderFactoryAdapter::new(Arc::new(Offline));

        let err = factory.build(&config, ProviderKind::Claude).err().unwrap();
        assert!(err.to_string().contains("providers.anthropic.enabled"));
        assert!(factory.build(&config, ProviderKind::OpenAi).is_ok());
    }
}
