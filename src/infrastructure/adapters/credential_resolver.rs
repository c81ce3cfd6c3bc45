//! 제공자 API key 해석 포트 구현.

use tracing::debug;

use crate::application::ports::CredentialResolver;
use crate::domain::options::ProviderKind;
use crate::infrastructure::config::{Config, resolve_provider_api_key};

/// `providers.<name>.api_key_env`(없으면 기본 환경변수)에서 키를 읽는다.
pub struct EnvCredentialResolver;

impl CredentialResolver for EnvCredentialResolver {
    fn resolve(&self, config: &Config, kind: ProviderKind) -> Option<String> {
        let resolution = resolve_provider_api_key(kind, config.provider_config(kind));
        if let Some(source) = &resolution.source {
            debug!(provider = kind.id(), source = %source, "api key lookup");
        }
        resolution.credential
    }
}
