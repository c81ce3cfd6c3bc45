//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod credential_resolver;
mod decoder_preloader;
mod markdown_renderer;
mod provider_factory;
mod reporter;

pub use config_repository::JsonConfigRepository;
pub use credential_resolver::EnvCredentialResolver;
pub use markdown_renderer::MarkdownRendererAdapter;
pub use provider_factory::ProviderFactoryAdapter;
pub use reporter::ConsoleReporter;
