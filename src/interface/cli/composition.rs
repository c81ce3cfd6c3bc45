//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::ports::{ConfigRepository, HttpTransport};
use crate::application::usecases::diagnostics::{InspectConfigUseCase, PreloadDecodersUseCase};
use crate::application::usecases::fetch_job_spec::FetchJobSpecUseCase;
use crate::application::usecases::generate::{GenerateUseCase, GenerationSession};
use crate::infrastructure::adapters::{
    ConsoleReporter, EnvCredentialResolver, JsonConfigRepository, MarkdownRendererAdapter,
    ProviderFactoryAdapter,
};
use crate::infrastructure::assets::{DecoderLibraries, ScriptLoader};
use crate::infrastructure::documents::FileTextExtractor;
use crate::infrastructure::fetcher::UrlTextExtractor;
use crate::infrastructure::http::ReqwestTransport;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
/// 모든 외부 호출은 하나의 전송기를 공유한다.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    credential_resolver: EnvCredentialResolver,
    provider_factory: ProviderFactoryAdapter,
    decoders: Arc<DecoderLibraries>,
    documents: FileTextExtractor,
    pages: UrlTextExtractor,
    renderer: MarkdownRendererAdapter,
    reporter: ConsoleReporter,
    session: GenerationSession,
}

impl AppComposition {
    /// reqwest 전송기와 병합 설정(프록시 주소)으로 조립한다.
    pub fn new(quiet: bool) -> Result<Self> {
        Self::with_transport(Arc::new(ReqwestTransport::default()), quiet)
    }

    /// 전송기를 외부에서 주입한다.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, quiet: bool) -> Result<Self> {
        let config_repo = JsonConfigRepository;
        let config = config_repo
            .load()
            .context("failed to load cvspruce config")?;

        let decoders = Arc::new(DecoderLibraries::new(ScriptLoader::new(Arc::clone(
            &transport,
        ))));

        Ok(Self {
            config_repo,
            credential_resolver: EnvCredentialResolver,
            provider_factory: ProviderFactoryAdapter::new(Arc::clone(&transport)),
            documents: FileTextExtractor::new(Arc::clone(&decoders)),
            decoders,
            pages: UrlTextExtractor::with_proxy(transport, config.proxy_base_url()),
            renderer: MarkdownRendererAdapter,
            reporter: ConsoleReporter::new(quiet),
            session: GenerationSession::new(),
        })
    }

    pub fn renderer(&self) -> &MarkdownRendererAdapter {
        &self.renderer
    }

    /// 생성 유스케이스를 만든다. 같은 조립 인스턴스에서 만든 유스케이스는 세션을 공유한다.
    pub fn generate_usecase(&self) -> GenerateUseCase<'_> {
        GenerateUseCase {
            config_repo: &self.config_repo,
            credential_resolver: &self.credential_resolver,
            provider_factory: &self.provider_factory,
            documents: &self.documents,
            pages: &self.pages,
            reporter: &self.reporter,
            session: &self.session,
        }
    }

    pub fn fetch_job_spec_usecase(&self) -> FetchJobSpecUseCase<'_> {
        FetchJobSpecUseCase {
            pages: &self.pages,
            reporter: &self.reporter,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    pub fn preload_decoders_usecase(&self) -> PreloadDecodersUseCase<'_> {
        PreloadDecodersUseCase {
            preloader: self.decoders.as_ref(),
            reporter: &self.reporter,
        }
    }
}
