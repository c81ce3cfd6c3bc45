//! CV 맞춤 생성의 전체 오케스트레이션 유스케이스.

mod inputs;
mod session;

use std::time::Instant;

use anyhow::{Context, Result};

use crate::application::ports::{
    ConfigRepository, CredentialResolver, DocumentTextExtractor, PageTextExtractor,
    ProviderFactory, Reporter,
};
use crate::domain::generation::{GenerationOutcome, GenerationRequest, RunOptions};

use inputs::resolve_text;
pub use session::GenerationSession;

/// 설정 로딩 → 입력 확보 → 제공자 1회 호출까지를 조율한다.
pub struct GenerateUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub credential_resolver: &'a dyn CredentialResolver,
    pub provider_factory: &'a dyn ProviderFactory,
    pub documents: &'a dyn DocumentTextExtractor,
    pub pages: &'a dyn PageTextExtractor,
    pub reporter: &'a dyn Reporter,
    pub session: &'a GenerationSession,
}

impl<'a> GenerateUseCase<'a> {
    /// 생성 본 실행 진입점.
    /// 같은 세션에서 겹친 호출은 앞선 호출이 끝날 때까지 기다린다.
    pub async fn execute(&self, options: RunOptions) -> Result<GenerationOutcome> {
        let _turn = self.session.acquire().await;

        self.reporter.section("Load Config");
        let config = self
            .config_repo
            .load()
            .context("failed to load cvspruce config")?;

        let kind = options.provider.unwrap_or_else(|| config.provider());
        let workload = options.workload.unwrap_or_else(|| config.workload());
        let cover_letter_style = options
            .cover_letter_style
            .unwrap_or_else(|| config.cover_letter_style());
        let styles = options.styles.clone().unwrap_or_else(|| config.styles());
        let provider = self.provider_factory.build(&config, kind)?;

        self.reporter.section("Inputs");
        let cv_text = resolve_text(self, "CV", &options.cv).await?;
        let job_spec_text = resolve_text(self, "Job Spec", &options.job_spec).await?;

        let api_key = options
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.credential_resolver.resolve(&config, kind))
            .unwrap_or_default();

        let request = GenerationRequest::new(api_key, cv_text, job_spec_text)
            .with_keywords(options.keywords.clone())
            .with_styles(styles)
            .with_cover_letter_style(cover_letter_style)
            .with_workload(workload);

        self.reporter.section("Generate");
        self.reporter.kv("Provider", kind.full_label());
        self.reporter.kv("Workload", workload.label());
        self.reporter.kv(
            "Styles",
            &request
                .styles
                .iter()
                .map(|style| style.label())
                .collect::<Vec<_>>()
                .join(", "),
        );
        self.reporter.status(kind.id(), "waiting for response");

        let started = Instant::now();
        let response = provider.generate(&request).await?;
        self.reporter.status(
            "done",
            &format!(
                "{} responded in {:.1}s ({}% match)",
                kind.label(),
                started.elapsed().as_secs_f32(),
                response.match_percentage
            ),
        );

        Ok(GenerationOutcome {
            provider: kind,
            workload,
            response,
        })
    }
}
