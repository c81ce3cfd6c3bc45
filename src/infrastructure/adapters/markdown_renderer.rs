//! 마크다운 렌더링 포트 구현 어댑터.

use crate::application::ports::ResponseRenderer;
use crate::domain::generation::AiResponse;
use crate::domain::options::{ApiWorkload, ProviderKind};
use crate::infrastructure::render;

/// 마크다운 렌더링 어댑터.
pub struct MarkdownRendererAdapter;

impl ResponseRenderer for MarkdownRendererAdapter {
    fn render(
        &self,
        response: &AiResponse,
        provider: ProviderKind,
        workload: ApiWorkload,
    ) -> String {
        render::render_response_markdown(response, provider, workload)
    }
}
