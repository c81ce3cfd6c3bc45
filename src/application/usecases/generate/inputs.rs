//! CV/채용공고 텍스트 확보 단계.

use anyhow::Result;

use crate::application::usecases::generate::GenerateUseCase;
use crate::domain::generation::TextSource;

/// 텍스트 원천(직접 입력/파일/URL)을 본문 문자열로 바꾼다.
/// 추출기 오류 메시지는 그대로 사용자에게 전달된다.
pub(super) async fn resolve_text(
    use_case: &GenerateUseCase<'_>,
    label: &str,
    source: &TextSource,
) -> Result<String> {
    let text = match source {
        TextSource::Inline(text) => text.clone(),
        TextSource::File(path) => {
            use_case
                .reporter
                .status(label, &format!("reading {}", path.display()));
            use_case.documents.extract_text_from_file(path).await?
        }
        TextSource::Url(url) => {
            use_case.reporter.status(label, "fetching via proxy");
            use_case.pages.extract_text_from_url(url).await?
        }
    };

    use_case
        .reporter
        .kv(label, &format!("{} chars", text.chars().count()));
    Ok(text)
}
