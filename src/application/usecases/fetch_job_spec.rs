//! 채용공고 URL 본문만 추출하는 유스케이스.

use anyhow::Result;

use crate::application::ports::{PageTextExtractor, Reporter};

pub struct FetchJobSpecUseCase<'a> {
    pub pages: &'a dyn PageTextExtractor,
    pub reporter: &'a dyn Reporter,
}

impl<'a> FetchJobSpecUseCase<'a> {
    pub async fn execute(&self, url: &str) -> Result<String> {
        self.reporter.section("Fetch Job Spec");
        self.reporter.kv("URL", url.trim());
        let text = self.pages.extract_text_from_url(url).await?;
        self.reporter
            .kv("Extracted", &format!("{} chars", text.chars().count()));
        Ok(text)
    }
}
