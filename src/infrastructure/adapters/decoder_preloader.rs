//! 디코더 라이브러리 선로딩 포트 구현.

use async_trait::async_trait;

use crate::application::ports::DecoderPreloader;
use crate::domain::errors::ScriptLoadError;
use crate::infrastructure::assets::DecoderLibraries;

#[async_trait]
impl DecoderPreloader for DecoderLibraries {
    async fn preload_pdf(&self) -> Result<usize, ScriptLoadError> {
        let runtime = self.load_pdf_js().await?;
        Ok(runtime.library.body.len() + runtime.worker.body.len())
    }

    async fn preload_docx(&self) -> Result<usize, ScriptLoadError> {
        Ok(self.load_mammoth().await?.body.len())
    }
}
