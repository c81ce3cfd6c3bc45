//! 실행 환경 점검 유스케이스(설정 병합 결과, 디코더 라이브러리 선로딩).

use anyhow::{Result, anyhow};

use crate::application::ports::{ConfigRepository, DecoderPreloader, Reporter};

/// 현재 적용 중인 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}

/// 라이브러리별 선로딩 결과(받은 바이트 수).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderStatus {
    pub library: &'static str,
    pub bytes: usize,
}

/// pdf.js(워커 포함)와 mammoth를 동시에 받아 둔다.
pub struct PreloadDecodersUseCase<'a> {
    pub preloader: &'a dyn DecoderPreloader,
    pub reporter: &'a dyn Reporter,
}

impl<'a> PreloadDecodersUseCase<'a> {
    /// 둘 다 시도한 뒤, 하나라도 실패하면 첫 오류를 돌려준다.
    pub async fn execute(&self) -> Result<Vec<DecoderStatus>> {
        self.reporter.section("Decoder Libraries");
        let (pdf, docx) = tokio::join!(self.preloader.preload_pdf(), self.preloader.preload_docx());

        let mut statuses = Vec::new();
        let mut first_error = None;
        for (library, result) in [("pdf.js", pdf), ("mammoth", docx)] {
            match result {
                Ok(bytes) => {
                    self.reporter.kv(library, &format!("{bytes} bytes"));
                    statuses.push(DecoderStatus { library, bytes });
                }
                Err(err) => {
                    self.reporter.status("error", &err.to_string());
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(anyhow!(err)),
            None => Ok(statuses),
        }
    }
}
