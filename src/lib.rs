//! cvspruce library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::generation::{GenerationOutcome, RunOptions};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 생성 함수(진행 출력 없음).
pub async fn generate(options: RunOptions) -> Result<GenerationOutcome> {
    let composition = AppComposition::new(true)?;
    composition.generate_usecase().execute(options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::new(true)?;
    composition.inspect_config_usecase().execute()
}
