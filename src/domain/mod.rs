//! Domain layer
//! 프롬프트/스키마/검증 규칙과 엔티티를 외부 의존성 없이 표현한다.

pub mod errors;
pub mod generation;
pub mod options;
pub mod prompt;
pub mod schema;
pub mod validation;
