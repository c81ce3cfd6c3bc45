//! 애플리케이션 유스케이스 모음.

pub mod diagnostics;
pub mod fetch_job_spec;
pub mod generate;
