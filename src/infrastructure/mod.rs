//! Infrastructure layer
//! 외부 시스템(LLM API/CORS 프록시/CDN/파일시스템)과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod assets;
pub mod config;
pub mod documents;
pub mod fetcher;
pub mod http;
pub mod providers;
pub mod render;
