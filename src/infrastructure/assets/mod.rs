//! 무거운 디코더 라이브러리를 필요할 때만 받아 오는 지연 로더.

mod decoders;
mod integrity;
mod loader;

pub use decoders::{DecoderLibraries, MAMMOTH, PDF_JS, PDF_JS_WORKER, PdfJsRuntime, ScriptAsset};
pub use integrity::{sri_sha384, verify_integrity};
pub use loader::{LoadedScript, ScriptLoader};
