//! 같은 세션에서 겹쳐 들어온 생성 요청의 직렬화.

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// 한 세션 안의 생성 호출을 도착 순서대로 하나씩 실행한다.
/// 중복 제거나 취소는 하지 않으며, 각 호출은 자기 요청을 그대로 보낸다.
#[derive(Default)]
pub struct GenerationSession {
    gate: Mutex<()>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn acquire(&self) -> MutexGuard<'_, ()> {
        if let Ok(guard) = self.gate.try_lock() {
            return guard;
        }
        debug!("generation already in progress; queued");
        self.gate.lock().await
    }
}
