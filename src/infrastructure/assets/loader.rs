//! URL 단위로 중복 요청을 합치는 지연 스크립트 로더.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, info, warn};

use super::integrity::verify_integrity;
use crate::application::ports::{HttpRequest, HttpTransport};
use crate::domain::errors::ScriptLoadError;

/// 한 번 받아 온 스크립트 본문.
#[derive(Debug)]
pub struct LoadedScript {
    pub src: String,
    pub body: Vec<u8>,
}

type LoadResult = Result<Arc<LoadedScript>, ScriptLoadError>;
type PendingLoad = Shared<BoxFuture<'static, LoadResult>>;

#[derive(Default)]
struct Registry {
    loaded: HashMap<String, Arc<LoadedScript>>,
    pending: HashMap<String, PendingLoad>,
}

/// 로드 완료 집합과 진행 중 요청 목록을 인스턴스가 소유한다.
/// 복제본은 같은 레지스트리를 공유한다.
#[derive(Clone)]
pub struct ScriptLoader {
    transport: Arc<dyn HttpTransport>,
    registry: Arc<Mutex<Registry>>,
}

impl ScriptLoader {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// 이미 로드된 스크립트는 즉시 돌려주고, 로드 중이면 같은 작업에 합류한다.
    /// 실패는 캐시하지 않으므로 다음 호출이 다시 시도한다.
    pub async fn load_script(&self, src: &str, integrity: Option<&str>) -> LoadResult {
        let pending = {
            let mut registry = self.registry();
            if let Some(script) = registry.loaded.get(src) {
                return Ok(Arc::clone(script));
            }
            match registry.pending.get(src) {
                Some(pending) => {
                    debug!(src, "joining in-flight script load");
                    pending.clone()
                }
                None => {
                    let load = settle(
                        Arc::clone(&self.transport),
                        Arc::clone(&self.registry),
                        src.to_string(),
                        integrity.map(str::to_string),
                    )
                    .boxed()
                    .shared();
                    registry.pending.insert(src.to_string(), load.clone());
                    load
                }
            }
        };

        pending.await
    }

    pub fn is_loaded(&self, src: &str) -> bool {
        self.registry().loaded.contains_key(src)
    }

    pub fn is_pending(&self, src: &str) -> bool {
        self.registry().pending.contains_key(src)
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 실제 로드를 한 번 수행하고, 끝나면 진행 중 목록에서 빠진다.
async fn settle(
    transport: Arc<dyn HttpTransport>,
    registry: Arc<Mutex<Registry>>,
    src: String,
    integrity: Option<String>,
) -> LoadResult {
    let result = fetch_script(transport.as_ref(), &src, integrity.as_deref()).await;

    let mut registry = lock(&registry);
    registry.pending.remove(&src);
    match &result {
        Ok(script) => {
            info!(src = %src, bytes = script.body.len(), "script loaded");
            registry.loaded.insert(src, Arc::clone(script));
        }
        Err(err) => warn!("{err}"),
    }
    result
}

async fn fetch_script(
    transport: &dyn HttpTransport,
    src: &str,
    integrity: Option<&str>,
) -> LoadResult {
    let reply = transport
        .send(HttpRequest::get(src))
        .await
        .map_err(|err| ScriptLoadError::Fetch {
            src: src.to_string(),
            reason: err.to_string(),
        })?;
    if !reply.is_success() {
        return Err(ScriptLoadError::Fetch {
            src: src.to_string(),
            reason: format!("HTTP {}", reply.status),
        });
    }
    if let Some(integrity) = integrity {
        verify_integrity(src, integrity, &reply.body)?;
    }

    Ok(Arc::new(LoadedScript {
        src: src.to_string(),
        body: reply.body,
    }))
}
