use crate::error::AppError;
use gym_core::config::EngineConfig;
use gym_core::LifecycleEngine;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LifecycleEngine>,
    pub primary_timeout: Duration,
}

impl AppState {
    pub fn new(engine: Arc<LifecycleEngine>, primary_timeout: Duration) -> Self {
        Self {
            engine,
            primary_timeout,
        }
    }

    /// Open the file-backed engine at `root` using its `.gym/config.yaml`.
    pub fn open(root: &Path) -> gym_core::Result<Self> {
        let cfg = EngineConfig::load(root)?;
        let engine = LifecycleEngine::open(root)?;
        Ok(Self::new(
            Arc::new(engine),
            Duration::from_secs(cfg.primary_timeout_seconds),
        ))
    }

    /// Run `op` on the blocking pool, bounded by the primary-write timeout.
    pub async fn run<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&LifecycleEngine) -> gym_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let engine = self.engine.clone();
        let task = tokio::task::spawn_blocking(move || op(&engine));
        let joined = tokio::time::timeout(self.primary_timeout, task)
            .await
            .map_err(|_| {
                AppError::timeout(format!(
                    "operation exceeded {}s; its outcome is unknown",
                    self.primary_timeout.as_secs()
                ))
            })?;
        let result = joined.map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_core::notify::DisabledNotifier;
    use gym_core::store::FileStore;
    use tempfile::TempDir;

    fn state(timeout: Duration) -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::init(dir.path()).unwrap());
        let engine = LifecycleEngine::new(store, Arc::new(DisabledNotifier));
        (dir, AppState::new(Arc::new(engine), timeout))
    }

    #[tokio::test]
    async fn run_propagates_domain_errors() {
        let (_dir, state) = state(Duration::from_secs(5));
        let err = state
            .run(|engine| engine.store().load_client("c404"))
            .await
            .unwrap_err();
        assert!(err.0.downcast_ref::<gym_core::GymError>().is_some());
    }

    #[tokio::test]
    async fn slow_operation_times_out() {
        let (_dir, state) = state(Duration::from_millis(20));
        let err = state
            .run(|_| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await
            .unwrap_err();
        let response = axum::response::IntoResponse::into_response(err);
        assert_eq!(response.status(), axum::http::StatusCode::GATEWAY_TIMEOUT);
    }
}
