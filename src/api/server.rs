//! HTTP server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::core_state::CoreState;

/// Handle to the running HTTP server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ApiServer {
    /// Bind the configured address and start serving in a background
    /// task. Returns once the listener is bound.
    pub async fn start(core: Arc<CoreState>) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind(&core.settings.bind_addr).await?;
        let addr = listener.local_addr()?;

        let router = api_router(core);
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(err) = serve.await {
                tracing::error!("API server error: {err}");
            }
        });

        tracing::info!("API listening on http://{addr}");
        Ok(Self {
            addr,
            shutdown: Some(tx),
            task,
        })
    }

    /// Signal graceful shutdown and wait for in-flight requests.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
        tracing::info!("API server stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[tokio::test]
    async fn starts_and_stops() {
        let dir = tempfile::TempDir::new().unwrap();
        let core = Arc::new(CoreState::new(
            dir.path().join("test.db"),
            dir.path().join("uploads"),
            Settings {
                bind_addr: "127.0.0.1:0".into(),
                registration_key: None,
            },
        ));
        core.open_db().unwrap();

        let server = ApiServer::start(core).await.unwrap();
        assert_ne!(server.addr.port(), 0);
        server.shutdown().await;
    }
}
